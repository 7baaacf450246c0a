/// Tunables for the detective planners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectiveParams {
    /// Confirmed categories needed before accusing outright.
    pub required_confirmed: usize,
    /// Lead the top candidate needs over the runner-up for an unconfirmed
    /// category to count as settled.
    pub margin: f32,
    /// Irrefutable assumptions by other seats after which a category whose
    /// top candidate leads at all counts as settled. Zero turns this off.
    pub irrefutable_settles: u32,
    pub room_weight: f32,
    pub confirmed_room_bonus: f32,
    pub unvisited_bonus: f32,
    pub distance_penalty: f32,
}

impl Default for DetectiveParams {
    fn default() -> Self {
        Self {
            required_confirmed: 3,
            margin: 6.0,
            irrefutable_settles: 2,
            room_weight: 1.0,
            confirmed_room_bonus: 10.0,
            unvisited_bonus: 1.5,
            distance_penalty: 0.25,
        }
    }
}

impl DetectiveParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Only accuses once every category is confirmed.
    pub fn cautious() -> Self {
        Self {
            margin: f32::INFINITY,
            irrefutable_settles: 0,
            ..Self::default()
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_irrefutable_settles(mut self, touches: u32) -> Self {
        self.irrefutable_settles = touches;
        self
    }

    pub fn with_required_confirmed(mut self, required: usize) -> Self {
        self.required_confirmed = required.clamp(1, 3);
        self
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut float = |key: &str, fallback: f32| {
            read(key)
                .and_then(|raw| raw.trim().parse::<f32>().ok())
                .filter(|value| !value.is_nan() && *value >= 0.0)
                .unwrap_or(fallback)
        };

        let margin = float("CLUE_BOT_MARGIN", defaults.margin);
        let room_weight = float("CLUE_BOT_ROOM_WEIGHT", defaults.room_weight);
        let confirmed_room_bonus =
            float("CLUE_BOT_CONFIRMED_ROOM_BONUS", defaults.confirmed_room_bonus);
        let unvisited_bonus = float("CLUE_BOT_UNVISITED_BONUS", defaults.unvisited_bonus);
        let distance_penalty = float("CLUE_BOT_DISTANCE_PENALTY", defaults.distance_penalty);
        let required_confirmed = read("CLUE_BOT_REQUIRED_CONFIRMED")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map(|value| value.clamp(1, 3))
            .unwrap_or(defaults.required_confirmed);
        let irrefutable_settles = read("CLUE_BOT_IRREFUTABLE_SETTLES")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(defaults.irrefutable_settles);

        Self {
            required_confirmed,
            margin,
            irrefutable_settles,
            room_weight,
            confirmed_room_bonus,
            unvisited_bonus,
            distance_penalty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DetectiveParams;
    use std::collections::HashMap;

    #[test]
    fn reader_overrides_and_clamps() {
        let vars: HashMap<&str, &str> = [
            ("CLUE_BOT_MARGIN", "2.5"),
            ("CLUE_BOT_REQUIRED_CONFIRMED", "9"),
            ("CLUE_BOT_DISTANCE_PENALTY", "-1"),
            ("CLUE_BOT_IRREFUTABLE_SETTLES", "4"),
        ]
        .into_iter()
        .collect();
        let params = DetectiveParams::from_reader(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(params.margin, 2.5);
        assert_eq!(params.required_confirmed, 3);
        assert_eq!(params.irrefutable_settles, 4);
        assert_eq!(params.distance_penalty, DetectiveParams::default().distance_penalty);
    }

    #[test]
    fn cautious_never_settles_on_margin() {
        let cautious = DetectiveParams::cautious();
        assert!(cautious.margin.is_infinite());
        assert_eq!(cautious.irrefutable_settles, 0);
    }
}
