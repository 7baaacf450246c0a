use serde::{Deserialize, Serialize};
use std::env;

/// Weight increments applied to solution candidates. Only the ordering they
/// produce matters to the choice functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspicionConfig {
    /// Added to each named candidate when any assumption is observed.
    pub assumption_weight: f32,
    /// Taken back from each named candidate when someone else disproves
    /// without the card being shown to this seat.
    pub witness_discount: f32,
    /// Added to each named candidate when nobody could disprove.
    pub irrefutable_boost: f32,
}

impl Default for SuspicionConfig {
    fn default() -> Self {
        Self {
            assumption_weight: 1.0,
            witness_discount: 0.5,
            irrefutable_boost: 3.0,
        }
    }
}

impl SuspicionConfig {
    pub fn from_env() -> Self {
        Self::from_reader(|key| env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base = Self::default();
        let mut parse = |key: &str, fallback: f32| {
            read(key)
                .and_then(|value| value.trim().parse::<f32>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(fallback)
        };
        let assumption = parse("CLUE_SUSPICION_ASSUME", base.assumption_weight);
        let witness = parse("CLUE_SUSPICION_WITNESS", base.witness_discount);
        let irrefutable = parse("CLUE_SUSPICION_IRREFUTABLE", base.irrefutable_boost);

        Self {
            assumption_weight: assumption.clamp(0.0, 10.0),
            witness_discount: witness.clamp(0.0, 10.0),
            irrefutable_boost: irrefutable.clamp(0.0, 50.0),
        }
    }
}
