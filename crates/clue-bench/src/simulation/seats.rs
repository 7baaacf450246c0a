use clue_bot::{DetectiveParams, HeuristicPolicy, Policy, RandomPolicy};
use thiserror::Error;

use crate::config::{SeatConfig, SeatKind};

const SEAT_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Error)]
pub enum SeatError {
    #[error("invalid detective parameter for seat '{name}': {message}")]
    InvalidDetectiveParam { name: String, message: String },
    #[error("invalid random parameter for seat '{name}': {message}")]
    InvalidRandomParam { name: String, message: String },
}

/// A configured seat, ready to spawn a fresh policy for every game.
#[derive(Debug, Clone)]
pub(crate) struct SeatBlueprint {
    pub(crate) name: String,
    pub(crate) kind: SeatKind,
    implementation: SeatImplementation,
}

#[derive(Debug, Clone)]
enum SeatImplementation {
    Detective(DetectiveParams),
    Random { accusation_chance: f64 },
}

impl SeatBlueprint {
    pub(crate) fn from_configs(configs: &[SeatConfig]) -> Result<Vec<Self>, SeatError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &SeatConfig) -> Result<Self, SeatError> {
        let implementation = match config.kind {
            SeatKind::Detective => SeatImplementation::Detective(detective_params(
                &config.name,
                &config.params,
            )?),
            SeatKind::Random => SeatImplementation::Random {
                accusation_chance: random_accusation_chance(&config.name, &config.params)?,
            },
        };
        Ok(Self {
            name: config.name.clone(),
            kind: config.kind,
            implementation,
        })
    }

    /// Random seats draw from a stream derived from the game seed and seat
    /// index so reruns make the same choices.
    pub(crate) fn spawn_policy(&self, seat_index: usize, game_seed: u64) -> Box<dyn Policy> {
        match &self.implementation {
            SeatImplementation::Detective(params) => Box::new(HeuristicPolicy::new(*params)),
            SeatImplementation::Random { accusation_chance } => {
                let seed = game_seed
                    .wrapping_add((seat_index as u64 + 1).wrapping_mul(SEAT_SEED_STRIDE));
                Box::new(RandomPolicy::new(seed).with_accusation_chance(*accusation_chance))
            }
        }
    }
}

fn param<'a>(params: &'a serde_yaml::Value, key: &str) -> Option<&'a serde_yaml::Value> {
    params
        .as_mapping()?
        .iter()
        .find_map(|(k, value)| (k.as_str() == Some(key)).then_some(value))
}

fn detective_params(name: &str, params: &serde_yaml::Value) -> Result<DetectiveParams, SeatError> {
    let invalid = |message: String| SeatError::InvalidDetectiveParam {
        name: name.to_string(),
        message,
    };

    if !params.is_null() && !params.is_mapping() {
        return Err(invalid("expected mapping for detective params".to_string()));
    }

    let cautious = match param(params, "cautious") {
        Some(value) => value
            .as_bool()
            .ok_or_else(|| invalid("cautious must be a boolean".to_string()))?,
        None => false,
    };
    let mut out = if cautious {
        DetectiveParams::cautious()
    } else {
        DetectiveParams::from_env()
    };

    for (key, slot) in [
        ("margin", &mut out.margin),
        ("room_weight", &mut out.room_weight),
        ("confirmed_room_bonus", &mut out.confirmed_room_bonus),
        ("unvisited_bonus", &mut out.unvisited_bonus),
        ("distance_penalty", &mut out.distance_penalty),
    ] {
        if let Some(value) = param(params, key) {
            let number = value
                .as_f64()
                .ok_or_else(|| invalid(format!("{key} must be a number")))?;
            if number.is_nan() || number < 0.0 {
                return Err(invalid(format!("{key} must be non-negative")));
            }
            *slot = number as f32;
        }
    }

    if let Some(value) = param(params, "required_confirmed") {
        let required = value
            .as_u64()
            .filter(|n| (1..=3).contains(n))
            .ok_or_else(|| invalid("required_confirmed must be 1, 2 or 3".to_string()))?;
        out = out.with_required_confirmed(required as usize);
    }

    if let Some(value) = param(params, "irrefutable_settles") {
        let touches = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid("irrefutable_settles must be a non-negative integer".to_string()))?;
        out = out.with_irrefutable_settles(touches);
    }

    Ok(out)
}

fn random_accusation_chance(name: &str, params: &serde_yaml::Value) -> Result<f64, SeatError> {
    let Some(value) = param(params, "accusation_chance") else {
        return Ok(0.0);
    };
    value
        .as_f64()
        .filter(|chance| (0.0..=1.0).contains(chance))
        .ok_or_else(|| SeatError::InvalidRandomParam {
            name: name.to_string(),
            message: "accusation_chance must be between 0 and 1".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter::FromIterator;

    fn mapping(entries: &[(&str, serde_yaml::Value)]) -> serde_yaml::Value {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::from_iter(entries.iter().map(
            |(key, value)| (serde_yaml::Value::String((*key).into()), value.clone()),
        )))
    }

    #[test]
    fn detective_params_default_when_empty() {
        let params = serde_yaml::Value::Mapping(Default::default());
        let parsed = detective_params("bot", &params).unwrap();
        assert_eq!(parsed.required_confirmed, DetectiveParams::default().required_confirmed);
    }

    #[test]
    fn detective_params_override_fields() {
        let params = mapping(&[
            ("margin", serde_yaml::Value::from(2.5)),
            ("required_confirmed", serde_yaml::Value::from(2)),
            ("irrefutable_settles", serde_yaml::Value::from(3)),
        ]);
        let parsed = detective_params("bot", &params).unwrap();
        assert_eq!(parsed.margin, 2.5);
        assert_eq!(parsed.required_confirmed, 2);
        assert_eq!(parsed.irrefutable_settles, 3);
    }

    #[test]
    fn cautious_detective_never_guesses() {
        let params = mapping(&[("cautious", serde_yaml::Value::from(true))]);
        let parsed = detective_params("bot", &params).unwrap();
        assert!(parsed.margin.is_infinite());
    }

    #[test]
    fn rejects_negative_margin() {
        let params = mapping(&[("margin", serde_yaml::Value::from(-1.0))]);
        let err = detective_params("bot", &params).unwrap_err();
        assert!(matches!(err, SeatError::InvalidDetectiveParam { .. }));
    }

    #[test]
    fn random_chance_must_be_a_probability() {
        let ok = mapping(&[("accusation_chance", serde_yaml::Value::from(0.25))]);
        assert_eq!(random_accusation_chance("r", &ok).unwrap(), 0.25);
        let bad = mapping(&[("accusation_chance", serde_yaml::Value::from(3.0))]);
        assert!(random_accusation_chance("r", &bad).is_err());
    }
}
