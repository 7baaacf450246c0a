use clue_core::belief::SuspicionConfig;
use clue_core::game::AccusationRule;
use clue_core::model::card::Room;
use clue_core::model::participant::{BehaviorMode, ParticipantConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_MAX_TURNS: u32 = 300;
const MIN_SEATS: usize = 2;
const MAX_SEATS: usize = 6;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub seats: Vec<SeatConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.games.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        validate_seats(&mut self.seats)?;
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            replay_dir: self
                .outputs
                .replay_dir
                .as_deref()
                .map(|dir| resolve_template(&self.run_id, dir)),
        }
    }

    /// Seat setup handed to the state machine, in seat order.
    pub fn participants(&self) -> Vec<ParticipantConfig> {
        self.seats.iter().map(SeatConfig::participant).collect()
    }
}

/// Game sampling block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    #[serde(default)]
    pub accusation_rule: AccusationRule,
    /// Belief weights for automated seats; `CLUE_SUSPICION_*` when absent.
    #[serde(default)]
    pub suspicion: Option<SuspicionConfig>,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if self.max_turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.max_turns".to_string(),
                message: "turn cap must be at least 1".to_string(),
            });
        }

        if let Some(suspicion) = &self.suspicion {
            for (name, value) in [
                ("assumption_weight", suspicion.assumption_weight),
                ("witness_discount", suspicion.witness_discount),
                ("irrefutable_boost", suspicion.irrefutable_boost),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidField {
                        field: format!("games.suspicion.{name}"),
                        message: "weight must be a non-negative number".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn suspicion(&self) -> SuspicionConfig {
        self.suspicion.unwrap_or_else(SuspicionConfig::from_env)
    }
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

/// One seat at the table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeatConfig {
    pub name: String,
    pub kind: SeatKind,
    #[serde(default = "default_mode")]
    pub mode: BehaviorMode,
    #[serde(default)]
    pub start: Option<Room>,
    #[serde(default)]
    pub params: serde_yaml::Value,
}

impl SeatConfig {
    pub fn participant(&self) -> ParticipantConfig {
        ParticipantConfig {
            mode: self.mode,
            start: self.start,
        }
    }
}

fn default_mode() -> BehaviorMode {
    BehaviorMode::Automated
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    /// Belief-driven planner; needs an automated seat.
    Detective,
    /// Seeded random choices; stands in for a human.
    Random,
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
    #[serde(default)]
    pub replay_dir: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let replay = self.replay_dir.as_ref();
        for (label, value) in [
            ("outputs.jsonl", Some(&self.jsonl)),
            ("outputs.summary_md", Some(&self.summary_md)),
            ("outputs.replay_dir", replay),
        ] {
            let Some(value) = value else { continue };
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_seats(seats: &mut [SeatConfig]) -> Result<(), ValidationError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&seats.len()) {
        return Err(ValidationError::InvalidField {
            field: "seats".to_string(),
            message: format!(
                "between {MIN_SEATS} and {MAX_SEATS} seats required, found {}",
                seats.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for (index, seat) in seats.iter_mut().enumerate() {
        if seat.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("seats[{index}].name"),
                message: "seat name must not be empty".to_string(),
            });
        }

        if !seat.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("seats[{}].name", seat.name),
                message: "seat name contains invalid characters".to_string(),
            });
        }

        if !seen.insert(seat.name.clone()) {
            return Err(ValidationError::InvalidField {
                field: "seats".to_string(),
                message: format!("seat name '{}' defined more than once", seat.name),
            });
        }

        if seat.kind == SeatKind::Detective && !seat.mode.is_automated() {
            return Err(ValidationError::InvalidField {
                field: format!("seats[{}].mode", seat.name),
                message: "detective seats must be automated".to_string(),
            });
        }

        if seat.params.is_null() {
            seat.params = serde_yaml::Value::Mapping(Default::default());
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    pub replay_dir: Option<PathBuf>,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "night_one"
games:
  seed: 123
  count: 8
seats:
  - name: "scarlet"
    kind: "random"
    mode: "human"
  - name: "sherlock"
    kind: "detective"
    params:
      margin: 4.5
  - name: "marple"
    kind: "detective"
    start: "Study"
outputs:
  jsonl: "bench/out/{run_id}/games.jsonl"
  summary_md: "bench/out/{run_id}/summary.md"
  replay_dir: "bench/out/{run_id}/replays"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: BenchConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.games.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(cfg.games.accusation_rule, AccusationRule::EndsGame);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));

        let outputs = cfg.resolved_outputs();
        assert_eq!(
            outputs.jsonl,
            PathBuf::from("bench/out/night_one/games.jsonl")
        );
        assert_eq!(
            outputs.replay_dir,
            Some(PathBuf::from("bench/out/night_one/replays"))
        );

        let participants = cfg.participants();
        assert_eq!(participants[0].mode, BehaviorMode::Human);
        assert_eq!(participants[1].mode, BehaviorMode::Automated);
        assert_eq!(participants[2].start, Some(Room::Study));
        assert!(cfg.seats[2].params.is_mapping());
    }

    #[test]
    fn rejects_human_detective() {
        let yaml = BASIC_YAML.replace(
            "kind: \"detective\"\n    params:",
            "kind: \"detective\"\n    mode: \"human\"\n    params:",
        );
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "seats[sherlock].mode"
        ));
    }

    #[test]
    fn rejects_duplicate_seats() {
        let yaml = BASIC_YAML.replace("name: \"marple\"", "name: \"sherlock\"");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(err, ValidationError::InvalidField { field, .. } if field == "seats"));
    }

    #[test]
    fn rejects_lone_seat() {
        let yaml = r#"
run_id: "solo"
games:
  count: 1
seats:
  - name: "alone"
    kind: "detective"
outputs:
  jsonl: "out.jsonl"
  summary_md: "out.md"
"#;
        let mut cfg: BenchConfig = serde_yaml::from_str(yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(err.to_string().starts_with("seats: between 2 and 6"));
    }

    #[test]
    fn suspicion_block_is_optional_and_checked() {
        let mut cfg: BenchConfig = serde_yaml::from_str(BASIC_YAML).expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.games.suspicion, None);

        let yaml = BASIC_YAML.replace(
            "  count: 8\n",
            "  count: 8\n  suspicion:\n    witness_discount: 1.25\n",
        );
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("validate");
        let suspicion = cfg.games.suspicion();
        assert_eq!(suspicion.witness_discount, 1.25);
        assert_eq!(
            suspicion.assumption_weight,
            SuspicionConfig::default().assumption_weight
        );

        let yaml = BASIC_YAML.replace(
            "  count: 8\n",
            "  count: 8\n  suspicion:\n    irrefutable_boost: -2.0\n",
        );
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "games.suspicion.irrefutable_boost"
        ));
    }

    #[test]
    fn parses_accusation_rule() {
        let yaml = BASIC_YAML.replace(
            "  count: 8\n",
            "  count: 8\n  accusation_rule: \"eliminates_accuser\"\n",
        );
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.games.accusation_rule, AccusationRule::EliminatesAccuser);
    }

    #[test]
    fn rejects_bad_run_id() {
        let yaml = BASIC_YAML.replace("night_one", "night one");
        let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert!(cfg.validate().is_err());
    }
}
