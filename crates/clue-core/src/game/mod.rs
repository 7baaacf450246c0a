pub mod accusation;
pub mod disproval;
pub mod error;
pub mod phase;
pub mod replay;
pub mod rules;
pub mod setup;
pub mod state;
pub mod view;

pub use accusation::{Verdict, validate};
pub use disproval::DisprovalOutcome;
pub use error::GameError;
pub use phase::{GameOutcome, Phase, PhaseKind, Resolution, RollOutcome};
pub use replay::{DriverInput, InputEffect, ReplayLog};
pub use rules::{AccusationRule, GameRules};
pub use setup::{Deal, deal_game};
pub use state::{GameState, RollAnnouncer};
pub use view::SeatView;
