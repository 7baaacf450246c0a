//! Per-seat deduction state for automated participants.
//!
//! - `config`: tunable suspicion weights.
//! - `state`: hard knowledge (who holds what, who lacks what) plus ordinal
//!   suspicion weights over solution candidates.

mod config;
mod state;

pub use config::SuspicionConfig;
pub use state::{BeliefState, Holder};
