pub mod autopilot;
pub mod bot;
pub mod policy;

pub use autopilot::{Autopilot, AutopilotError, AutopilotReport};
pub use bot::{
    AccusationPlanner, AssumptionPlanner, BeliefView, BotContext, DetectiveParams, MovementPlanner,
};
pub use policy::{HeuristicPolicy, Policy, PolicyContext, RandomPolicy};
