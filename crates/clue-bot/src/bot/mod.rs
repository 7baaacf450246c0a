mod accuse;
mod assume;
mod movement;
mod params;
mod view;

pub use accuse::AccusationPlanner;
pub use assume::AssumptionPlanner;
pub use movement::MovementPlanner;
pub use params::DetectiveParams;
pub use view::BeliefView;

use clue_core::board::{Board, Position};
use clue_core::model::card_set::CardSet;
use clue_core::model::hand::Hand;
use clue_core::model::seat::Seat;

/// Everything a planner may look at for one decision. Built fresh per
/// decision from the seat's own view of the game, never from hidden state.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub position: Position,
    pub board: &'a Board,
    pub belief: BeliefView<'a>,
    pub params: &'a DetectiveParams,
    /// Rooms this seat has already assumed in.
    pub visited: CardSet,
}

impl<'a> BotContext<'a> {
    pub fn new(
        seat: Seat,
        hand: &'a Hand,
        position: Position,
        board: &'a Board,
        belief: BeliefView<'a>,
        params: &'a DetectiveParams,
        visited: CardSet,
    ) -> Self {
        Self {
            seat,
            hand,
            position,
            board,
            belief,
            params,
            visited,
        }
    }
}
