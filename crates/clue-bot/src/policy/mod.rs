mod heuristic;
mod random;

pub use heuristic::HeuristicPolicy;
pub use random::RandomPolicy;

use clue_core::belief::BeliefState;
use clue_core::board::Position;
use clue_core::game::{GameState, SeatView};
use clue_core::model::assumption::Theory;
use clue_core::model::card::{Card, Room, Suspect, Weapon};
use clue_core::model::hand::Hand;
use clue_core::model::seat::Seat;

/// What a policy may see: the public table plus its own seat's hand and
/// belief, through a [`SeatView`]. Other hands, the deal seed and the
/// solution are not reachable from here.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub view: SeatView<'a>,
}

impl<'a> PolicyContext<'a> {
    pub fn new(seat: Seat, game: &'a GameState) -> Self {
        Self {
            seat,
            view: game.seat_view(seat),
        }
    }

    pub fn hand(&self) -> Option<&'a Hand> {
        self.view.hand()
    }

    pub fn position(&self) -> Position {
        self.view.position()
    }

    pub fn belief(&self) -> Option<&'a BeliefState> {
        self.view.belief()
    }

    /// Rooms reachable this turn with their remaining step counts.
    pub fn destinations(&self) -> Vec<(Room, u8)> {
        self.view.destinations()
    }
}

/// Decision interface shared by the detective and stand-in policies.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    fn choose_destination(&mut self, ctx: &PolicyContext) -> Option<Room>;

    /// `None` declines to assume this turn.
    fn choose_assumption(&mut self, ctx: &PolicyContext) -> Option<(Suspect, Weapon)>;

    /// `None` keeps playing.
    fn choose_accusation(&mut self, ctx: &PolicyContext) -> Option<Theory>;

    /// Picks which of several matching cards to show. Only asked of seats
    /// the game treats as human.
    fn choose_disproval(&mut self, ctx: &PolicyContext, candidates: &[Card]) -> Option<Card>;
}
