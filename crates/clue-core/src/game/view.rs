use crate::belief::BeliefState;
use crate::board::{Board, Position};
use crate::game::phase::{GameOutcome, Phase, PhaseKind};
use crate::game::state::GameState;
use crate::model::card::{Card, Room};
use crate::model::hand::Hand;
use crate::model::participant::Participant;
use crate::model::seat::Seat;
use core::fmt;

/// The table as one seat sees it: public state plus that seat's own hand
/// and belief. Other hands, the seed and the solution stay behind it.
#[derive(Clone, Copy)]
pub struct SeatView<'a> {
    seat: Seat,
    game: &'a GameState,
}

impl<'a> SeatView<'a> {
    pub(crate) fn new(seat: Seat, game: &'a GameState) -> Self {
        Self { seat, game }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn hand(&self) -> Option<&'a Hand> {
        self.game.participant(self.seat).map(Participant::hand)
    }

    pub fn belief(&self) -> Option<&'a BeliefState> {
        self.game.belief(self.seat)
    }

    pub fn position(&self) -> Position {
        self.position_of(self.seat).unwrap_or(Position::Start)
    }

    /// Tokens sit on the open board, so every seat's position is public.
    pub fn position_of(&self, seat: Seat) -> Option<Position> {
        self.game.position(seat)
    }

    pub fn hand_size(&self, seat: Seat) -> Option<usize> {
        self.game.participant(seat).map(|participant| participant.hand().len())
    }

    pub fn is_eliminated(&self, seat: Seat) -> bool {
        self.game
            .participant(seat)
            .is_some_and(Participant::is_eliminated)
    }

    pub fn board(&self) -> &'a Board {
        self.game.board()
    }

    /// Rooms reachable from this seat's position with their remaining steps.
    pub fn destinations(&self) -> Vec<(Room, u8)> {
        self.board().destinations(self.position())
    }

    pub fn seat_count(&self) -> usize {
        self.game.seat_count()
    }

    pub fn turn(&self) -> u32 {
        self.game.turn()
    }

    pub fn current_seat(&self) -> Option<Seat> {
        self.game.current_seat()
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.game.phase().kind()
    }

    /// Matching cards this seat may show, only while it is the pending
    /// disprover.
    pub fn disproval_candidates(&self) -> Option<&'a [Card]> {
        match self.game.phase() {
            Phase::AwaitingDisproval {
                disprover,
                candidates,
                ..
            } if *disprover == self.seat => Some(candidates.as_slice()),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&'a GameOutcome> {
        self.game.outcome()
    }
}

impl fmt::Debug for SeatView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeatView")
            .field("seat", &self.seat)
            .field("turn", &self.game.turn())
            .field("phase", &self.game.phase().kind())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::game::phase::{Phase, PhaseKind};
    use crate::game::state::GameState;
    use crate::model::card::{Room, Suspect, Weapon};
    use crate::model::participant::ParticipantConfig;
    use crate::model::seat::Seat;

    #[test]
    fn view_shows_only_its_own_hand() {
        let game = GameState::new(ParticipantConfig::reference_table(3), 4).unwrap();
        for index in 0..3 {
            let seat = Seat::new(index);
            let view = game.seat_view(seat);
            assert_eq!(view.seat(), seat);
            assert_eq!(view.hand(), game.participant(seat).map(|p| p.hand()));
            assert_eq!(view.belief().is_some(), game.belief(seat).is_some());
            assert_eq!(view.hand_size(Seat::new(0)), Some(6));
        }
        assert_eq!(game.seat_view(Seat::new(1)).hand_size(Seat::new(7)), None);
    }

    #[test]
    fn debug_output_names_no_cards() {
        let game = GameState::new(ParticipantConfig::reference_table(3), 4).unwrap();
        let text = format!("{:?}", game.seat_view(Seat::new(0)));
        assert!(text.starts_with("SeatView"));
        assert!(!text.contains("cards"));
        assert!(!text.contains("hand"));
    }

    #[test]
    fn candidates_are_shown_to_the_disprover_alone() {
        let configs = vec![
            ParticipantConfig::automated().starting_in(Room::Study),
            ParticipantConfig::human(),
            ParticipantConfig::human(),
        ];
        for seed in 0..64 {
            let mut game = GameState::new(configs.clone(), seed).unwrap();
            game.start_turn().unwrap();
            if game.submit_destination(Room::Kitchen).is_err()
                || game.phase().kind() != PhaseKind::AwaitingAssumption
            {
                continue;
            }
            game.submit_assumption(Suspect::Plum, Weapon::Rope).unwrap();
            let Phase::AwaitingDisproval {
                disprover,
                candidates,
                ..
            } = game.phase().clone()
            else {
                continue;
            };
            for index in 0..3 {
                let seat = Seat::new(index);
                let shown = game.seat_view(seat).disproval_candidates();
                if seat == disprover {
                    assert_eq!(shown, Some(candidates.as_slice()));
                } else {
                    assert_eq!(shown, None);
                }
                assert_eq!(game.seat_view(seat).phase_kind(), PhaseKind::AwaitingDisproval);
            }
            return;
        }
        panic!("no seed produced a human disproval choice");
    }
}
