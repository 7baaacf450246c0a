use crate::game::phase::PhaseKind;
use crate::model::card::{Card, Room};
use crate::model::category::Category;
use crate::model::seat::Seat;
use core::fmt;
use thiserror::Error;

/// Every failure the core reports to its driver. None of them are fatal:
/// the game is left exactly as it was before the rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot move to the {destination}: {issue}")]
    InvalidDestination {
        destination: Room,
        issue: DestinationIssue,
    },
    #[error("{operation} is not accepted while {phase}")]
    InvalidPhaseTransition {
        operation: &'static str,
        phase: PhaseKind,
    },
    #[error("{remaining} cards remain after the solution is withdrawn, {participants} participants need at least one each")]
    InsufficientCards {
        participants: usize,
        remaining: usize,
    },
    #[error("unknown card reference '{reference}'{}", expected_suffix(.expected))]
    UnknownCardReference {
        reference: String,
        expected: Option<Category>,
    },
    #[error("{seat} cannot disprove with {card}")]
    IllegalDisprovalCard { seat: Seat, card: Card },
    #[error("a game needs between {min} and {max} participants, got {count}")]
    InvalidParticipantCount { count: usize, min: usize, max: usize },
    #[error("invalid deal: {0}")]
    InvalidDeal(String),
}

fn expected_suffix(expected: &Option<Category>) -> String {
    match expected {
        Some(category) => format!(" (expected a {category})"),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationIssue {
    AlreadyThere,
    Unreachable,
    CommittedElsewhere(Room),
}

impl fmt::Display for DestinationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationIssue::AlreadyThere => f.write_str("the token is already there"),
            DestinationIssue::Unreachable => f.write_str("no hallway leads there"),
            DestinationIssue::CommittedElsewhere(room) => {
                write!(f, "the token is still on its way to the {room}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DestinationIssue, GameError};
    use crate::game::phase::PhaseKind;
    use crate::model::card::Room;
    use crate::model::category::Category;

    #[test]
    fn messages_name_the_offending_input() {
        let err = GameError::InvalidDestination {
            destination: Room::Hall,
            issue: DestinationIssue::CommittedElsewhere(Room::Study),
        };
        assert_eq!(
            err.to_string(),
            "cannot move to the Hall: the token is still on its way to the Study"
        );

        let err = GameError::UnknownCardReference {
            reference: "Attic".to_string(),
            expected: Some(Category::Room),
        };
        assert_eq!(err.to_string(), "unknown card reference 'Attic' (expected a room)");

        let err = GameError::InvalidPhaseTransition {
            operation: "submit_accusation",
            phase: PhaseKind::Rolling,
        };
        assert!(err.to_string().contains("rolling"));
    }
}
