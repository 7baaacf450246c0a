use crate::board::Position;
use crate::game::accusation::Verdict;
use crate::model::assumption::Theory;
use crate::model::card::{Card, Room};
use crate::model::participant::BehaviorMode;
use crate::model::seat::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Where the state machine stands, with the data the driver needs to
/// satisfy whatever input it is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    TurnStart,
    AwaitingMovementChoice {
        seat: Seat,
        mode: BehaviorMode,
    },
    Rolling {
        seat: Seat,
        destination: Room,
    },
    Resolved {
        seat: Seat,
        resolution: Resolution,
    },
    AwaitingAssumption {
        seat: Seat,
        room: Room,
    },
    /// A human disprover holds several matching cards and must pick one.
    AwaitingDisproval {
        asserter: Seat,
        disprover: Seat,
        theory: Theory,
        candidates: Vec<Card>,
    },
    AwaitingAccusation {
        seat: Seat,
    },
    GameOver(GameOutcome),
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::TurnStart => PhaseKind::TurnStart,
            Phase::AwaitingMovementChoice { .. } => PhaseKind::AwaitingMovementChoice,
            Phase::Rolling { .. } => PhaseKind::Rolling,
            Phase::Resolved { .. } => PhaseKind::Resolved,
            Phase::AwaitingAssumption { .. } => PhaseKind::AwaitingAssumption,
            Phase::AwaitingDisproval { .. } => PhaseKind::AwaitingDisproval,
            Phase::AwaitingAccusation { .. } => PhaseKind::AwaitingAccusation,
            Phase::GameOver(_) => PhaseKind::GameOver,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        match self {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    TurnStart,
    AwaitingMovementChoice,
    Rolling,
    Resolved,
    AwaitingAssumption,
    AwaitingDisproval,
    AwaitingAccusation,
    GameOver,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseKind::TurnStart => "starting a turn",
            PhaseKind::AwaitingMovementChoice => "awaiting a movement choice",
            PhaseKind::Rolling => "rolling",
            PhaseKind::Resolved => "resolving movement",
            PhaseKind::AwaitingAssumption => "awaiting an assumption",
            PhaseKind::AwaitingDisproval => "awaiting a disproval choice",
            PhaseKind::AwaitingAccusation => "awaiting an accusation",
            PhaseKind::GameOver => "the game is over",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    InRoom(Room),
    InHallway { toward: Room, remaining: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub seat: Seat,
    pub roll: u8,
    pub destination: Room,
    pub position: Position,
    pub resolution: Resolution,
}

impl RollOutcome {
    pub fn arrived(&self) -> bool {
        matches!(self.resolution, Resolution::InRoom(_))
    }
}

/// Terminal record. The solution is only ever published here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub accuser: Seat,
    pub accusation: Theory,
    pub verdict: Verdict,
    pub winner: Option<Seat>,
    pub solution: Theory,
    pub turn: u32,
}

#[cfg(test)]
mod tests {
    use super::{Phase, PhaseKind};
    use crate::model::participant::BehaviorMode;
    use crate::model::seat::Seat;

    #[test]
    fn kind_drops_payload() {
        let phase = Phase::AwaitingMovementChoice {
            seat: Seat::new(1),
            mode: BehaviorMode::Automated,
        };
        assert_eq!(phase.kind(), PhaseKind::AwaitingMovementChoice);
        assert!(!phase.is_over());
        assert!(phase.outcome().is_none());
    }
}
