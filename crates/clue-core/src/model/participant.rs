use crate::board::Position;
use crate::model::card::Room;
use crate::model::hand::Hand;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorMode {
    Human,
    Automated,
}

impl BehaviorMode {
    pub const fn is_automated(self) -> bool {
        matches!(self, BehaviorMode::Automated)
    }
}

/// Per-seat setup supplied by the driver, in seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantConfig {
    pub mode: BehaviorMode,
    /// Room the token starts in; `None` starts in the shared start area.
    #[serde(default)]
    pub start: Option<Room>,
}

impl ParticipantConfig {
    pub const fn human() -> Self {
        Self {
            mode: BehaviorMode::Human,
            start: None,
        }
    }

    pub const fn automated() -> Self {
        Self {
            mode: BehaviorMode::Automated,
            start: None,
        }
    }

    pub const fn starting_in(mut self, room: Room) -> Self {
        self.start = Some(room);
        self
    }

    /// The reference table: one human at seat 0, automated opponents after.
    pub fn reference_table(count: usize) -> Vec<Self> {
        (0..count)
            .map(|seat| if seat == 0 { Self::human() } else { Self::automated() })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    seat: Seat,
    mode: BehaviorMode,
    hand: Hand,
    position: Position,
    eliminated: bool,
}

impl Participant {
    pub fn new(seat: Seat, config: ParticipantConfig, hand: Hand) -> Self {
        let position = config.start.map(Position::InRoom).unwrap_or(Position::Start);
        Self {
            seat,
            mode: config.mode,
            hand,
            position,
            eliminated: false,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn mode(&self) -> BehaviorMode {
        self.mode
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// True once a wrong accusation removed this seat from turn order.
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{BehaviorMode, Participant, ParticipantConfig};
    use crate::board::Position;
    use crate::model::card::Room;
    use crate::model::hand::Hand;
    use crate::model::seat::Seat;

    #[test]
    fn reference_table_has_one_human_first() {
        let table = ParticipantConfig::reference_table(3);
        assert_eq!(table[0].mode, BehaviorMode::Human);
        assert!(table[1..].iter().all(|c| c.mode.is_automated()));
    }

    #[test]
    fn start_room_sets_initial_position() {
        let config = ParticipantConfig::automated().starting_in(Room::Study);
        let participant = Participant::new(Seat::new(1), config, Hand::new());
        assert_eq!(participant.position(), Position::InRoom(Room::Study));
        let default = Participant::new(Seat::new(0), ParticipantConfig::human(), Hand::new());
        assert_eq!(default.position(), Position::Start);
    }
}
