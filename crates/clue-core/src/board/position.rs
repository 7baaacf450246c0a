use super::graph::Landmark;
use crate::model::card::Room;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Start,
    InRoom(Room),
    /// Stranded between `from` and the committed room `toward`.
    InHallway {
        from: Landmark,
        toward: Room,
        travelled: u8,
    },
}

impl Position {
    pub const fn room(self) -> Option<Room> {
        match self {
            Position::InRoom(room) => Some(room),
            _ => None,
        }
    }

    pub const fn is_in_room(self) -> bool {
        matches!(self, Position::InRoom(_))
    }

    /// The landmark a token is standing on, if it is not in a hallway.
    pub const fn landmark(self) -> Option<Landmark> {
        match self {
            Position::Start => Some(Landmark::Start),
            Position::InRoom(room) => Some(Landmark::Room(room)),
            Position::InHallway { .. } => None,
        }
    }
}

/// A validated trip toward a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    from: Landmark,
    toward: Room,
    travelled: u8,
    total: u8,
}

impl Route {
    pub(crate) fn new(from: Landmark, toward: Room, travelled: u8, total: u8) -> Self {
        Self {
            from,
            toward,
            travelled: travelled.min(total),
            total,
        }
    }

    pub fn destination(&self) -> Room {
        self.toward
    }

    /// Steps still to cover before entering the room.
    pub fn remaining(&self) -> u8 {
        self.total - self.travelled
    }

    /// Where the token ends up after moving `roll` steps along this route.
    pub fn advance(&self, roll: u8) -> Position {
        if roll >= self.remaining() {
            Position::InRoom(self.toward)
        } else {
            Position::InHallway {
                from: self.from,
                toward: self.toward,
                travelled: self.travelled + roll,
            }
        }
    }
}
