use crate::game::error::GameError;
use crate::model::card::{Card, Room, Suspect, Weapon};
use crate::model::category::Category;
use crate::model::seat::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One suspect, one weapon and one room. Used for the hidden solution,
/// for assumptions and for accusations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Theory {
    pub suspect: Suspect,
    pub weapon: Weapon,
    pub room: Room,
}

impl Theory {
    pub const fn new(suspect: Suspect, weapon: Weapon, room: Room) -> Self {
        Self {
            suspect,
            weapon,
            room,
        }
    }

    /// Builds a theory from card names, rejecting names outside the catalog.
    pub fn parse(suspect: &str, weapon: &str, room: &str) -> Result<Self, GameError> {
        Ok(Self::new(suspect.parse()?, weapon.parse()?, room.parse()?))
    }

    /// The three cards in suspect, weapon, room order.
    pub const fn cards(&self) -> [Card; 3] {
        [
            Card::Suspect(self.suspect),
            Card::Weapon(self.weapon),
            Card::Room(self.room),
        ]
    }

    pub const fn card(&self, category: Category) -> Card {
        match category {
            Category::Suspect => Card::Suspect(self.suspect),
            Category::Weapon => Card::Weapon(self.weapon),
            Category::Room => Card::Room(self.room),
        }
    }

    pub fn names(&self, card: Card) -> bool {
        self.cards().contains(&card)
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with the {} in the {}", self.suspect, self.weapon, self.room)
    }
}

/// A theory put to the table by the seat standing in `theory.room`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assumption {
    pub asserter: Seat,
    pub theory: Theory,
}

impl Assumption {
    pub const fn new(asserter: Seat, theory: Theory) -> Self {
        Self { asserter, theory }
    }

    pub const fn cards(&self) -> [Card; 3] {
        self.theory.cards()
    }
}
