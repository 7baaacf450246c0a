use crate::game::error::GameError;
use crate::model::category::Category;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suspect {
    Scarlet = 0,
    Mustard = 1,
    White = 2,
    Green = 3,
    Peacock = 4,
    Plum = 5,
}

impl Suspect {
    pub const ALL: [Suspect; 6] = [
        Suspect::Scarlet,
        Suspect::Mustard,
        Suspect::White,
        Suspect::Green,
        Suspect::Peacock,
        Suspect::Plum,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suspect::Scarlet),
            1 => Some(Suspect::Mustard),
            2 => Some(Suspect::White),
            3 => Some(Suspect::Green),
            4 => Some(Suspect::Peacock),
            5 => Some(Suspect::Plum),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suspect::Scarlet => "Miss Scarlet",
            Suspect::Mustard => "Colonel Mustard",
            Suspect::White => "Mrs. White",
            Suspect::Green => "Mr. Green",
            Suspect::Peacock => "Mrs. Peacock",
            Suspect::Plum => "Professor Plum",
        }
    }

    const fn alias(self) -> &'static str {
        match self {
            Suspect::Scarlet => "scarlet",
            Suspect::Mustard => "mustard",
            Suspect::White => "white",
            Suspect::Green => "green",
            Suspect::Peacock => "peacock",
            Suspect::Plum => "plum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Weapon {
    Candlestick = 0,
    Knife = 1,
    LeadPipe = 2,
    Revolver = 3,
    Rope = 4,
    Wrench = 5,
}

impl Weapon {
    pub const ALL: [Weapon; 6] = [
        Weapon::Candlestick,
        Weapon::Knife,
        Weapon::LeadPipe,
        Weapon::Revolver,
        Weapon::Rope,
        Weapon::Wrench,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Weapon::Candlestick),
            1 => Some(Weapon::Knife),
            2 => Some(Weapon::LeadPipe),
            3 => Some(Weapon::Revolver),
            4 => Some(Weapon::Rope),
            5 => Some(Weapon::Wrench),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Weapon::Candlestick => "Candlestick",
            Weapon::Knife => "Knife",
            Weapon::LeadPipe => "Lead Pipe",
            Weapon::Revolver => "Revolver",
            Weapon::Rope => "Rope",
            Weapon::Wrench => "Wrench",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Room {
    Kitchen = 0,
    Ballroom = 1,
    Conservatory = 2,
    DiningRoom = 3,
    BilliardRoom = 4,
    Library = 5,
    Lounge = 6,
    Hall = 7,
    Study = 8,
}

impl Room {
    pub const ALL: [Room; 9] = [
        Room::Kitchen,
        Room::Ballroom,
        Room::Conservatory,
        Room::DiningRoom,
        Room::BilliardRoom,
        Room::Library,
        Room::Lounge,
        Room::Hall,
        Room::Study,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Room::Kitchen),
            1 => Some(Room::Ballroom),
            2 => Some(Room::Conservatory),
            3 => Some(Room::DiningRoom),
            4 => Some(Room::BilliardRoom),
            5 => Some(Room::Library),
            6 => Some(Room::Lounge),
            7 => Some(Room::Hall),
            8 => Some(Room::Study),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Room::Kitchen => "Kitchen",
            Room::Ballroom => "Ballroom",
            Room::Conservatory => "Conservatory",
            Room::DiningRoom => "Dining Room",
            Room::BilliardRoom => "Billiard Room",
            Room::Library => "Library",
            Room::Lounge => "Lounge",
            Room::Hall => "Hall",
            Room::Study => "Study",
        }
    }
}

/// One piece of evidence from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Suspect(Suspect),
    Weapon(Weapon),
    Room(Room),
}

impl Card {
    pub const COUNT: usize = 21;

    pub const fn category(self) -> Category {
        match self {
            Card::Suspect(_) => Category::Suspect,
            Card::Weapon(_) => Category::Weapon,
            Card::Room(_) => Category::Room,
        }
    }

    /// Catalog index in `0..21`; suspects first, then weapons, then rooms.
    pub const fn to_id(self) -> u8 {
        match self {
            Card::Suspect(s) => s as u8,
            Card::Weapon(w) => Category::Weapon.first_id() + w as u8,
            Card::Room(r) => Category::Room.first_id() + r as u8,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        let index = id as usize;
        if index < 6 {
            match Suspect::from_index(index) {
                Some(s) => Some(Card::Suspect(s)),
                None => None,
            }
        } else if index < 12 {
            match Weapon::from_index(index - 6) {
                Some(w) => Some(Card::Weapon(w)),
                None => None,
            }
        } else {
            match Room::from_index(index - 12) {
                Some(r) => Some(Card::Room(r)),
                None => None,
            }
        }
    }

    /// Every card in catalog order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::COUNT as u8).filter_map(Card::from_id)
    }

    /// Cards of a single category in catalog order.
    pub fn of_category(category: Category) -> impl Iterator<Item = Card> {
        let start = category.first_id();
        (start..start + category.len() as u8).filter_map(Card::from_id)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Card::Suspect(s) => s.name(),
            Card::Weapon(w) => w.name(),
            Card::Room(r) => r.name(),
        }
    }

    pub const fn as_suspect(self) -> Option<Suspect> {
        match self {
            Card::Suspect(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_weapon(self) -> Option<Weapon> {
        match self {
            Card::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub const fn as_room(self) -> Option<Room> {
        match self {
            Card::Room(r) => Some(r),
            _ => None,
        }
    }

    /// Parses a card name and requires it to belong to `expected`.
    pub fn parse_in(raw: &str, expected: Category) -> Result<Card, GameError> {
        let card = raw.parse::<Card>().map_err(|_| unknown(raw, Some(expected)))?;
        if card.category() != expected {
            return Err(unknown(raw, Some(expected)));
        }
        Ok(card)
    }
}

impl From<Suspect> for Card {
    fn from(value: Suspect) -> Self {
        Card::Suspect(value)
    }
}

impl From<Weapon> for Card {
    fn from(value: Weapon) -> Self {
        Card::Weapon(value)
    }
}

impl From<Room> for Card {
    fn from(value: Room) -> Self {
        Card::Room(value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Suspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        if key.is_empty() {
            return Err(unknown(raw, None));
        }
        if let Some(s) = Suspect::ALL
            .iter()
            .copied()
            .find(|s| normalize(s.name()) == key || s.alias() == key)
        {
            return Ok(Card::Suspect(s));
        }
        let weapon = match key.as_str() {
            "dagger" => Some(Weapon::Knife),
            "spanner" => Some(Weapon::Wrench),
            "pipe" => Some(Weapon::LeadPipe),
            _ => Weapon::ALL
                .iter()
                .copied()
                .find(|w| normalize(w.name()) == key),
        };
        if let Some(w) = weapon {
            return Ok(Card::Weapon(w));
        }
        Room::ALL
            .iter()
            .copied()
            .find(|r| normalize(r.name()) == key)
            .map(Card::Room)
            .ok_or_else(|| unknown(raw, None))
    }
}

impl FromStr for Suspect {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Card::parse_in(raw, Category::Suspect)?
            .as_suspect()
            .ok_or_else(|| unknown(raw, Some(Category::Suspect)))
    }
}

impl FromStr for Weapon {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Card::parse_in(raw, Category::Weapon)?
            .as_weapon()
            .ok_or_else(|| unknown(raw, Some(Category::Weapon)))
    }
}

impl FromStr for Room {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Card::parse_in(raw, Category::Room)?
            .as_room()
            .ok_or_else(|| unknown(raw, Some(Category::Room)))
    }
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn unknown(raw: &str, expected: Option<Category>) -> GameError {
    GameError::UnknownCardReference {
        reference: raw.trim().to_string(),
        expected,
    }
}
