use crate::model::card::Card;
use crate::model::category::Category;
use serde::{Deserialize, Serialize};

/// Bitmask over catalog indices. Deserializing rejects bits past the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CardSet(u32);

impl CardSet {
    pub const EMPTY: CardSet = CardSet(0);
    pub const FULL: CardSet = CardSet((1 << Card::COUNT) - 1);

    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        cards.into_iter().fold(Self::EMPTY, |set, card| set.with(card))
    }

    pub fn of_category(category: Category) -> Self {
        Self::from_cards(Card::of_category(category))
    }

    pub const fn contains(self, card: Card) -> bool {
        self.0 & (1 << card.to_id()) != 0
    }

    pub const fn with(self, card: Card) -> Self {
        Self(self.0 | (1 << card.to_id()))
    }

    pub const fn without(self, card: Card) -> Self {
        Self(self.0 & !(1 << card.to_id()))
    }

    pub fn insert(&mut self, card: Card) -> bool {
        let fresh = !self.contains(card);
        *self = self.with(card);
        fresh
    }

    pub const fn union(self, other: CardSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: CardSet) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::FULL.0)
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Cards in catalog order.
    pub fn iter(self) -> impl Iterator<Item = Card> {
        Card::all().filter(move |card| self.contains(*card))
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self::from_cards(iter)
    }
}

impl TryFrom<u32> for CardSet {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        if bits & !Self::FULL.0 != 0 {
            return Err(format!("card set {bits:#x} names cards outside the catalog"));
        }
        Ok(Self(bits))
    }
}

impl From<CardSet> for u32 {
    fn from(set: CardSet) -> Self {
        set.0
    }
}
