use crate::model::assumption::Theory;
use crate::model::card::Card;
use crate::model::card_set::CardSet;
use serde::{Deserialize, Serialize};

/// Cards dealt to one seat. The hand never shrinks; cards shown during a
/// disproval are only flagged as revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHand")]
pub struct Hand {
    cards: CardSet,
    revealed: CardSet,
}

#[derive(Deserialize)]
struct RawHand {
    cards: CardSet,
    #[serde(default)]
    revealed: CardSet,
}

impl TryFrom<RawHand> for Hand {
    type Error = String;

    fn try_from(raw: RawHand) -> Result<Self, Self::Error> {
        if raw.revealed.intersection(raw.cards) != raw.revealed {
            return Err("a hand reveals cards it does not hold".to_string());
        }
        Ok(Self {
            cards: raw.cards,
            revealed: raw.revealed,
        })
    }
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        Self {
            cards: CardSet::from_cards(cards),
            revealed: CardSet::EMPTY,
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.insert(card);
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Card> {
        self.cards.iter()
    }

    pub fn card_set(&self) -> CardSet {
        self.cards
    }

    /// Cards from `theory` held here, in suspect, weapon, room order.
    pub fn matching(&self, theory: &Theory) -> Vec<Card> {
        theory
            .cards()
            .into_iter()
            .filter(|card| self.contains(*card))
            .collect()
    }

    /// Flags a held card as shown to another seat. Returns false when the
    /// card is not in this hand.
    pub fn mark_revealed(&mut self, card: Card) -> bool {
        if !self.contains(card) {
            return false;
        }
        self.revealed.insert(card);
        true
    }

    pub fn is_revealed(&self, card: Card) -> bool {
        self.revealed.contains(card)
    }
}
