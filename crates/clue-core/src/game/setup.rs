use crate::game::error::GameError;
use crate::model::assumption::Theory;
use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::category::Category;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::seat::MIN_SEATS;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Hands for every seat plus the withheld solution. A deserialized deal goes
/// through the same partition check as [`Deal::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDeal")]
pub struct Deal {
    hands: Vec<Hand>,
    solution: Theory,
}

#[derive(Deserialize)]
struct RawDeal {
    hands: Vec<Hand>,
    solution: Theory,
}

impl TryFrom<RawDeal> for Deal {
    type Error = GameError;

    fn try_from(raw: RawDeal) -> Result<Self, Self::Error> {
        Self::from_parts(raw.hands, raw.solution)
    }
}

impl Deal {
    /// Assembles a fixed deal, checking that the hands and the solution
    /// partition the catalog.
    pub fn from_parts(hands: Vec<Hand>, solution: Theory) -> Result<Self, GameError> {
        let mut seen = CardSet::from_cards(solution.cards());
        for (index, hand) in hands.iter().enumerate() {
            let overlap = seen.intersection(hand.card_set());
            if let Some(card) = overlap.iter().next() {
                return Err(GameError::InvalidDeal(format!(
                    "{card} is dealt twice (seen again in hand {index})"
                )));
            }
            seen = seen.union(hand.card_set());
        }
        if let Some(card) = seen.complement().iter().next() {
            return Err(GameError::InvalidDeal(format!("{card} is not dealt")));
        }
        Ok(Self { hands, solution })
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn solution(&self) -> &Theory {
        &self.solution
    }

    pub fn participant_count(&self) -> usize {
        self.hands.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<Hand>, Theory) {
        (self.hands, self.solution)
    }
}

/// Shuffles the catalog with a generator seeded from `seed` and deals it.
pub fn deal_game(participant_count: usize, seed: u64) -> Result<Deal, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    deal_with_rng(participant_count, &mut rng)
}

/// Withdraws the first suspect, weapon and room of a shuffled catalog into
/// the solution and deals the rest round-robin from seat 0, so remainder
/// cards land on the earliest seats.
pub fn deal_with_rng<R: rand::Rng + ?Sized>(
    participant_count: usize,
    rng: &mut R,
) -> Result<Deal, GameError> {
    if participant_count < MIN_SEATS {
        return Err(GameError::InvalidParticipantCount {
            count: participant_count,
            min: MIN_SEATS,
            max: Card::COUNT - Category::ALL.len(),
        });
    }

    let deck = Deck::shuffled(rng);
    let mut picks: [Option<Card>; 3] = [None; 3];
    let mut rest = Vec::with_capacity(Card::COUNT - 3);
    for card in deck.into_cards() {
        let slot = &mut picks[card.category().index()];
        if slot.is_none() {
            *slot = Some(card);
        } else {
            rest.push(card);
        }
    }

    let solution = match picks {
        [Some(Card::Suspect(suspect)), Some(Card::Weapon(weapon)), Some(Card::Room(room))] => {
            Theory::new(suspect, weapon, room)
        }
        _ => return Err(GameError::InvalidDeal("catalog lacks a category".to_string())),
    };

    if rest.len() < participant_count {
        return Err(GameError::InsufficientCards {
            participants: participant_count,
            remaining: rest.len(),
        });
    }

    let mut hands = vec![Hand::new(); participant_count];
    for (index, card) in rest.into_iter().enumerate() {
        hands[index % participant_count].add(card);
    }

    Ok(Deal { hands, solution })
}
