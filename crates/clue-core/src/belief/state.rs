//! Deterministic knowledge plus ordinal suspicion for one seat.

use super::config::SuspicionConfig;
use crate::model::assumption::Assumption;
use crate::model::card::Card;
use crate::model::card_set::CardSet;
use crate::model::category::Category;
use crate::model::hand::Hand;
use crate::model::seat::{Seat, SeatRing};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Where a card is known to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holder {
    Seat(Seat),
    /// Held by some other participant, exactly who is not known.
    Elsewhere,
    /// Confirmed as part of the hidden solution.
    Solution,
}

/// "`seat` holds at least one of `cards`", learned from a disproval this
/// seat only witnessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HoldsOneOf {
    seat: Seat,
    cards: CardSet,
}

/// Belief of one automated seat about every card outside its own hand.
///
/// Holders are only ever set once, so an eliminated card never becomes a
/// solution candidate again. Cards in the seat's own hand are tracked
/// separately and are never reported as eliminated.
#[derive(Debug, Clone)]
pub struct BeliefState {
    perspective: Seat,
    ring: SeatRing,
    config: SuspicionConfig,
    own: CardSet,
    hand_sizes: Vec<usize>,
    weights: [f32; Card::COUNT],
    holders: [Option<Holder>; Card::COUNT],
    lacks: Vec<CardSet>,
    constraints: Vec<HoldsOneOf>,
    irrefutable_touches: [u32; 3],
}

impl BeliefState {
    /// `hand_sizes` is public table information, indexed by seat.
    pub fn new(
        perspective: Seat,
        hand: &Hand,
        hand_sizes: Vec<usize>,
        config: SuspicionConfig,
    ) -> Self {
        let ring = SeatRing::new(hand_sizes.len());
        let own = hand.card_set();
        let lacks = ring
            .seats()
            .map(|seat| if seat == perspective { own.complement() } else { own })
            .collect();
        let mut belief = Self {
            perspective,
            ring,
            config,
            own,
            hand_sizes,
            weights: [0.0; Card::COUNT],
            holders: [None; Card::COUNT],
            lacks,
            constraints: Vec::new(),
            irrefutable_touches: [0; 3],
        };
        belief.resolve();
        belief
    }

    pub fn perspective(&self) -> Seat {
        self.perspective
    }

    pub fn config(&self) -> &SuspicionConfig {
        &self.config
    }

    pub fn own_hand(&self) -> CardSet {
        self.own
    }

    /// Suspicion that `card` is part of the solution. Zero for cards that
    /// cannot be.
    pub fn weight(&self, card: Card) -> f32 {
        self.weights[card.to_id() as usize]
    }

    /// Known location of `card`; cards in this seat's own hand report this seat.
    pub fn holder(&self, card: Card) -> Option<Holder> {
        if self.own.contains(card) {
            return Some(Holder::Seat(self.perspective));
        }
        self.holders[card.to_id() as usize]
    }

    /// Proven to be held by another participant.
    pub fn is_eliminated(&self, card: Card) -> bool {
        !self.own.contains(card)
            && matches!(
                self.holders[card.to_id() as usize],
                Some(Holder::Seat(_) | Holder::Elsewhere)
            )
    }

    pub fn is_confirmed(&self, card: Card) -> bool {
        matches!(self.holders[card.to_id() as usize], Some(Holder::Solution))
    }

    /// Still possibly part of the solution as far as this seat knows.
    pub fn is_candidate(&self, card: Card) -> bool {
        !self.own.contains(card)
            && matches!(self.holders[card.to_id() as usize], None | Some(Holder::Solution))
    }

    pub fn candidates(&self, category: Category) -> impl Iterator<Item = Card> + '_ {
        Card::of_category(category).filter(|card| self.is_candidate(*card))
    }

    pub fn confirmed(&self, category: Category) -> Option<Card> {
        Card::of_category(category).find(|card| self.is_confirmed(*card))
    }

    pub fn confirmed_count(&self) -> usize {
        Category::ALL
            .iter()
            .filter(|category| self.confirmed(**category).is_some())
            .count()
    }

    pub fn eliminated(&self) -> CardSet {
        Card::all().filter(|card| self.is_eliminated(*card)).collect()
    }

    /// Cards `seat` is known not to hold.
    pub fn lacks(&self, seat: Seat) -> CardSet {
        self.lacks.get(seat.index()).copied().unwrap_or(CardSet::EMPTY)
    }

    /// Irrefutable assumptions observed that named a card of `category`.
    pub fn irrefutable_touches(&self, category: Category) -> u32 {
        self.irrefutable_touches[category.index()]
    }

    pub fn open_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Every named card this seat does not hold becomes a little more suspect.
    /// Runs before anyone disproves, so later observations may take it back.
    pub fn observe_assumption(&mut self, assumption: &Assumption) {
        if assumption.asserter == self.perspective {
            return;
        }
        let step = self.config.assumption_weight;
        for card in assumption.cards() {
            if self.is_candidate(card) {
                self.weights[card.to_id() as usize] += step;
            }
        }
    }

    /// This seat asked and `disprover` privately showed it `card`.
    pub fn observe_revealed_card(&mut self, assumption: &Assumption, disprover: Seat, card: Card) {
        self.record_passed_seats(assumption, disprover);
        self.assign(card, Holder::Seat(disprover));
        self.resolve();
    }

    /// Someone else asked, `disprover` showed a card this seat did not see.
    pub fn observe_disproval_as_witness(&mut self, assumption: &Assumption, disprover: Seat) {
        if disprover == self.perspective {
            return;
        }
        self.record_passed_seats(assumption, disprover);
        let cards = CardSet::from_cards(assumption.cards());
        let discount = self.config.witness_discount;
        for card in cards.iter() {
            if self.is_candidate(card) && !self.is_confirmed(card) {
                let slot = &mut self.weights[card.to_id() as usize];
                *slot = (*slot - discount).max(0.0);
            }
        }
        if disprover != assumption.asserter {
            self.constraints.push(HoldsOneOf {
                seat: disprover,
                cards,
            });
        }
        self.resolve();
    }

    /// Nobody but the asserter could hold any named card.
    pub fn observe_irrefutable(&mut self, assumption: &Assumption) {
        let seats: Vec<Seat> = self.ring.clockwise_after(assumption.asserter).collect();
        for card in assumption.cards() {
            for &seat in &seats {
                self.mark_lacking(seat, card);
            }
        }

        if assumption.asserter == self.perspective {
            for card in assumption.cards() {
                self.assign(card, Holder::Solution);
            }
        } else {
            let boost = self.config.irrefutable_boost;
            for card in assumption.cards() {
                self.irrefutable_touches[card.category().index()] += 1;
                if self.is_candidate(card) {
                    self.weights[card.to_id() as usize] += boost;
                }
            }
        }
        self.resolve();
    }

    /// Marks `card` as held by someone else, e.g. once a human identifies the
    /// card they showed. Cards in this seat's own hand are left alone.
    pub fn remove_card(&mut self, card: Card) {
        self.assign(card, Holder::Elsewhere);
        self.resolve();
    }

    fn record_passed_seats(&mut self, assumption: &Assumption, disprover: Seat) {
        let passed: Vec<Seat> = self.ring.between(assumption.asserter, disprover).collect();
        for card in assumption.cards() {
            for &seat in &passed {
                self.mark_lacking(seat, card);
            }
        }
    }

    fn mark_lacking(&mut self, seat: Seat, card: Card) -> bool {
        if seat == self.perspective {
            return false;
        }
        match self.lacks.get_mut(seat.index()) {
            Some(set) => set.insert(card),
            None => false,
        }
    }

    /// Records a fact about `card`. The first fact wins, except that an
    /// unknown other holder may later be narrowed to a specific seat.
    fn assign(&mut self, card: Card, holder: Holder) -> bool {
        let id = card.to_id() as usize;
        if self.own.contains(card) {
            return false;
        }
        match (self.holders[id], holder) {
            (None, _) | (Some(Holder::Elsewhere), Holder::Seat(_)) => {}
            _ => return false,
        }
        if holder == Holder::Solution {
            if let Some(existing) = self.confirmed(card.category()) {
                event!(
                    target: "clue_core::belief",
                    Level::WARN,
                    perspective = self.perspective.index(),
                    card = %card,
                    existing = %existing,
                    "conflicting solution deduction ignored"
                );
                return false;
            }
        }

        self.holders[id] = Some(holder);
        match holder {
            Holder::Seat(owner) => {
                self.weights[id] = 0.0;
                for seat in self.ring.seats().filter(|seat| *seat != owner) {
                    self.mark_lacking(seat, card);
                }
            }
            Holder::Elsewhere => {
                self.weights[id] = 0.0;
            }
            Holder::Solution => {
                for seat in self.ring.seats() {
                    self.mark_lacking(seat, card);
                }
                event!(
                    target: "clue_core::belief",
                    Level::DEBUG,
                    perspective = self.perspective.index(),
                    card = %card,
                    "solution card deduced"
                );
            }
        }
        true
    }

    /// Not ruled out as a card in `seat`'s hand.
    fn could_hold(&self, seat: Seat, card: Card) -> bool {
        !self.own.contains(card)
            && !self.lacks(seat).contains(card)
            && matches!(
                self.holders[card.to_id() as usize],
                None | Some(Holder::Elsewhere)
            )
    }

    /// Propagates hard constraints until nothing new can be deduced.
    fn resolve(&mut self) {
        loop {
            let mut changed = false;
            changed |= self.close_universally_lacked();
            changed |= self.close_hand_sizes();
            changed |= self.close_constraints();
            changed |= self.close_categories();
            if !changed {
                break;
            }
        }
    }

    fn close_universally_lacked(&mut self) -> bool {
        let lacked_everywhere = self
            .lacks
            .iter()
            .fold(CardSet::FULL, |acc, set| acc.intersection(*set));
        let mut changed = false;
        for card in lacked_everywhere.iter() {
            changed |= self.assign(card, Holder::Solution);
        }
        changed
    }

    fn close_hand_sizes(&mut self) -> bool {
        let mut changed = false;
        for seat in self.ring.seats() {
            if seat == self.perspective {
                continue;
            }
            let size = self.hand_sizes.get(seat.index()).copied().unwrap_or(0);
            let known: CardSet = Card::all()
                .filter(|card| self.holders[card.to_id() as usize] == Some(Holder::Seat(seat)))
                .collect();
            let possible: CardSet = Card::all()
                .filter(|card| self.could_hold(seat, *card))
                .collect();

            if known.len() >= size {
                for card in possible.iter() {
                    changed |= self.mark_lacking(seat, card);
                }
            } else if !possible.is_empty() && known.len() + possible.len() == size {
                for card in possible.iter() {
                    changed |= self.assign(card, Holder::Seat(seat));
                }
            }
        }
        changed
    }

    fn close_constraints(&mut self) -> bool {
        let mut changed = false;
        let constraints = std::mem::take(&mut self.constraints);
        let mut open = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            let satisfied = constraint
                .cards
                .iter()
                .any(|card| self.holders[card.to_id() as usize] == Some(Holder::Seat(constraint.seat)));
            if satisfied {
                changed = true;
                continue;
            }
            let options: Vec<Card> = constraint
                .cards
                .iter()
                .filter(|card| self.could_hold(constraint.seat, *card))
                .collect();
            match options.as_slice() {
                [only] => {
                    changed |= self.assign(*only, Holder::Seat(constraint.seat));
                }
                [] => {
                    event!(
                        target: "clue_core::belief",
                        Level::WARN,
                        perspective = self.perspective.index(),
                        seat = constraint.seat.index(),
                        "disproval constraint has no remaining card"
                    );
                    changed = true;
                }
                _ => open.push(constraint),
            }
        }
        open.append(&mut self.constraints);
        self.constraints = open;
        changed
    }

    fn close_categories(&mut self) -> bool {
        let mut changed = false;
        for category in Category::ALL {
            if self.confirmed(category).is_some() {
                let rest: Vec<Card> = Card::of_category(category)
                    .filter(|card| {
                        !self.own.contains(*card) && self.holders[card.to_id() as usize].is_none()
                    })
                    .collect();
                for card in rest {
                    changed |= self.assign(card, Holder::Elsewhere);
                }
                continue;
            }
            let open: Vec<Card> = self.candidates(category).collect();
            if let [only] = open.as_slice() {
                changed |= self.assign(*only, Holder::Solution);
            }
        }
        changed
    }
}
