use super::{Policy, PolicyContext};
use clue_core::model::assumption::Theory;
use clue_core::model::card::{Card, Room, Suspect, Weapon};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Seeded stand-in for a human seat in automated runs.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
    accusation_chance: f64,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            accusation_chance: 0.0,
        }
    }

    /// Chance per decision point of accusing a random theory.
    pub fn with_accusation_chance(mut self, chance: f64) -> Self {
        self.accusation_chance = chance.clamp(0.0, 1.0);
        self
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_destination(&mut self, ctx: &PolicyContext) -> Option<Room> {
        ctx.destinations()
            .choose(&mut self.rng)
            .map(|(room, _)| *room)
    }

    fn choose_assumption(&mut self, _ctx: &PolicyContext) -> Option<(Suspect, Weapon)> {
        let suspect = *Suspect::ALL.choose(&mut self.rng)?;
        let weapon = *Weapon::ALL.choose(&mut self.rng)?;
        Some((suspect, weapon))
    }

    fn choose_accusation(&mut self, _ctx: &PolicyContext) -> Option<Theory> {
        if self.accusation_chance <= 0.0 || !self.rng.gen_bool(self.accusation_chance) {
            return None;
        }
        Some(Theory::new(
            *Suspect::ALL.choose(&mut self.rng)?,
            *Weapon::ALL.choose(&mut self.rng)?,
            *Room::ALL.choose(&mut self.rng)?,
        ))
    }

    fn choose_disproval(&mut self, _ctx: &PolicyContext, candidates: &[Card]) -> Option<Card> {
        candidates.choose(&mut self.rng).copied()
    }
}
