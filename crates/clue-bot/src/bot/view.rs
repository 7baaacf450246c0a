use clue_core::belief::BeliefState;
use clue_core::model::card::{Card, Room};
use clue_core::model::category::Category;

/// Read-only ranking over a seat's [`BeliefState`] used by the planners.
#[derive(Debug, Clone, Copy)]
pub struct BeliefView<'a> {
    belief: &'a BeliefState,
}

impl<'a> BeliefView<'a> {
    pub fn new(belief: &'a BeliefState) -> Self {
        Self { belief }
    }

    pub fn belief(&self) -> &'a BeliefState {
        self.belief
    }

    /// Candidates of `category`, best first: a confirmed card outranks
    /// everything, then weight descending, then catalog order.
    pub fn ranked(&self, category: Category) -> Vec<(Card, f32)> {
        let mut ranked: Vec<(Card, f32)> = self
            .belief
            .candidates(category)
            .map(|card| (card, self.belief.weight(card)))
            .collect();
        ranked.sort_by(|(a, wa), (b, wb)| {
            self.belief
                .is_confirmed(*b)
                .cmp(&self.belief.is_confirmed(*a))
                .then(wb.total_cmp(wa))
                .then(a.to_id().cmp(&b.to_id()))
        });
        ranked
    }

    pub fn top(&self, category: Category) -> Option<Card> {
        self.ranked(category).first().map(|(card, _)| *card)
    }

    /// How far the top candidate leads the runner-up. Infinite once the
    /// category is settled by deduction.
    pub fn lead(&self, category: Category) -> Option<f32> {
        if self.belief.confirmed(category).is_some() {
            return Some(f32::INFINITY);
        }
        match self.ranked(category).as_slice() {
            [] => None,
            [_] => Some(f32::INFINITY),
            [(_, first), (_, second), ..] => Some(first - second),
        }
    }

    pub fn confirmed_count(&self) -> usize {
        self.belief.confirmed_count()
    }

    /// Irrefutable assumptions by other seats that named this category.
    pub fn irrefutable_touches(&self, category: Category) -> u32 {
        self.belief.irrefutable_touches(category)
    }

    /// Worth of standing in `room`: zero once it is known to be held.
    pub fn room_suspicion(&self, room: Room) -> f32 {
        let card = Card::Room(room);
        if self.belief.is_candidate(card) {
            1.0 + self.belief.weight(card)
        } else {
            0.0
        }
    }

    pub fn is_confirmed_room(&self, room: Room) -> bool {
        self.belief.is_confirmed(Card::Room(room))
    }

    /// Open candidates across all categories.
    pub fn open_candidates(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.belief.candidates(*category).count())
            .sum()
    }
}
