use super::BotContext;
use clue_core::model::card::{Suspect, Weapon};
use clue_core::model::category::Category;

pub struct AssumptionPlanner;

impl AssumptionPlanner {
    /// Names the best-ranked suspect and weapon. `None` when a category has
    /// no candidate left, which only happens with inconsistent input.
    pub fn choose(ctx: &BotContext<'_>) -> Option<(Suspect, Weapon)> {
        let suspect = ctx.belief.top(Category::Suspect)?.as_suspect()?;
        let weapon = ctx.belief.top(Category::Weapon)?.as_weapon()?;
        Some((suspect, weapon))
    }
}

#[cfg(test)]
mod tests {
    use super::AssumptionPlanner;
    use crate::bot::{BeliefView, BotContext, DetectiveParams};
    use clue_core::belief::{BeliefState, SuspicionConfig};
    use clue_core::board::{Board, Position};
    use clue_core::model::assumption::{Assumption, Theory};
    use clue_core::model::card::{Card, Room, Suspect, Weapon};
    use clue_core::model::card_set::CardSet;
    use clue_core::model::hand::Hand;
    use clue_core::model::seat::Seat;

    #[test]
    fn names_heaviest_unheld_cards() {
        let hand = Hand::with_cards([Card::Suspect(Suspect::Green)]);
        let mut belief =
            BeliefState::new(Seat::new(0), &hand, vec![6, 6, 6], SuspicionConfig::default());
        belief.observe_assumption(&Assumption::new(
            Seat::new(2),
            Theory::new(Suspect::Green, Weapon::Revolver, Room::Hall),
        ));
        belief.remove_card(Card::Suspect(Suspect::Scarlet));

        let board = Board::classic();
        let params = DetectiveParams::default();
        let ctx = BotContext::new(
            Seat::new(0),
            &hand,
            Position::InRoom(Room::Hall),
            &board,
            BeliefView::new(&belief),
            &params,
            CardSet::EMPTY,
        );
        assert_eq!(
            AssumptionPlanner::choose(&ctx),
            Some((Suspect::Mustard, Weapon::Revolver))
        );
    }
}
