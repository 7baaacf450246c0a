use super::BotContext;
use clue_core::model::assumption::Theory;
use clue_core::model::category::Category;

pub struct AccusationPlanner;

impl AccusationPlanner {
    /// Commits to the top-ranked theory once enough categories are confirmed
    /// or every category is settled: confirmed, clearly ahead of its
    /// runner-up, or repeatedly named in assumptions nobody could disprove.
    pub fn choose(ctx: &BotContext<'_>) -> Option<Theory> {
        let view = ctx.belief;
        let params = ctx.params;
        let confirmed = view.confirmed_count();
        let settled = Category::ALL.iter().all(|category| {
            view.lead(*category).is_some_and(|lead| {
                lead.is_infinite()
                    || lead >= params.margin
                    || (params.irrefutable_settles > 0
                        && lead > 0.0
                        && view.irrefutable_touches(*category) >= params.irrefutable_settles)
            })
        });
        if confirmed < params.required_confirmed && !settled {
            return None;
        }

        let suspect = view.top(Category::Suspect)?.as_suspect()?;
        let weapon = view.top(Category::Weapon)?.as_weapon()?;
        let room = view.top(Category::Room)?.as_room()?;
        Some(Theory::new(suspect, weapon, room))
    }
}

#[cfg(test)]
mod tests {
    use super::AccusationPlanner;
    use crate::bot::{BeliefView, BotContext, DetectiveParams};
    use clue_core::belief::{BeliefState, SuspicionConfig};
    use clue_core::board::{Board, Position};
    use clue_core::model::assumption::{Assumption, Theory};
    use clue_core::model::card::{Card, Room, Suspect, Weapon};
    use clue_core::model::card_set::CardSet;
    use clue_core::model::category::Category;
    use clue_core::model::hand::Hand;
    use clue_core::model::seat::Seat;

    fn decide(belief: &BeliefState, params: DetectiveParams) -> Option<Theory> {
        let hand = Hand::new();
        let board = Board::classic();
        let ctx = BotContext::new(
            belief.perspective(),
            &hand,
            Position::Start,
            &board,
            BeliefView::new(belief),
            &params,
            CardSet::EMPTY,
        );
        AccusationPlanner::choose(&ctx)
    }

    #[test]
    fn waits_without_confirmations() {
        let belief =
            BeliefState::new(Seat::new(1), &Hand::new(), vec![6, 6, 6], SuspicionConfig::default());
        assert_eq!(decide(&belief, DetectiveParams::default()), None);
    }

    #[test]
    fn accuses_after_own_irrefutable_assumption() {
        let mut belief =
            BeliefState::new(Seat::new(1), &Hand::new(), vec![6, 6, 6], SuspicionConfig::default());
        let theory = Theory::new(Suspect::White, Weapon::LeadPipe, Room::Library);
        belief.observe_irrefutable(&Assumption::new(Seat::new(1), theory));
        assert_eq!(decide(&belief, DetectiveParams::cautious()), Some(theory));
    }

    #[test]
    fn wide_margins_settle_unconfirmed_categories() {
        let mut belief =
            BeliefState::new(Seat::new(0), &Hand::new(), vec![6, 6, 6], SuspicionConfig::default());
        let theory = Theory::new(Suspect::Plum, Weapon::Rope, Room::Lounge);
        for _ in 0..2 {
            belief.observe_irrefutable(&Assumption::new(Seat::new(2), theory));
        }
        assert_eq!(decide(&belief, DetectiveParams::cautious()), None);
        assert_eq!(decide(&belief, DetectiveParams::default()), Some(theory));
        assert!(belief.is_candidate(Card::Room(Room::Lounge)));
    }

    #[test]
    fn repeated_irrefutable_guesses_settle_without_a_margin() {
        let mut belief =
            BeliefState::new(Seat::new(0), &Hand::new(), vec![6, 6, 6], SuspicionConfig::default());
        let theory = Theory::new(Suspect::Green, Weapon::Knife, Room::Kitchen);
        let params = DetectiveParams::cautious().with_irrefutable_settles(2);

        belief.observe_irrefutable(&Assumption::new(Seat::new(2), theory));
        assert_eq!(decide(&belief, params), None);

        belief.observe_irrefutable(&Assumption::new(Seat::new(2), theory));
        assert_eq!(belief.irrefutable_touches(Category::Room), 2);
        assert_eq!(decide(&belief, params), Some(theory));
        assert_eq!(decide(&belief, DetectiveParams::cautious()), None);
    }
}
