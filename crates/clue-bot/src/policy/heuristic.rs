use super::{Policy, PolicyContext};
use crate::bot::{
    AccusationPlanner, AssumptionPlanner, BeliefView, BotContext, DetectiveParams, MovementPlanner,
};
use clue_core::board::Position;
use clue_core::model::assumption::Theory;
use clue_core::model::card::{Card, Room, Suspect, Weapon};
use clue_core::model::card_set::CardSet;
use tracing::{Level, event};

/// The detective: ranks candidates from its belief and commits when the
/// accusation planner is satisfied.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    params: DetectiveParams,
    visited: CardSet,
}

impl HeuristicPolicy {
    pub fn new(params: DetectiveParams) -> Self {
        Self {
            params,
            visited: CardSet::EMPTY,
        }
    }

    pub fn from_env() -> Self {
        Self::new(DetectiveParams::from_env())
    }

    pub fn params(&self) -> &DetectiveParams {
        &self.params
    }

    fn with_context<T>(
        &self,
        ctx: &PolicyContext,
        decide: impl FnOnce(&BotContext<'_>) -> T,
    ) -> Option<T> {
        let belief = ctx.belief()?;
        let hand = ctx.hand()?;
        let bot_ctx = BotContext::new(
            ctx.seat,
            hand,
            ctx.position(),
            ctx.view.board(),
            BeliefView::new(belief),
            &self.params,
            self.visited,
        );
        Some(decide(&bot_ctx))
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new(DetectiveParams::default())
    }
}

impl Policy for HeuristicPolicy {
    fn name(&self) -> &'static str {
        "detective"
    }

    fn choose_destination(&mut self, ctx: &PolicyContext) -> Option<Room> {
        let chosen = self
            .with_context(ctx, MovementPlanner::choose)
            .flatten()
            .or_else(|| ctx.destinations().first().map(|(room, _)| *room));
        if let Some(room) = chosen {
            log_decision(ctx, "destination", &room.to_string(), "movement_planner");
        }
        chosen
    }

    fn choose_assumption(&mut self, ctx: &PolicyContext) -> Option<(Suspect, Weapon)> {
        if let Position::InRoom(room) = ctx.position() {
            self.visited.insert(Card::Room(room));
        }
        let chosen = self.with_context(ctx, AssumptionPlanner::choose).flatten();
        let detail = chosen
            .map(|(suspect, weapon)| format!("{suspect} with the {weapon}"))
            .unwrap_or_else(|| "decline".to_string());
        log_decision(ctx, "assumption", &detail, "assumption_planner");
        chosen
    }

    fn choose_accusation(&mut self, ctx: &PolicyContext) -> Option<Theory> {
        let chosen = self.with_context(ctx, AccusationPlanner::choose).flatten();
        if let Some(theory) = chosen {
            let confirmed = ctx.belief().map(|belief| belief.confirmed_count()).unwrap_or(0);
            event!(
                target: "clue_bot::policy",
                Level::INFO,
                seat = ctx.seat.index(),
                turn = ctx.view.turn(),
                confirmed,
                theory = %theory,
                "accusing"
            );
        }
        chosen
    }

    /// Prefers a card already shown to someone, so nothing new leaks.
    fn choose_disproval(&mut self, ctx: &PolicyContext, candidates: &[Card]) -> Option<Card> {
        let hand = ctx.hand()?;
        let chosen = candidates
            .iter()
            .copied()
            .find(|card| hand.is_revealed(*card))
            .or_else(|| candidates.first().copied());
        if let Some(card) = chosen {
            log_decision(ctx, "disproval", &card.to_string(), "least_new_information");
        }
        chosen
    }
}

fn log_decision(ctx: &PolicyContext, decision: &str, choice: &str, reason: &str) {
    if !tracing::enabled!(target: "clue_bot::policy", Level::INFO) {
        return;
    }
    let open = ctx
        .belief()
        .map(|belief| BeliefView::new(belief).open_candidates())
        .unwrap_or(0);
    event!(
        target: "clue_bot::policy",
        Level::INFO,
        seat = ctx.seat.index(),
        turn = ctx.view.turn(),
        decision,
        choice,
        open_candidates = open,
        reason,
    );
}
