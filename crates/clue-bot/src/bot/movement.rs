use super::BotContext;
use clue_core::board::Position;
use clue_core::model::card::{Card, Room};

pub struct MovementPlanner;

impl MovementPlanner {
    /// Picks the reachable room with the best score. A token stranded in a
    /// hallway keeps heading for its committed room.
    pub fn choose(ctx: &BotContext<'_>) -> Option<Room> {
        if let Position::InHallway { toward, .. } = ctx.position {
            return Some(toward);
        }
        let mut best: Option<(Room, f32)> = None;
        for (room, steps) in ctx.board.destinations(ctx.position) {
            let score = Self::score(ctx, room, steps);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((room, score));
            }
        }
        best.map(|(room, _)| room)
    }

    pub fn score(ctx: &BotContext<'_>, room: Room, steps: u8) -> f32 {
        let params = ctx.params;
        let mut score = params.room_weight * ctx.belief.room_suspicion(room);
        if ctx.belief.is_confirmed_room(room) {
            score += params.confirmed_room_bonus;
        }
        if !ctx.visited.contains(Card::Room(room)) {
            score += params.unvisited_bonus;
        }
        score - params.distance_penalty * f32::from(steps)
    }
}
