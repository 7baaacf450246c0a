//! Abstract movement model: rooms joined by weighted hallways.
//!
//! - `graph`: landmark graph with all-pairs shortest path costs.
//! - `position`: where a token stands and how a roll moves it.

mod graph;
mod position;

pub use graph::{Landmark, RoomGraph};
pub use position::{Position, Route};

use crate::game::error::{DestinationIssue, GameError};
use crate::model::card::Room;

#[derive(Debug, Clone)]
pub struct Board {
    graph: RoomGraph,
}

impl Board {
    pub fn new(graph: RoomGraph) -> Self {
        Self { graph }
    }

    pub fn classic() -> Self {
        Self::new(RoomGraph::classic())
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    /// Validates a destination for a token at `position` and returns the
    /// route it would travel.
    pub fn route(&self, position: Position, destination: Room) -> Result<Route, GameError> {
        let invalid = |issue| GameError::InvalidDestination { destination, issue };
        match position {
            Position::InRoom(room) if room == destination => Err(invalid(DestinationIssue::AlreadyThere)),
            Position::InHallway {
                from,
                toward,
                travelled,
            } => {
                if toward != destination {
                    return Err(invalid(DestinationIssue::CommittedElsewhere(toward)));
                }
                let total = self
                    .graph
                    .distance(from, Landmark::Room(toward))
                    .ok_or_else(|| invalid(DestinationIssue::Unreachable))?;
                Ok(Route::new(from, destination, travelled, total))
            }
            Position::Start | Position::InRoom(_) => {
                let from = position.landmark().unwrap_or(Landmark::Start);
                let total = self
                    .graph
                    .distance(from, Landmark::Room(destination))
                    .ok_or_else(|| invalid(DestinationIssue::Unreachable))?;
                Ok(Route::new(from, destination, 0, total))
            }
        }
    }

    /// Rooms a token at `position` may head for, with the steps still to cover.
    pub fn destinations(&self, position: Position) -> Vec<(Room, u8)> {
        Room::ALL
            .iter()
            .copied()
            .filter_map(|room| {
                self.route(position, room)
                    .ok()
                    .map(|route| (room, route.remaining()))
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, Landmark, Position};
    use crate::game::error::{DestinationIssue, GameError};
    use crate::model::card::Room;

    #[test]
    fn current_room_is_not_a_destination() {
        let board = Board::classic();
        let err = board
            .route(Position::InRoom(Room::Hall), Room::Hall)
            .expect_err("same room");
        assert!(matches!(
            err,
            GameError::InvalidDestination {
                issue: DestinationIssue::AlreadyThere,
                ..
            }
        ));
    }

    #[test]
    fn hallway_tokens_keep_their_destination() {
        let board = Board::classic();
        let position = Position::InHallway {
            from: Landmark::Room(Room::Hall),
            toward: Room::DiningRoom,
            travelled: 3,
        };
        assert!(board.route(position, Room::DiningRoom).is_ok());
        let err = board.route(position, Room::Lounge).expect_err("committed");
        assert!(matches!(
            err,
            GameError::InvalidDestination {
                issue: DestinationIssue::CommittedElsewhere(Room::DiningRoom),
                ..
            }
        ));
        assert_eq!(board.destinations(position).len(), 1);
    }

    #[test]
    fn every_room_is_reachable_from_start() {
        let board = Board::classic();
        assert_eq!(board.destinations(Position::Start).len(), Room::ALL.len());
        assert_eq!(board.destinations(Position::InRoom(Room::Study)).len(), 8);
    }
}
