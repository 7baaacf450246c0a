use crate::model::card::Room;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const NODE_COUNT: usize = 10;
const START_NODE: usize = 9;

/// A node of the movement graph: the shared start area or a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landmark {
    Start,
    Room(Room),
}

impl Landmark {
    const fn node(self) -> usize {
        match self {
            Landmark::Start => START_NODE,
            Landmark::Room(room) => room.index(),
        }
    }
}

/// Hallway step counts between doors. Secret passages cost a single step.
const CLASSIC_HALLWAYS: [(Landmark, Landmark, u8); 20] = [
    (Landmark::Room(Room::Study), Landmark::Room(Room::Hall), 4),
    (Landmark::Room(Room::Study), Landmark::Room(Room::Library), 4),
    (Landmark::Room(Room::Hall), Landmark::Room(Room::Lounge), 4),
    (Landmark::Room(Room::Hall), Landmark::Room(Room::Library), 7),
    (Landmark::Room(Room::Hall), Landmark::Room(Room::DiningRoom), 8),
    (Landmark::Room(Room::Lounge), Landmark::Room(Room::DiningRoom), 4),
    (Landmark::Room(Room::Library), Landmark::Room(Room::BilliardRoom), 4),
    (Landmark::Room(Room::BilliardRoom), Landmark::Room(Room::Conservatory), 4),
    (Landmark::Room(Room::BilliardRoom), Landmark::Room(Room::Ballroom), 6),
    (Landmark::Room(Room::Conservatory), Landmark::Room(Room::Ballroom), 4),
    (Landmark::Room(Room::Ballroom), Landmark::Room(Room::Kitchen), 4),
    (Landmark::Room(Room::Ballroom), Landmark::Room(Room::DiningRoom), 7),
    (Landmark::Room(Room::Kitchen), Landmark::Room(Room::DiningRoom), 6),
    (Landmark::Room(Room::Study), Landmark::Room(Room::Kitchen), 1),
    (Landmark::Room(Room::Lounge), Landmark::Room(Room::Conservatory), 1),
    (Landmark::Start, Landmark::Room(Room::Hall), 6),
    (Landmark::Start, Landmark::Room(Room::Library), 6),
    (Landmark::Start, Landmark::Room(Room::DiningRoom), 6),
    (Landmark::Start, Landmark::Room(Room::Ballroom), 6),
    (Landmark::Start, Landmark::Room(Room::BilliardRoom), 7),
];

/// Shortest hallway distances between landmarks, computed once.
#[derive(Debug, Clone)]
pub struct RoomGraph {
    distances: [[Option<u8>; NODE_COUNT]; NODE_COUNT],
}

impl RoomGraph {
    pub fn classic() -> Self {
        Self::new(&CLASSIC_HALLWAYS)
    }

    pub fn new(hallways: &[(Landmark, Landmark, u8)]) -> Self {
        let mut adjacency = vec![Vec::new(); NODE_COUNT];
        for &(a, b, steps) in hallways {
            if a == b {
                continue;
            }
            let steps = steps.max(1);
            adjacency[a.node()].push((b.node(), steps));
            adjacency[b.node()].push((a.node(), steps));
        }
        let mut distances = [[None; NODE_COUNT]; NODE_COUNT];
        for (source, row) in distances.iter_mut().enumerate() {
            *row = shortest_paths(&adjacency, source);
        }
        Self { distances }
    }

    /// Shortest hallway distance, `None` when the graph is disconnected.
    pub fn distance(&self, from: Landmark, to: Landmark) -> Option<u8> {
        self.distances[from.node()][to.node()]
    }
}

fn shortest_paths(adjacency: &[Vec<(usize, u8)>], source: usize) -> [Option<u8>; NODE_COUNT] {
    let mut best = [u32::MAX; NODE_COUNT];
    let mut heap = BinaryHeap::new();
    best[source] = 0;
    heap.push(Reverse((0u32, source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost > best[node] {
            continue;
        }
        for &(next, steps) in &adjacency[node] {
            let candidate = cost + steps as u32;
            if candidate < best[next] {
                best[next] = candidate;
                heap.push(Reverse((candidate, next)));
            }
        }
    }

    let mut out = [None; NODE_COUNT];
    for (slot, cost) in out.iter_mut().zip(best) {
        if cost != u32::MAX {
            *slot = Some(cost.min(u8::MAX as u32) as u8);
        }
    }
    out
}
