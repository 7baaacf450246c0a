use core::fmt;
use serde::{Deserialize, Serialize};

/// Maximum table size supported by the catalog (18 dealt cards).
pub const MAX_SEATS: usize = 6;
pub const MIN_SEATS: usize = 2;

/// Ordinal position at the table. Seat order is clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(u8);

impl Seat {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// Clockwise ordering over a fixed number of seats.
///
/// This is the one place seat arithmetic happens: turn advancement and the
/// disproval search both walk the table through `next`/`clockwise_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRing {
    count: u8,
}

impl SeatRing {
    pub const fn new(count: usize) -> Self {
        Self { count: count as u8 }
    }

    pub const fn len(self) -> usize {
        self.count as usize
    }

    pub const fn is_empty(self) -> bool {
        self.count == 0
    }

    /// The seat immediately clockwise of `seat`, wrapping at the table size.
    pub const fn next(self, seat: Seat) -> Seat {
        Seat((seat.0 + 1) % self.count)
    }

    /// Every other seat, starting at `(seat + 1) mod N` and proceeding
    /// clockwise until just before `seat` comes round again.
    pub fn clockwise_after(self, seat: Seat) -> impl Iterator<Item = Seat> {
        let count = self.count;
        (1..count).map(move |offset| Seat((seat.0 + offset) % count))
    }

    /// Seats strictly between `from` and `to` going clockwise.
    pub fn between(self, from: Seat, to: Seat) -> impl Iterator<Item = Seat> {
        self.clockwise_after(from).take_while(move |seat| *seat != to)
    }

    pub fn seats(self) -> impl Iterator<Item = Seat> {
        (0..self.count).map(Seat)
    }
}
