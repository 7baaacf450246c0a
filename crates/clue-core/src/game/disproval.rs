use crate::model::assumption::Assumption;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::seat::{Seat, SeatRing};
use serde::{Deserialize, Serialize};

/// What the asker learns once an assumption has been put to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisprovalOutcome {
    /// `by` showed `card` to the asker.
    Revealed { by: Seat, card: Card },
    /// `by` is a human holding several matches; the game waits for their pick.
    AwaitingChoice { by: Seat, candidates: Vec<Card> },
    /// Nobody else holds any of the named cards.
    Irrefutable,
}

impl DisprovalOutcome {
    pub fn disprover(&self) -> Option<Seat> {
        match self {
            DisprovalOutcome::Revealed { by, .. } | DisprovalOutcome::AwaitingChoice { by, .. } => {
                Some(*by)
            }
            DisprovalOutcome::Irrefutable => None,
        }
    }
}

/// Walks clockwise from the seat after the asserter and stops at the first
/// hand holding any named card. Returns that seat with its matches in
/// suspect, weapon, room order.
pub fn find_disprover<'a, F>(ring: SeatRing, assumption: &Assumption, hand_of: F) -> Option<(Seat, Vec<Card>)>
where
    F: Fn(Seat) -> &'a Hand,
{
    ring.clockwise_after(assumption.asserter).find_map(|seat| {
        let matches = hand_of(seat).matching(&assumption.theory);
        if matches.is_empty() {
            None
        } else {
            Some((seat, matches))
        }
    })
}

/// The card an automatic disprover shows: the first match in suspect,
/// weapon, room order.
pub fn tie_break(matches: &[Card]) -> Option<Card> {
    matches.first().copied()
}
