use crate::model::assumption::Theory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Win,
    Loss,
}

/// Element-wise comparison of an accusation against the solution.
pub fn validate(accusation: &Theory, solution: &Theory) -> Verdict {
    let matches = accusation.suspect == solution.suspect
        && accusation.weapon == solution.weapon
        && accusation.room == solution.room;
    if matches { Verdict::Win } else { Verdict::Loss }
}

#[cfg(test)]
mod tests {
    use super::{Verdict, validate};
    use crate::model::assumption::Theory;
    use crate::model::card::{Room, Suspect, Weapon};

    #[test]
    fn exact_match_wins() {
        let solution = Theory::new(Suspect::Peacock, Weapon::Candlestick, Room::Lounge);
        assert_eq!(validate(&solution, &solution), Verdict::Win);
    }

    #[test]
    fn any_single_mismatch_loses() {
        let solution = Theory::new(Suspect::Peacock, Weapon::Candlestick, Room::Lounge);
        let wrong = [
            Theory::new(Suspect::Plum, Weapon::Candlestick, Room::Lounge),
            Theory::new(Suspect::Peacock, Weapon::Rope, Room::Lounge),
            Theory::new(Suspect::Peacock, Weapon::Candlestick, Room::Hall),
        ];
        for accusation in wrong {
            assert_eq!(validate(&accusation, &solution), Verdict::Loss, "{accusation}");
        }
    }
}
