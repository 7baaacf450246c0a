use crate::belief::SuspicionConfig;
use serde::{Deserialize, Serialize};

/// What a wrong accusation does to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccusationRule {
    /// Any wrong accusation ends the whole game as a loss for the accuser.
    #[default]
    EndsGame,
    /// The accuser stops taking turns but keeps disproving; the last
    /// active participant wins by default.
    EliminatesAccuser,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GameRules {
    #[serde(default)]
    pub accusation: AccusationRule,
    #[serde(default)]
    pub suspicion: SuspicionConfig,
}

impl GameRules {
    pub fn with_accusation(mut self, rule: AccusationRule) -> Self {
        self.accusation = rule;
        self
    }

    pub fn with_suspicion(mut self, suspicion: SuspicionConfig) -> Self {
        self.suspicion = suspicion;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{AccusationRule, GameRules};
    use crate::model::assumption::Theory;

    #[test]
    fn default_rule_ends_the_game() {
        assert_eq!(GameRules::default().accusation, AccusationRule::EndsGame);
    }

    #[test]
    fn rules_deserialize_with_defaults() {
        let rules: GameRules = serde_json::from_str(r#"{"accusation":"eliminates_accuser"}"#).unwrap();
        assert_eq!(rules.accusation, AccusationRule::EliminatesAccuser);
        assert_eq!(rules.suspicion, Default::default());
    }

    #[test]
    fn suspicion_override_reaches_every_belief() {
        use crate::belief::SuspicionConfig;
        use crate::game::state::GameState;
        use crate::model::card::{Room, Suspect, Weapon};
        use crate::model::participant::ParticipantConfig;
        use crate::model::seat::Seat;

        let heavy = SuspicionConfig {
            assumption_weight: 4.0,
            ..SuspicionConfig::default()
        };
        let configs = vec![
            ParticipantConfig::automated().starting_in(Room::Study),
            ParticipantConfig::automated(),
            ParticipantConfig::automated(),
        ];
        let mut plain = GameState::with_rules(configs.clone(), 11, GameRules::default()).unwrap();
        let mut tuned =
            GameState::with_rules(configs, 11, GameRules::default().with_suspicion(heavy)).unwrap();
        for game in [&mut plain, &mut tuned] {
            game.start_turn().unwrap();
            game.submit_destination(Room::Kitchen).unwrap();
            game.submit_assumption(Suspect::Plum, Weapon::Rope).unwrap();
        }

        let mut compared = 0;
        for index in 1..3 {
            let seat = Seat::new(index);
            let (before, after) = (plain.belief(seat).unwrap(), tuned.belief(seat).unwrap());
            assert_eq!(after.config(), &heavy);
            for card in Theory::new(Suspect::Plum, Weapon::Rope, Room::Kitchen).cards() {
                if before.is_candidate(card) && after.is_candidate(card) {
                    assert!(after.weight(card) > before.weight(card), "{card} for {seat}");
                    compared += 1;
                }
            }
        }
        assert!(compared > 0);
    }
}
