use crate::game::accusation::Verdict;
use crate::game::disproval::DisprovalOutcome;
use crate::game::error::GameError;
use crate::game::phase::{GameOutcome, RollOutcome};
use crate::game::rules::GameRules;
use crate::game::setup::Deal;
use crate::game::state::GameState;
use crate::model::assumption::Theory;
use crate::model::card::{Card, Room, Suspect, Weapon};
use crate::model::participant::ParticipantConfig;
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// One call a driver made into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverInput {
    StartTurn,
    Destination(Room),
    Assume { suspect: Suspect, weapon: Weapon },
    DisprovalChoice(Card),
    DeclineAssumption,
    Accuse(Theory),
    EndTurn,
}

/// What applying a `DriverInput` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEffect {
    TurnStarted(Seat),
    Rolled(RollOutcome),
    Disproval(DisprovalOutcome),
    Accused(Verdict),
    TurnEnded,
}

impl GameState {
    /// Dispatches `input` to the matching operation.
    pub fn apply_input(&mut self, input: DriverInput) -> Result<InputEffect, GameError> {
        match input {
            DriverInput::StartTurn => self.start_turn().map(InputEffect::TurnStarted),
            DriverInput::Destination(room) => self.submit_destination(room).map(InputEffect::Rolled),
            DriverInput::Assume { suspect, weapon } => self
                .submit_assumption(suspect, weapon)
                .map(InputEffect::Disproval),
            DriverInput::DisprovalChoice(card) => self
                .submit_disproval_choice(card)
                .map(InputEffect::Disproval),
            DriverInput::DeclineAssumption => {
                self.decline_assumption().map(|()| InputEffect::TurnEnded)
            }
            DriverInput::Accuse(theory) => self.submit_accusation(theory).map(InputEffect::Accused),
            DriverInput::EndTurn => self.end_turn().map(|()| InputEffect::TurnEnded),
        }
    }
}

/// Everything needed to re-run a game: its setup plus the ordered inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub seed: u64,
    pub participants: Vec<ParticipantConfig>,
    #[serde(default)]
    pub rules: GameRules,
    /// Present only for games started from a fixed deal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal: Option<Deal>,
    pub inputs: Vec<DriverInput>,
    #[serde(default)]
    pub outcome: Option<GameOutcome>,
}

impl ReplayLog {
    pub fn capture(state: &GameState) -> Self {
        Self {
            seed: state.seed(),
            participants: state.participant_configs().to_vec(),
            rules: *state.rules(),
            deal: state.fixture_deal().cloned(),
            inputs: state.inputs().to_vec(),
            outcome: state.outcome().copied(),
        }
    }

    /// The game as it stood before the first input.
    pub fn restore(&self) -> Result<GameState, GameError> {
        match &self.deal {
            Some(deal) => GameState::from_deal(
                self.participants.clone(),
                deal.clone(),
                self.seed,
                self.rules,
            ),
            None => GameState::with_rules(self.participants.clone(), self.seed, self.rules),
        }
    }

    /// Re-applies every recorded input to a freshly restored game.
    pub fn replay(&self) -> Result<GameState, GameError> {
        let mut state = self.restore()?;
        for input in &self.inputs {
            state.apply_input(*input)?;
        }
        Ok(state)
    }

    /// True when `state` ended the way this log says the game ended.
    pub fn matches_outcome(&self, state: &GameState) -> bool {
        state.outcome() == self.outcome.as_ref()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::{DriverInput, InputEffect, ReplayLog};
    use crate::game::phase::PhaseKind;
    use crate::game::state::GameState;
    use crate::model::card::{Room, Suspect, Weapon};
    use crate::model::participant::ParticipantConfig;
    use crate::model::seat::Seat;

    #[test]
    fn inputs_serialize_in_snake_case() {
        let json = serde_json::to_string(&DriverInput::Assume {
            suspect: Suspect::Plum,
            weapon: Weapon::Rope,
        })
        .unwrap();
        assert_eq!(json, r#"{"assume":{"suspect":"Plum","weapon":"Rope"}}"#);
        let back: DriverInput = serde_json::from_str(r#""start_turn""#).unwrap();
        assert_eq!(back, DriverInput::StartTurn);
    }

    #[test]
    fn rejected_inputs_are_not_logged() {
        let mut game = GameState::new(ParticipantConfig::reference_table(3), 8).unwrap();
        assert!(game.apply_input(DriverInput::EndTurn).is_err());
        assert_eq!(
            game.apply_input(DriverInput::StartTurn).unwrap(),
            InputEffect::TurnStarted(Seat::new(0))
        );
        assert_eq!(game.inputs(), &[DriverInput::StartTurn]);
    }

    #[test]
    fn log_replays_to_the_same_transitions() {
        let mut game = GameState::new(ParticipantConfig::reference_table(4), 21).unwrap();
        game.start_turn().unwrap();
        let roll = game.submit_destination(Room::Library).unwrap();
        if game.phase().kind() == PhaseKind::AwaitingAssumption {
            game.submit_assumption(Suspect::Green, Weapon::Candlestick).unwrap();
            if game.phase().kind() == PhaseKind::AwaitingDisproval {
                let candidates = match game.phase() {
                    crate::game::phase::Phase::AwaitingDisproval { candidates, .. } => {
                        candidates.clone()
                    }
                    _ => unreachable!(),
                };
                game.submit_disproval_choice(candidates[0]).unwrap();
            }
        }
        assert_eq!(roll.seat, Seat::new(0));

        let log = ReplayLog::capture(&game);
        let json = log.to_json().unwrap();
        let parsed = ReplayLog::from_json(&json).unwrap();
        assert_eq!(parsed, log);
        assert!(parsed.deal.is_none());

        let replayed = parsed.replay().unwrap();
        assert_eq!(replayed.transitions(), game.transitions());
        assert_eq!(replayed.inputs(), game.inputs());
        assert!(parsed.matches_outcome(&replayed));
    }

    #[test]
    fn tampered_deal_is_refused_on_load() {
        let deal = crate::game::setup::deal_game(3, 13).unwrap();
        let game = GameState::from_deal(
            ParticipantConfig::reference_table(3),
            deal,
            13,
            crate::game::GameRules::default(),
        )
        .unwrap();
        let json = ReplayLog::capture(&game).to_json().unwrap();
        assert!(ReplayLog::from_json(&json).unwrap().deal.is_some());

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["deal"]["hands"][2]["cards"] = serde_json::Value::from(0u32);
        let err = ReplayLog::from_json(&value.to_string()).unwrap_err().to_string();
        assert!(err.starts_with("invalid deal:"), "{err}");
        assert!(err.contains("is not dealt"), "{err}");

        value["deal"]["hands"][2]["cards"] = serde_json::Value::from(1u64 << 21);
        assert!(ReplayLog::from_json(&value.to_string()).is_err());
    }
}
