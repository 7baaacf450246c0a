use crate::policy::{Policy, PolicyContext};
use clue_core::game::{DriverInput, GameError, GameState, InputEffect, Phase, PhaseKind};
use clue_core::model::seat::Seat;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum AutopilotError {
    #[error("{policies} policies supplied for {seats} seats")]
    PolicyCount { policies: usize, seats: usize },
    #[error("{seat} has no legal destination")]
    NoDestination { seat: Seat },
    #[error("{seat} offered no card to disprove with")]
    NoDisprovalCard { seat: Seat },
    #[error("the game cannot rest while {0}")]
    Transient(PhaseKind),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// How a driven game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutopilotReport {
    pub turns: u32,
    pub finished: bool,
}

/// Drives a game by asking each seat's policy for the input the current
/// phase needs. Seat `i` is played by `policies[i]`.
pub struct Autopilot {
    policies: Vec<Box<dyn Policy>>,
}

impl Autopilot {
    pub fn new(policies: Vec<Box<dyn Policy>>) -> Self {
        Self { policies }
    }

    /// The input the acting seat's policy wants next; `None` once the game
    /// is over.
    pub fn next_input(&mut self, game: &GameState) -> Result<Option<DriverInput>, AutopilotError> {
        if self.policies.len() != game.seat_count() {
            return Err(AutopilotError::PolicyCount {
                policies: self.policies.len(),
                seats: game.seat_count(),
            });
        }

        let input = match game.phase() {
            Phase::GameOver(_) => return Ok(None),
            Phase::TurnStart => DriverInput::StartTurn,
            Phase::AwaitingMovementChoice { seat, .. } => {
                let (policy, ctx) = self.policy_for(*seat, game);
                match policy.choose_accusation(&ctx) {
                    Some(theory) => DriverInput::Accuse(theory),
                    None => policy
                        .choose_destination(&ctx)
                        .map(DriverInput::Destination)
                        .ok_or(AutopilotError::NoDestination { seat: *seat })?,
                }
            }
            Phase::AwaitingAssumption { seat, .. } => {
                let (policy, ctx) = self.policy_for(*seat, game);
                if let Some(theory) = policy.choose_accusation(&ctx) {
                    DriverInput::Accuse(theory)
                } else {
                    match policy.choose_assumption(&ctx) {
                        Some((suspect, weapon)) => DriverInput::Assume { suspect, weapon },
                        None => DriverInput::DeclineAssumption,
                    }
                }
            }
            Phase::AwaitingDisproval {
                disprover,
                candidates,
                ..
            } => {
                let (policy, ctx) = self.policy_for(*disprover, game);
                policy
                    .choose_disproval(&ctx, candidates)
                    .map(DriverInput::DisprovalChoice)
                    .ok_or(AutopilotError::NoDisprovalCard { seat: *disprover })?
            }
            Phase::AwaitingAccusation { seat } => {
                let (policy, ctx) = self.policy_for(*seat, game);
                policy
                    .choose_accusation(&ctx)
                    .map_or(DriverInput::EndTurn, DriverInput::Accuse)
            }
            phase @ (Phase::Rolling { .. } | Phase::Resolved { .. }) => {
                return Err(AutopilotError::Transient(phase.kind()));
            }
        };
        Ok(Some(input))
    }

    /// Applies one policy decision. Returns `None` once the game is over.
    pub fn step(&mut self, game: &mut GameState) -> Result<Option<InputEffect>, AutopilotError> {
        let Some(input) = self.next_input(game)? else {
            return Ok(None);
        };
        let effect = game.apply_input(input)?;
        Ok(Some(effect))
    }

    /// Plays until the game ends or `max_turns` turns have been completed.
    pub fn play_to_end(
        &mut self,
        game: &mut GameState,
        max_turns: u32,
    ) -> Result<AutopilotReport, AutopilotError> {
        while !game.is_over() {
            if matches!(game.phase(), Phase::TurnStart) && game.turn() >= max_turns {
                break;
            }
            self.step(game)?;
        }

        let report = AutopilotReport {
            turns: game.turn(),
            finished: game.is_over(),
        };
        event!(
            target: "clue_bot::autopilot",
            Level::DEBUG,
            turns = report.turns,
            finished = report.finished,
            winner = ?game.outcome().and_then(|outcome| outcome.winner).map(Seat::index),
            "autopilot stopped"
        );
        Ok(report)
    }

    fn policy_for<'a>(
        &mut self,
        seat: Seat,
        game: &'a GameState,
    ) -> (&mut Box<dyn Policy>, PolicyContext<'a>) {
        (&mut self.policies[seat.index()], PolicyContext::new(seat, game))
    }
}

#[cfg(test)]
mod tests {
    use super::{Autopilot, AutopilotError};
    use crate::policy::{HeuristicPolicy, Policy, RandomPolicy};
    use clue_core::game::{DriverInput, GameState, PhaseKind};
    use clue_core::model::participant::ParticipantConfig;

    #[test]
    fn policy_count_must_match_seats() {
        let mut game = GameState::new(ParticipantConfig::reference_table(3), 1).unwrap();
        let mut pilot = Autopilot::new(vec![Box::new(HeuristicPolicy::default())]);
        let err = pilot.step(&mut game).unwrap_err();
        assert!(matches!(err, AutopilotError::PolicyCount { policies: 1, seats: 3 }));
    }

    #[test]
    fn first_step_starts_a_turn() {
        let game = GameState::new(ParticipantConfig::reference_table(3), 1).unwrap();
        let policies: Vec<Box<dyn Policy>> = vec![
            Box::new(RandomPolicy::new(1)),
            Box::new(HeuristicPolicy::default()),
            Box::new(HeuristicPolicy::default()),
        ];
        let mut pilot = Autopilot::new(policies);
        assert_eq!(pilot.next_input(&game).unwrap(), Some(DriverInput::StartTurn));
    }

    #[test]
    fn turn_cap_stops_at_a_turn_boundary() {
        let mut game = GameState::new(ParticipantConfig::reference_table(3), 2).unwrap();
        let policies: Vec<Box<dyn Policy>> = vec![
            Box::new(RandomPolicy::new(7)),
            Box::new(RandomPolicy::new(8)),
            Box::new(RandomPolicy::new(9)),
        ];
        let mut pilot = Autopilot::new(policies);
        let report = pilot.play_to_end(&mut game, 5).unwrap();
        assert!(!report.finished);
        assert_eq!(report.turns, 5);
        assert_eq!(game.phase().kind(), PhaseKind::TurnStart);
    }
}
