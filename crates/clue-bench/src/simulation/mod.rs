mod seats;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clue_bot::{Autopilot, AutopilotError};
use clue_core::game::{GameError, GameRules, GameState, ReplayLog, Verdict};
use clue_core::model::seat::Seat;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{BenchConfig, ResolvedOutputs};

pub use seats::SeatError;
use seats::SeatBlueprint;

/// Plays seeded games between configured seats and records the results.
pub struct GameRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    seats: Vec<SeatBlueprint>,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub finished: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub replay_dir: Option<PathBuf>,
}

/// What one game produced, as far as the tallies care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game_index: usize,
    pub seed: u64,
    pub turns: u32,
    pub finished: bool,
    pub winner: Option<usize>,
    pub wrong_accusers: Vec<usize>,
    pub inputs: usize,
}

impl GameRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let seats = SeatBlueprint::from_configs(&config.seats)?;
        Ok(Self {
            config,
            outputs,
            seats,
        })
    }

    /// Play every configured game, streaming one JSONL row per game.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;
        if let Some(dir) = self.outputs.replay_dir.as_ref() {
            fs::create_dir_all(dir)?;
        }

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut analytics = AnalyticsCollector::new(&self.config);
        let mut rows_written = 0usize;
        let mut finished = 0usize;

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let game = self.play_game(game_seed)?;
            let record = self.record(game_index, &game);

            if let Some(dir) = self.outputs.replay_dir.as_ref() {
                write_replay(dir, game_index, &game)?;
            }
            analytics.record_game(&record)?;
            write_game_row(&mut writer, &self.config, &self.seats, &game, &record)?;
            rows_written += 1;
            if record.finished {
                finished += 1;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            finished,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            replay_dir: self.outputs.replay_dir.clone(),
        })
    }

    fn play_game(&self, game_seed: u64) -> Result<GameState, RunnerError> {
        let rules = GameRules::default()
            .with_accusation(self.config.games.accusation_rule)
            .with_suspicion(self.config.games.suspicion());
        let mut game = GameState::with_rules(self.config.participants(), game_seed, rules)?;
        let policies = self
            .seats
            .iter()
            .enumerate()
            .map(|(index, seat)| seat.spawn_policy(index, game_seed))
            .collect();
        let mut pilot = Autopilot::new(policies);
        let report = pilot.play_to_end(&mut game, self.config.games.max_turns)?;

        event!(
            target: "clue_bench::simulation",
            Level::INFO,
            run_id = %self.config.run_id,
            seed = game_seed,
            turns = report.turns,
            finished = report.finished,
            winner = ?game.outcome().and_then(|outcome| outcome.winner).map(Seat::index),
            "game complete"
        );
        Ok(game)
    }

    fn record(&self, game_index: usize, game: &GameState) -> GameRecord {
        let outcome = game.outcome();
        let mut wrong_accusers: Vec<usize> = game
            .participants()
            .iter()
            .filter(|participant| participant.is_eliminated())
            .map(|participant| participant.seat().index())
            .collect();
        if let Some(outcome) = outcome.filter(|outcome| outcome.verdict == Verdict::Loss) {
            let accuser = outcome.accuser.index();
            if !wrong_accusers.contains(&accuser) {
                wrong_accusers.push(accuser);
            }
        }

        GameRecord {
            game_index,
            seed: game.seed(),
            turns: game.turn(),
            finished: game.is_over(),
            winner: outcome.and_then(|outcome| outcome.winner).map(Seat::index),
            wrong_accusers,
            inputs: game.inputs().len(),
        }
    }
}

/// Result of re-running a stored replay log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayVerification {
    pub inputs: usize,
    pub transitions: usize,
    pub outcome_matches: bool,
}

/// Re-executes a replay file and checks it ends the way it was recorded.
pub fn verify_replay(path: impl AsRef<Path>) -> Result<ReplayVerification, RunnerError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let log = ReplayLog::from_json(&text)?;
    let replayed = log.replay()?;
    Ok(ReplayVerification {
        inputs: log.inputs.len(),
        transitions: replayed.transitions().len(),
        outcome_matches: log.matches_outcome(&replayed),
    })
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn replay_path(dir: &Path, game_index: usize) -> PathBuf {
    dir.join(format!("game_{game_index:05}.json"))
}

fn write_replay(dir: &Path, game_index: usize, game: &GameState) -> Result<(), RunnerError> {
    let json = ReplayLog::capture(game).to_json()?;
    fs::write(replay_path(dir, game_index), json)?;
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchConfig,
    seats: &[SeatBlueprint],
    game: &GameState,
    record: &GameRecord,
) -> Result<(), RunnerError> {
    let name_of = |index: usize| seats.get(index).map(|seat| seat.name.clone());
    let outcome = game.outcome();
    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{:05}", record.game_index),
        game_index: record.game_index,
        game_seed: record.seed,
        seats: seats.iter().map(|seat| seat.name.clone()).collect(),
        turns: record.turns,
        inputs: record.inputs,
        finished: record.finished,
        winner: record.winner.and_then(name_of),
        accuser: outcome.and_then(|outcome| name_of(outcome.accuser.index())),
        verdict: outcome.map(|outcome| outcome.verdict),
        wrong_accusers: record
            .wrong_accusers
            .iter()
            .filter_map(|&index| name_of(index))
            .collect(),
        solution: outcome.map(|outcome| outcome.solution.to_string()),
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    game_seed: u64,
    seats: Vec<String>,
    turns: u32,
    inputs: usize,
    finished: bool,
    winner: Option<String>,
    accuser: Option<String>,
    verdict: Option<Verdict>,
    wrong_accusers: Vec<String>,
    solution: Option<String>,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Seat(#[from] SeatError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game rejected an input: {0}")]
    Game(#[from] GameError),
    #[error("autopilot failed: {0}")]
    Autopilot(#[from] AutopilotError),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
