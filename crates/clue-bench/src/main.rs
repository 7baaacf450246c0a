use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use clue_bench::config::{BenchConfig, ResolvedOutputs};
use clue_bench::logging::init_logging;
use clue_bench::simulation::{GameRunner, verify_replay};

/// Seeded simulation harness for whodunit detectives.
#[derive(Debug, Parser)]
#[command(
    name = "clue-bench",
    author,
    version,
    about = "Deterministic whodunit simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for game seeds.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Re-run a stored replay log and check its outcome, then exit.
    #[arg(long, value_name = "FILE", conflicts_with = "validate_only")]
    verify_replay: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.verify_replay.as_ref() {
        let check = verify_replay(path)
            .with_context(|| format!("replaying {}", path.display()))?;
        if !check.outcome_matches {
            bail!(
                "replay {} diverged after {} inputs",
                path.display(),
                check.inputs
            );
        }
        println!(
            "Replay {} reproduced: {} inputs, {} transitions",
            path.display(),
            check.inputs,
            check.transitions
        );
        return Ok(());
    }

    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let seat_count = config.seats.len();
    let run_id = config.run_id.clone();
    let games = config.games.count;

    println!(
        "Loaded configuration '{run_id}' with {seat_count} seats ({games} game{})",
        if games == 1 { "" } else { "s" }
    );

    let runner = GameRunner::new(config.clone(), outputs.clone())?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games ({} solved) → {} rows at {}",
        summary.games_played,
        summary.finished,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(dir) = summary.replay_dir.as_ref() {
        println!("Replay logs: {}", dir.display());
    }

    Ok(())
}
