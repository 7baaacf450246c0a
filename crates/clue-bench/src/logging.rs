use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub events_path: PathBuf,
}

/// Installs a JSON subscriber writing next to the summary file. Returns
/// `None` when structured logging is disabled.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let events_dir = outputs
        .summary_md
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&events_dir)
        .with_context(|| format!("creating event log directory at {}", events_dir.display()))?;

    let events_path = events_dir.join("events.jsonl");
    let file = File::create(&events_path)
        .with_context(|| format!("creating event log at {}", events_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| game_filter(level));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when running under tests.
    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::info!(target: "clue_bench", run_id, "structured logging enabled");

    Ok(Some(LoggingGuard {
        _guard: guard,
        events_path,
    }))
}

/// Game, bot and bench events at `level`; everything else only warns.
fn game_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_ascii_lowercase();
    EnvFilter::new(format!(
        "warn,clue_core={level},clue_bot={level},clue_bench={level}"
    ))
}
