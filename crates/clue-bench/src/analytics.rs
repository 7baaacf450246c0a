use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::{BenchConfig, SeatKind};
use crate::simulation::GameRecord;

const CONFIDENCE: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("game {game} names seat {seat}, but only {seats} seats are configured")]
    UnknownSeat {
        game: usize,
        seat: usize,
        seats: usize,
    },
    #[error("normal distribution unavailable: {0}")]
    Distribution(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Folds finished games into per-seat tallies.
pub struct AnalyticsCollector {
    run_id: String,
    seats: Vec<SeatAccumulator>,
    games: usize,
    finished: usize,
    total_turns: u64,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            seats: config
                .seats
                .iter()
                .map(|seat| SeatAccumulator::new(seat.name.clone(), seat.kind))
                .collect(),
            games: 0,
            finished: 0,
            total_turns: 0,
        }
    }

    pub fn record_game(&mut self, record: &GameRecord) -> Result<(), AnalyticsError> {
        let seats = self.seats.len();
        let lookup = |seat: usize| {
            if seat < seats {
                Ok(seat)
            } else {
                Err(AnalyticsError::UnknownSeat {
                    game: record.game_index,
                    seat,
                    seats,
                })
            }
        };

        self.games += 1;
        self.total_turns += u64::from(record.turns);
        if record.finished {
            self.finished += 1;
        }

        for acc in &mut self.seats {
            acc.games += 1;
        }
        if let Some(winner) = record.winner {
            let seat = lookup(winner)?;
            self.seats[seat].wins += 1;
            self.seats[seat].winning_turns += u64::from(record.turns);
        }
        for &seat in &record.wrong_accusers {
            let seat = lookup(seat)?;
            self.seats[seat].wrong_accusations += 1;
        }
        Ok(())
    }

    pub fn finalize(self) -> Result<AnalyticsSummary, AnalyticsError> {
        let z = Normal::new(0.0, 1.0)
            .map_err(|err| AnalyticsError::Distribution(err.to_string()))?
            .inverse_cdf(0.5 + CONFIDENCE / 2.0);

        let avg_turns = if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        };

        Ok(AnalyticsSummary {
            run_id: self.run_id,
            games: self.games,
            finished: self.finished,
            avg_turns,
            seats: self.seats.into_iter().map(|acc| acc.into_report(z)).collect(),
        })
    }
}

struct SeatAccumulator {
    name: String,
    kind: SeatKind,
    games: usize,
    wins: usize,
    wrong_accusations: usize,
    winning_turns: u64,
}

impl SeatAccumulator {
    fn new(name: String, kind: SeatKind) -> Self {
        Self {
            name,
            kind,
            games: 0,
            wins: 0,
            wrong_accusations: 0,
            winning_turns: 0,
        }
    }

    fn into_report(self, z: f64) -> SeatReport {
        let win_rate = if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        };
        let avg_turns_to_win = (self.wins > 0).then(|| self.winning_turns as f64 / self.wins as f64);

        SeatReport {
            ci95: proportion_interval(win_rate, self.games, z),
            name: self.name,
            kind: self.kind,
            games: self.games,
            wins: self.wins,
            wrong_accusations: self.wrong_accusations,
            win_rate,
            avg_turns_to_win,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatReport {
    pub name: String,
    pub kind: SeatKind,
    pub games: usize,
    pub wins: usize,
    pub wrong_accusations: usize,
    pub win_rate: f64,
    pub ci95: (f64, f64),
    pub avg_turns_to_win: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub games: usize,
    pub finished: usize,
    pub avg_turns: f64,
    pub seats: Vec<SeatReport>,
}

impl AnalyticsSummary {
    pub fn unfinished(&self) -> usize {
        self.games - self.finished
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Simulation Summary: {}\n\n", self.run_id));
        rows.push_str(&format!(
            "Games: {} ({} solved, {} hit the turn cap), average {:.1} turns\n\n",
            self.games,
            self.finished,
            self.unfinished(),
            self.avg_turns
        ));
        rows.push_str("| Seat | Kind | Games | Wins | Win % | 95% CI | Wrong accusations | Avg turns to win |\n");
        rows.push_str("|------|------|-------|------|-------|--------|-------------------|------------------|\n");

        for seat in &self.seats {
            let turns = seat
                .avg_turns_to_win
                .map_or_else(|| "-".to_string(), |turns| format!("{turns:.1}"));
            rows.push_str(&format!(
                "| {name} | {kind:?} | {games} | {wins} | {win:.1}% | [{ci_low:.3}, {ci_high:.3}] | {wrong} | {turns} |\n",
                name = seat.name,
                kind = seat.kind,
                games = seat.games,
                wins = seat.wins,
                win = seat.win_rate * 100.0,
                ci_low = seat.ci95.0,
                ci_high = seat.ci95.1,
                wrong = seat.wrong_accusations,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

/// Normal-approximation interval for a proportion, clamped to [0, 1].
fn proportion_interval(rate: f64, samples: usize, z: f64) -> (f64, f64) {
    if samples == 0 {
        return (0.0, 0.0);
    }
    let std_error = (rate * (1.0 - rate) / samples as f64).sqrt();
    let margin = z * std_error;
    ((rate - margin).max(0.0), (rate + margin).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const YAML: &str = r#"
run_id: "tally"
games:
  count: 4
seats:
  - name: "holmes"
    kind: "detective"
  - name: "dice"
    kind: "random"
outputs:
  jsonl: "games.jsonl"
  summary_md: "summary.md"
"#;

    fn collector() -> AnalyticsCollector {
        let mut config: BenchConfig = serde_yaml::from_str(YAML).unwrap();
        config.validate().unwrap();
        AnalyticsCollector::new(&config)
    }

    fn record(game_index: usize, winner: Option<usize>, wrong: Vec<usize>) -> GameRecord {
        GameRecord {
            game_index,
            seed: game_index as u64,
            turns: 10,
            finished: winner.is_some() || !wrong.is_empty(),
            winner,
            wrong_accusers: wrong,
            inputs: 0,
        }
    }

    #[test]
    fn tallies_wins_and_wrong_accusations() {
        let mut analytics = collector();
        analytics.record_game(&record(0, Some(0), vec![])).unwrap();
        analytics.record_game(&record(1, None, vec![1])).unwrap();
        analytics.record_game(&record(2, Some(0), vec![])).unwrap();
        analytics.record_game(&record(3, None, vec![])).unwrap();
        let summary = analytics.finalize().unwrap();

        assert_eq!(summary.games, 4);
        assert_eq!(summary.finished, 3);
        assert_eq!(summary.unfinished(), 1);
        let holmes = &summary.seats[0];
        assert_eq!(holmes.wins, 2);
        assert_eq!(holmes.win_rate, 0.5);
        assert_eq!(holmes.avg_turns_to_win, Some(10.0));
        assert!(holmes.ci95.0 < 0.5 && holmes.ci95.1 > 0.5);
        assert_eq!(summary.seats[1].wrong_accusations, 1);
        assert_eq!(summary.seats[1].avg_turns_to_win, None);
    }

    #[test]
    fn rejects_unknown_seat() {
        let mut analytics = collector();
        let err = analytics.record_game(&record(0, Some(5), vec![])).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownSeat { seat: 5, .. }));
    }

    #[test]
    fn interval_is_clamped() {
        let (low, high) = proportion_interval(1.0, 4, 1.96);
        assert_eq!((low, high), (1.0, 1.0));
        let (low, _) = proportion_interval(0.1, 5, 1.96);
        assert_eq!(low, 0.0);
    }

    #[test]
    fn markdown_lists_every_seat() {
        let mut analytics = collector();
        analytics.record_game(&record(0, Some(1), vec![])).unwrap();
        let summary = analytics.finalize().unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.md");
        summary.write_markdown(&path).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("# Simulation Summary: tally"));
        assert!(text.contains("| holmes | Detective | 1 | 0 |"));
        assert!(text.contains("| dice | Random | 1 | 1 | 100.0% |"));
    }
}
