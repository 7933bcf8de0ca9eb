use super::stats::Stats;
use crate::domain::race::{RaceResult, round_to, to_position};
use serde::Serialize;
use tracing::debug;

/// Status text a race must carry to count as completed.
const FINISHED: &str = "Finished";

/// Spread of finishing positions among completed races.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyMetrics {
    pub completed_races: usize,
    pub total_races: usize,
    pub avg_position: f64,
    pub std_dev: f64,
    /// `max(0, 100 - std_dev * 10)`, one decimal.
    pub consistency_score: f64,
}

/// Consistency of finishing positions.
///
/// Only races with the literal `"Finished"` status and a positive position count;
/// lapped finishers are excluded. Returns `None` (cannot compute, not zero) when
/// fewer than `min_races` such races exist.
pub fn consistency_score(results: &[RaceResult], min_races: usize) -> Option<ConsistencyMetrics> {
    let positions: Vec<f64> = results
        .iter()
        .filter_map(|race| {
            let entry = race.result()?;
            if entry.status != FINISHED {
                return None;
            }
            to_position(entry.position.as_ref()).map(f64::from)
        })
        .collect();

    if positions.len() < min_races {
        debug!(
            "Consistency: {} completed races < minimum {}",
            positions.len(),
            min_races
        );
        return None;
    }

    let (mean, std_dev) = Stats::population_mean_std(&positions)?;

    let consistency_score = if std_dev == 0.0 {
        100.0
    } else if std_dev >= 10.0 {
        0.0
    } else {
        round_to((100.0 - std_dev * 10.0).max(0.0), 1)
    };

    Some(ConsistencyMetrics {
        completed_races: positions.len(),
        total_races: results.len(),
        avg_position: round_to(mean, 2),
        std_dev: round_to(std_dev, 2),
        consistency_score,
    })
}
