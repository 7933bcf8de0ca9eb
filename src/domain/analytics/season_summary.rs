use crate::domain::race::{RaceResult, RawValue, to_float, to_int};
use serde::Serialize;

/// Headline season statistics for a driver profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeasonSummary {
    pub total_races: usize,
    pub wins: usize,
    pub podiums: usize,
    pub total_points: f64,
    pub avg_finish: f64,
    /// Races without an integer finishing position.
    pub dnf_count: usize,
    pub pole_positions: usize,
    pub fastest_laps: usize,
}

fn text_is(value: Option<&RawValue>, expected: i64) -> bool {
    match value {
        Some(RawValue::Text(s)) => s.trim() == expected.to_string(),
        Some(RawValue::Int(v)) => *v == expected,
        _ => false,
    }
}

/// Season totals. Races without a result entry are not counted at all.
pub fn season_summary(results: &[RaceResult]) -> SeasonSummary {
    let mut summary = SeasonSummary::default();
    let mut finish_positions = Vec::new();

    for entry in results.iter().filter_map(RaceResult::result) {
        summary.total_races += 1;

        let position = entry.position.as_ref();
        if text_is(position, 1) {
            summary.wins += 1;
        }
        if (1..=3).any(|p| text_is(position, p)) {
            summary.podiums += 1;
        }

        summary.total_points += to_float(entry.points.as_ref(), 0.0);

        // Sentinel default distinguishes "unparseable" from a real value
        match to_int(position, i64::MIN) {
            i64::MIN => summary.dnf_count += 1,
            p => finish_positions.push(p as f64),
        }

        if text_is(entry.grid.as_ref(), 1) {
            summary.pole_positions += 1;
        }

        let fastest_rank = entry.fastest_lap.as_ref().and_then(|f| f.rank.as_ref());
        if text_is(fastest_rank, 1) {
            summary.fastest_laps += 1;
        }
    }

    if !finish_positions.is_empty() {
        summary.avg_finish = finish_positions.iter().sum::<f64>() / finish_positions.len() as f64;
    }

    summary
}
