use super::stats::Stats;
use crate::domain::race::{RaceResult, is_dnf, round_to, to_float, to_position};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Slopes with a smaller magnitude are "stable".
const STABLE_SLOPE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    /// Lower positions are better, so a negative slope is an improvement.
    pub fn from_slope(slope: f64) -> Self {
        if slope.abs() < STABLE_SLOPE {
            TrendDirection::Stable
        } else if slope < 0.0 {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Short-window form summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormIndicator {
    pub avg_position: f64,
    pub total_points: f64,
    pub trend_direction: TrendDirection,
    /// OLS slope of position against window index, three decimals.
    pub trend_slope: f64,
    /// Races with a usable finish inside the window; may be below the window size.
    pub races_analyzed: usize,
}

/// Form over the first `n_races` entries of `results`, as given.
///
/// Precondition: `results` is most-recent-first. Nothing is sorted here, and the
/// regression index follows input order, so a list in any other order silently
/// flips the trend. Callers holding a chronological season should use
/// [`recent_form`]. Returns `None` when no race in the window has a usable,
/// non-DNF finish.
pub fn form_indicator(results: &[RaceResult], n_races: usize) -> Option<FormIndicator> {
    summarize_window(results.iter().take(n_races))
}

/// Form over the latest `n_races` of a chronological (oldest-first) season.
///
/// The window is regressed oldest to newest, so "improving" means the driver's
/// placings got better over the window.
pub fn recent_form(chronological: &[RaceResult], n_races: usize) -> Option<FormIndicator> {
    let start = chronological.len().saturating_sub(n_races);
    summarize_window(chronological[start..].iter())
}

fn summarize_window<'a>(window: impl Iterator<Item = &'a RaceResult>) -> Option<FormIndicator> {
    let mut positions = Vec::new();
    let mut total_points = 0.0;

    for race in window {
        let Some(entry) = race.result() else {
            continue;
        };
        if is_dnf(&entry.status) {
            continue;
        }
        let Some(position) = to_position(entry.position.as_ref()) else {
            continue;
        };
        positions.push(f64::from(position));
        total_points += to_float(entry.points.as_ref(), 0.0);
    }

    if positions.is_empty() {
        debug!("Form: no usable finishes in window");
        return None;
    }

    let avg_position = positions.iter().sum::<f64>() / positions.len() as f64;
    let trend_slope = round_to(Stats::index_slope(&positions), 3);

    Some(FormIndicator {
        avg_position: round_to(avg_position, 2),
        total_points: round_to(total_points, 1),
        trend_direction: TrendDirection::from_slope(trend_slope),
        trend_slope,
        races_analyzed: positions.len(),
    })
}
