use crate::domain::race::{RaceResult, to_float, to_position};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric plotted by the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMetric {
    #[default]
    Position,
    Points,
}

impl FromStr for TrendMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "position" => Ok(TrendMetric::Position),
            "points" => Ok(TrendMetric::Points),
            _ => anyhow::bail!("Invalid trend metric: {}. Must be 'position' or 'points'", s),
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendMetric::Position => write!(f, "position"),
            TrendMetric::Points => write!(f, "points"),
        }
    }
}

/// One race on the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub race_name: String,
    pub race_date: Option<NaiveDate>,
    pub round: u32,
    /// `None` for a non-finish when plotting positions.
    pub metric_value: Option<f64>,
}

/// One point per race, in input order. Non-finishes are kept; their position is `None`.
pub fn performance_trends(results: &[RaceResult], metric: TrendMetric) -> Vec<TrendPoint> {
    results
        .iter()
        .map(|race| {
            let entry = race.result();
            let metric_value = match metric {
                TrendMetric::Position => {
                    to_position(entry.and_then(|r| r.position.as_ref())).map(f64::from)
                }
                TrendMetric::Points => {
                    Some(to_float(entry.and_then(|r| r.points.as_ref()), 0.0).max(0.0))
                }
            };

            TrendPoint {
                race_name: race.race_name.clone(),
                race_date: race.date,
                round: race.round,
                metric_value,
            }
        })
        .collect()
}
