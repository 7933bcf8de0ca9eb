//! Qualifying (grid) position versus race finish.
//!
//! Unlike the other analytics this one keeps reporting when the sample is too
//! small: the result is flagged with `insufficient_data` and still carries the
//! partial scatter data and a missing-data count, so a caller can show *why*
//! there is nothing to correlate. Only an empty race list yields `None`.
//! Do not collapse this into the plain `Option` convention used elsewhere.

use super::stats::Stats;
use crate::domain::race::{RaceResult, RawValue, is_dnf, round_to, to_position};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Below this coefficient the driver gains places on race day.
const RACE_PERFORMER_THRESHOLD: f64 = -0.3;
/// Above this coefficient the finish mostly mirrors the grid.
const QUALIFYING_DEPENDENT_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformerClass {
    #[serde(rename = "strong race performer")]
    StrongRacePerformer,
    #[serde(rename = "qualifying-dependent performer")]
    QualifyingDependent,
    #[serde(rename = "balanced performer")]
    Balanced,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl PerformerClass {
    /// Deterministic classification of a (possibly undefined) coefficient.
    pub fn from_coefficient(coefficient: Option<f64>) -> Self {
        match coefficient {
            None => PerformerClass::InsufficientData,
            Some(r) if r < RACE_PERFORMER_THRESHOLD => PerformerClass::StrongRacePerformer,
            Some(r) if r > QUALIFYING_DEPENDENT_THRESHOLD => PerformerClass::QualifyingDependent,
            Some(_) => PerformerClass::Balanced,
        }
    }
}

impl fmt::Display for PerformerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformerClass::StrongRacePerformer => "strong race performer",
            PerformerClass::QualifyingDependent => "qualifying-dependent performer",
            PerformerClass::Balanced => "balanced performer",
            PerformerClass::InsufficientData => "insufficient data",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub grid: u32,
    pub finish: u32,
    pub race_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Three decimals; `None` when undefined (zero variance) or not computed.
    pub correlation_coefficient: Option<f64>,
    /// Mean of `finish - grid`; negative means places gained. Two decimals.
    pub avg_position_change: Option<f64>,
    pub classification: PerformerClass,
    pub scatter_data: Vec<ScatterPoint>,
    /// Number of valid grid/finish pairs (equals `scatter_data.len()`).
    pub races_analyzed: usize,
    /// Races missing a grid or finish value, DNF or not.
    pub missing_data_count: usize,
    pub insufficient_data: bool,
}

fn is_missing(value: Option<&RawValue>) -> bool {
    value.is_none_or(RawValue::is_blank)
}

/// Correlate grid and finishing positions.
///
/// A race contributes only when grid and position are both present, both parse
/// to positive integers and the status is not a non-finish. Missing grid or
/// position increments `missing_data_count`; other exclusions are silent.
pub fn qualifying_race_correlation(
    results: &[RaceResult],
    min_races: usize,
) -> Option<CorrelationResult> {
    if results.is_empty() {
        return None;
    }

    let mut scatter_data = Vec::new();
    let mut missing_data_count = 0;

    for race in results {
        let Some(entry) = race.result() else {
            missing_data_count += 1;
            continue;
        };

        if is_missing(entry.grid.as_ref()) || is_missing(entry.position.as_ref()) {
            missing_data_count += 1;
            continue;
        }

        if is_dnf(&entry.status) {
            continue;
        }

        if let (Some(grid), Some(finish)) = (
            to_position(entry.grid.as_ref()),
            to_position(entry.position.as_ref()),
        ) {
            scatter_data.push(ScatterPoint {
                grid,
                finish,
                race_name: race.race_name.clone(),
            });
        }
    }

    let races_analyzed = scatter_data.len();

    if races_analyzed < min_races {
        debug!(
            "Correlation: {} valid grid/finish pairs < minimum {} ({} missing)",
            races_analyzed, min_races, missing_data_count
        );
        return Some(CorrelationResult {
            correlation_coefficient: None,
            avg_position_change: None,
            classification: PerformerClass::InsufficientData,
            scatter_data,
            races_analyzed,
            missing_data_count,
            insufficient_data: true,
        });
    }

    let grids: Vec<f64> = scatter_data.iter().map(|p| f64::from(p.grid)).collect();
    let finishes: Vec<f64> = scatter_data.iter().map(|p| f64::from(p.finish)).collect();

    let coefficient = Stats::pearson(&grids, &finishes).map(|r| round_to(r, 3));
    let total_change: f64 = grids.iter().zip(&finishes).map(|(g, f)| f - g).sum();
    let avg_position_change = round_to(total_change / races_analyzed as f64, 2);

    Some(CorrelationResult {
        correlation_coefficient: coefficient,
        avg_position_change: Some(avg_position_change),
        classification: PerformerClass::from_coefficient(coefficient),
        scatter_data,
        races_analyzed,
        missing_data_count,
        insufficient_data: false,
    })
}
