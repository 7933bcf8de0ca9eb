//! Safe numeric coercion and non-finish classification.
//!
//! Every analytic goes through these helpers so that malformed or missing feed
//! values collapse to a caller-chosen default instead of failing the whole call.

use super::types::RawValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position markers the feed uses for retired / withdrawn entries.
const NON_FINISH_MARKERS: [&str; 2] = ["R", "W"];

/// Status strings that count as a non-finish.
const DNF_STATUSES: [&str; 15] = [
    "Accident",
    "Engine",
    "Gearbox",
    "Transmission",
    "Clutch",
    "Hydraulics",
    "Electrical",
    "Collision",
    "Spun off",
    "Retired",
    "Mechanical",
    "Brakes",
    "Suspension",
    "Fuel pressure",
    "Overheating",
];

const MECHANICAL_CAUSES: [&str; 11] = [
    "Engine",
    "Gearbox",
    "Transmission",
    "Clutch",
    "Hydraulics",
    "Electrical",
    "Mechanical",
    "Brakes",
    "Suspension",
    "Fuel pressure",
    "Overheating",
];

const ACCIDENT_CAUSES: [&str; 3] = ["Accident", "Collision", "Spun off"];

/// Parse to an integer, falling back to `default` for missing, blank, non-numeric
/// or `"R"`/`"W"` values. Float inputs truncate toward zero; float *text* does not parse.
pub fn to_int(value: Option<&RawValue>, default: i64) -> i64 {
    match value {
        Some(RawValue::Int(v)) => *v,
        Some(RawValue::Float(v)) if v.is_finite() => v.trunc() as i64,
        Some(RawValue::Float(_)) => default,
        Some(RawValue::Text(s)) => {
            let s = s.trim();
            if NON_FINISH_MARKERS.contains(&s) {
                return default;
            }
            s.parse::<i64>().unwrap_or(default)
        }
        None => default,
    }
}

/// Parse to a float, falling back to `default` on failure.
pub fn to_float(value: Option<&RawValue>, default: f64) -> f64 {
    match value {
        Some(RawValue::Int(v)) => *v as f64,
        Some(RawValue::Float(v)) => *v,
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().unwrap_or(default),
        None => default,
    }
}

/// `numerator / denominator`, or `default` when the denominator is zero.
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 {
        default
    } else {
        numerator / denominator
    }
}

/// Positive integer or nothing; used wherever a position or grid slot must be usable.
pub fn to_position(value: Option<&RawValue>) -> Option<u32> {
    let v = to_int(value, 0);
    if v > 0 { u32::try_from(v).ok() } else { None }
}

/// Whether a status string denotes a non-finish.
///
/// Lapped finishers (`"+1 Lap"`, `"+3 Laps"`) are deliberately treated as
/// non-finishes even though they are classified and may score points.
/// Keep this rule as is: consistency, correlation and form all depend on it.
pub fn is_dnf(status: &str) -> bool {
    DNF_STATUSES.contains(&status) || status.starts_with('+')
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Bucket a non-finish cause falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DnfCategory {
    Mechanical,
    Accident,
    Other,
}

impl DnfCategory {
    /// Categorize a status already known to be a non-finish.
    pub fn classify(status: &str) -> Self {
        if MECHANICAL_CAUSES.contains(&status) {
            DnfCategory::Mechanical
        } else if ACCIDENT_CAUSES.contains(&status) {
            DnfCategory::Accident
        } else {
            DnfCategory::Other
        }
    }
}

impl fmt::Display for DnfCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
