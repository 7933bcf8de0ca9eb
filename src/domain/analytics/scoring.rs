use crate::domain::race::{RaceResult, is_dnf, round_to, safe_divide, to_float};
use serde::Serialize;

/// Points efficiency over a set of races.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PointsSummary {
    pub total_points: f64,
    pub races_counted: usize,
    /// Two decimals; 0 when no race was counted.
    pub points_per_race: f64,
}

/// Points per race. With `exclude_dnf`, non-finishes are dropped from both the sum
/// and the race count.
pub fn points_per_race(results: &[RaceResult], exclude_dnf: bool) -> PointsSummary {
    let mut total_points = 0.0;
    let mut races_counted = 0;

    for race in results {
        if exclude_dnf && is_dnf(race.status()) {
            continue;
        }
        total_points += to_float(race.result().and_then(|r| r.points.as_ref()), 0.0);
        races_counted += 1;
    }

    PointsSummary {
        total_points,
        races_counted,
        points_per_race: round_to(safe_divide(total_points, races_counted as f64, 0.0), 2),
    }
}
