use pitwall::domain::analytics::{
    PerformerClass, TrendDirection, TrendMetric, consistency_score, dnf_rate, form_indicator,
    performance_trends, points_per_race, qualifying_race_correlation,
};
use pitwall::domain::race::{DriverResult, RaceResult, is_dnf};
use proptest::prelude::*;

const STATUSES: &[&str] = &["Finished", "Finished", "Finished", "Engine", "Accident", "+1 Lap", "Retired", "Disqualified"];

/// One race: (grid, position, points, status index)
fn race_strategy() -> impl Strategy<Value = (u32, u32, u32, usize)> {
    (1u32..=20, 1u32..=20, 0u32..=26, 0..STATUSES.len())
}

fn build_season(raw: &[(u32, u32, u32, usize)]) -> Vec<RaceResult> {
    raw.iter()
        .enumerate()
        .map(|(i, (grid, position, points, status))| {
            let round = i as u32 + 1;
            let status = STATUSES[*status];
            let result = if status == "Finished" || status == "Disqualified" {
                DriverResult::finished(*position, f64::from(*points), *grid).with_status(status)
            } else if status.starts_with('+') {
                // Lapped finishers here never score
                DriverResult::finished(*position, 0.0, *grid).with_status(status)
            } else {
                DriverResult::retired(status, *grid)
            };
            RaceResult::new(round, &format!("Grand Prix {}", round), None, result)
        })
        .collect()
}

fn season_strategy() -> impl Strategy<Value = Vec<RaceResult>> {
    prop::collection::vec(race_strategy(), 0..24).prop_map(|raw| build_season(&raw))
}

proptest! {
    #[test]
    fn prop_trends_keep_one_point_per_race(season in season_strategy()) {
        for metric in [TrendMetric::Position, TrendMetric::Points] {
            let trends = performance_trends(&season, metric);
            prop_assert_eq!(trends.len(), season.len());
            for (point, race) in trends.iter().zip(&season) {
                prop_assert_eq!(point.round, race.round);
                if let Some(value) = point.metric_value {
                    match metric {
                        TrendMetric::Position => prop_assert!((1.0..=20.0).contains(&value)),
                        TrendMetric::Points => prop_assert!(value >= 0.0),
                    }
                }
            }
        }
    }

    #[test]
    fn prop_consistency_score_bounds(season in season_strategy(), min_races in 1usize..8) {
        let completed = season.iter().filter(|r| r.status() == "Finished").count();
        match consistency_score(&season, min_races) {
            None => prop_assert!(completed < min_races),
            Some(metrics) => {
                prop_assert!(completed >= min_races);
                prop_assert_eq!(metrics.completed_races, completed);
                prop_assert!((0.0..=100.0).contains(&metrics.consistency_score));
                let expected = (100.0 - metrics.std_dev * 10.0).max(0.0);
                prop_assert!((metrics.consistency_score - expected).abs() <= 0.11);
            }
        }
    }

    #[test]
    fn prop_identical_positions_score_100(position in 1u32..=20, races in 5usize..12) {
        let season: Vec<RaceResult> = (1..=races as u32)
            .map(|round| RaceResult::new(round, "GP", None, DriverResult::finished(position, 10.0, position)))
            .collect();
        let metrics = consistency_score(&season, 5).unwrap();
        prop_assert_eq!(metrics.std_dev, 0.0);
        prop_assert_eq!(metrics.consistency_score, 100.0);
        prop_assert_eq!(metrics.avg_position, f64::from(position));
    }

    #[test]
    fn prop_dnf_buckets_sum_to_count(season in season_strategy()) {
        let report = dnf_rate(&season);
        let expected = season.iter().filter(|r| is_dnf(r.status())).count();
        prop_assert_eq!(report.dnf_count, expected);
        prop_assert_eq!(report.total_races, season.len());
        prop_assert_eq!(report.dnf_causes.values().sum::<usize>(), expected);
        if !season.is_empty() {
            let pct = expected as f64 * 100.0 / season.len() as f64;
            prop_assert!((report.dnf_percentage - pct).abs() <= 0.051);
        } else {
            prop_assert_eq!(report.dnf_percentage, 0.0);
        }
    }

    #[test]
    fn prop_points_total_ignores_dnf_filter(season in season_strategy()) {
        let all = points_per_race(&season, false);
        let finished = points_per_race(&season, true);
        let non_dnf = season.iter().filter(|r| !is_dnf(r.status())).count();

        prop_assert_eq!(all.races_counted, season.len());
        prop_assert_eq!(finished.races_counted, non_dnf);
        // Non-finishers score nothing, so the filter never changes the total
        prop_assert!((all.total_points - finished.total_points).abs() < 1e-9);
    }

    #[test]
    fn prop_correlation_shape(season in season_strategy(), min_races in 2usize..8) {
        match qualifying_race_correlation(&season, min_races) {
            None => prop_assert!(season.is_empty()),
            Some(result) => {
                prop_assert_eq!(result.scatter_data.len(), result.races_analyzed);
                prop_assert_eq!(result.insufficient_data, result.races_analyzed < min_races);
                if let Some(r) = result.correlation_coefficient {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
                if !result.insufficient_data {
                    prop_assert_eq!(
                        result.classification,
                        PerformerClass::from_coefficient(result.correlation_coefficient)
                    );
                }
            }
        }
    }

    #[test]
    fn prop_form_window_bounds(season in season_strategy(), window in 1usize..10) {
        if let Some(form) = form_indicator(&season, window) {
            prop_assert!(form.races_analyzed >= 1);
            prop_assert!(form.races_analyzed <= window.min(season.len()));
            prop_assert_eq!(form.trend_direction, TrendDirection::from_slope(form.trend_slope));
        }
    }

    #[test]
    fn prop_constant_form_is_stable(position in 1u32..=20, window in 1usize..8) {
        let season: Vec<RaceResult> = (1..=8)
            .map(|round| RaceResult::new(round, "GP", None, DriverResult::finished(position, 1.0, position)))
            .collect();
        let form = form_indicator(&season, window).unwrap();
        prop_assert!(form.trend_slope.abs() < 1e-9);
        prop_assert_eq!(form.trend_direction, TrendDirection::Stable);
    }
}
