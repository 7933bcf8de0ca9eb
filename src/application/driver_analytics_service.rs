use crate::application::analytics_cache::TtlCache;
use crate::domain::analytics::{
    ConsistencyMetrics, CorrelationResult, DnfReport, FormIndicator, PointsSummary,
    SeasonSummary, TrendMetric, TrendPoint, consistency_score, dnf_rate, performance_trends,
    points_per_race, qualifying_race_correlation, recent_form, season_summary,
};
use crate::domain::ports::RaceResultSource;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Tunables for one analytics run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSettings {
    pub trend_metric: TrendMetric,
    pub consistency_min_races: usize,
    pub correlation_min_races: usize,
    pub form_window: usize,
    pub cache_ttl: Duration,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            trend_metric: TrendMetric::Position,
            consistency_min_races: 5,
            correlation_min_races: 5,
            form_window: 5,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

/// Driver and season a report is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DriverSeason {
    pub driver_id: String,
    pub season: String,
}

impl DriverSeason {
    pub fn new(driver_id: &str, season: &str) -> Self {
        Self {
            driver_id: driver_id.to_string(),
            season: season.to_string(),
        }
    }
}

/// Everything that determines a report's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub target: DriverSeason,
    pub metric: TrendMetric,
    pub form_window: usize,
    pub consistency_min_races: usize,
    pub correlation_min_races: usize,
}

/// Full analytics payload handed to the presentation layer.
///
/// `consistency` and `form` are `None` when they cannot be computed; `correlation`
/// is only `None` for an empty season and otherwise carries its own
/// `insufficient_data` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverReport {
    pub driver_id: String,
    pub season: String,
    pub trend_metric: TrendMetric,
    pub trends: Vec<TrendPoint>,
    pub consistency: Option<ConsistencyMetrics>,
    pub reliability: DnfReport,
    pub points_all_races: PointsSummary,
    pub points_finished_races: PointsSummary,
    pub correlation: Option<CorrelationResult>,
    pub form: Option<FormIndicator>,
    pub summary: SeasonSummary,
}

/// Fetches a driver's season, orders it and runs every analytic over it.
pub struct DriverAnalyticsService {
    source: Arc<dyn RaceResultSource>,
    settings: AnalyticsSettings,
    cache: TtlCache<ReportKey, DriverReport>,
}

impl DriverAnalyticsService {
    pub fn new(source: Arc<dyn RaceResultSource>, settings: AnalyticsSettings) -> Self {
        let cache = TtlCache::new(settings.cache_ttl);
        Self {
            source,
            settings,
            cache,
        }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    fn key_for(&self, target: &DriverSeason) -> ReportKey {
        ReportKey {
            target: target.clone(),
            metric: self.settings.trend_metric,
            form_window: self.settings.form_window,
            consistency_min_races: self.settings.consistency_min_races,
            correlation_min_races: self.settings.correlation_min_races,
        }
    }

    /// Report for one driver, served from cache while fresh.
    pub fn report(&self, driver_id: &str, season: &str) -> Result<DriverReport> {
        let target = DriverSeason::new(driver_id, season);
        let key = self.key_for(&target);
        self.cache
            .get_or_insert_with(&key, || self.build_report(&target))
    }

    /// Reports for many drivers, computed in parallel. Failures stay per driver.
    pub fn reports(&self, targets: &[DriverSeason]) -> Vec<(DriverSeason, Result<DriverReport>)> {
        targets
            .par_iter()
            .map(|target| {
                let report = self.report(&target.driver_id, &target.season);
                (target.clone(), report)
            })
            .collect()
    }

    /// Trend series only, in chronological order.
    pub fn trends(&self, driver_id: &str, season: &str, metric: TrendMetric) -> Result<Vec<TrendPoint>> {
        let mut results = self
            .source
            .driver_race_results(driver_id, season)
            .with_context(|| format!("Failed to load results for {} ({})", driver_id, season))?;
        results.sort_by_key(|r| r.round);
        Ok(performance_trends(&results, metric))
    }

    pub fn purge_cache(&self) -> usize {
        self.cache.purge_expired()
    }

    fn build_report(&self, target: &DriverSeason) -> Result<DriverReport> {
        let mut results = self
            .source
            .driver_race_results(&target.driver_id, &target.season)
            .with_context(|| {
                format!(
                    "Failed to load results for {} ({})",
                    target.driver_id, target.season
                )
            })?;

        // Every analytic reads the season oldest-first
        results.sort_by_key(|r| r.round);

        info!(
            "Analyzing {} races for {} ({})",
            results.len(),
            target.driver_id,
            target.season
        );

        let settings = &self.settings;
        let consistency = consistency_score(&results, settings.consistency_min_races);
        if consistency.is_none() {
            warn!(
                "Not enough completed races for a consistency score for {} (need {})",
                target.driver_id, settings.consistency_min_races
            );
        }

        let correlation = qualifying_race_correlation(&results, settings.correlation_min_races);
        if let Some(c) = correlation.as_ref().filter(|c| c.insufficient_data) {
            warn!(
                "Qualifying correlation for {}: only {} valid races ({} missing grid/finish data)",
                target.driver_id, c.races_analyzed, c.missing_data_count
            );
        }

        let form = recent_form(&results, settings.form_window);

        Ok(DriverReport {
            driver_id: target.driver_id.clone(),
            season: target.season.clone(),
            trend_metric: settings.trend_metric,
            trends: performance_trends(&results, settings.trend_metric),
            consistency,
            reliability: dnf_rate(&results),
            points_all_races: points_per_race(&results, false),
            points_finished_races: points_per_race(&results, true),
            correlation,
            form,
            summary: season_summary(&results),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::TrendDirection;
    use crate::domain::race::{DriverResult, RaceResult};
    use crate::infrastructure::mock::InMemorySource;

    fn season() -> Vec<RaceResult> {
        // Stored out of order on purpose
        let mut races: Vec<RaceResult> = [(3, 5), (1, 9), (6, 2), (2, 7), (5, 3), (4, 4)]
            .iter()
            .map(|(round, position)| {
                RaceResult::new(
                    *round,
                    &format!("Round {}", round),
                    None,
                    DriverResult::finished(*position, 10.0, *position + 1),
                )
            })
            .collect();
        races.push(RaceResult::new(7, "Round 7", None, DriverResult::retired("Hydraulics", 3)));
        races
    }

    fn service(settings: AnalyticsSettings) -> (Arc<InMemorySource>, DriverAnalyticsService) {
        let source = Arc::new(InMemorySource::new());
        source.insert("norris", "2024", season());
        let service = DriverAnalyticsService::new(source.clone(), settings);
        (source, service)
    }

    #[test]
    fn test_report_orders_races_chronologically() {
        let (_, service) = service(AnalyticsSettings::default());
        let report = service.report("norris", "2024").unwrap();

        let rounds: Vec<u32> = report.trends.iter().map(|p| p.round).collect();
        assert_eq!(rounds, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(report.reliability.dnf_count, 1);
        assert_eq!(report.points_all_races.races_counted, 7);
        assert_eq!(report.points_finished_races.races_counted, 6);
        assert_eq!(report.consistency.as_ref().unwrap().completed_races, 6);
        assert!(!report.correlation.as_ref().unwrap().insufficient_data);
    }

    #[test]
    fn test_form_uses_most_recent_races() {
        let (_, service) = service(AnalyticsSettings::default());
        let form = service.report("norris", "2024").unwrap().form.unwrap();

        // Window = rounds 3..=7, round 7 is a DNF: positions [5, 4, 3, 2]
        assert_eq!(form.races_analyzed, 4);
        assert_eq!(form.trend_direction, TrendDirection::Improving);
        assert!((form.avg_position - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_report_is_cached() {
        let (source, service) = service(AnalyticsSettings::default());
        let first = service.report("norris", "2024").unwrap();

        source.insert("norris", "2024", Vec::new());
        let second = service.report("norris", "2024").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_ttl_recomputes() {
        let settings = AnalyticsSettings {
            cache_ttl: Duration::ZERO,
            ..Default::default()
        };
        let (source, service) = service(settings);
        service.report("norris", "2024").unwrap();

        source.insert("norris", "2024", Vec::new());
        let report = service.report("norris", "2024").unwrap();
        assert!(report.trends.is_empty());
        assert!(report.correlation.is_none());
        assert!(report.consistency.is_none());
        assert!(report.form.is_none());
        assert_eq!(report.reliability, DnfReport::default());
    }

    #[test]
    fn test_unknown_driver_is_an_error() {
        let (_, service) = service(AnalyticsSettings::default());
        let err = service.report("unknown", "2024").unwrap_err();
        assert!(format!("{:#}", err).contains("unknown"));
    }

    #[test]
    fn test_parallel_reports_keep_failures_per_driver() {
        let (_, service) = service(AnalyticsSettings::default());
        let targets = vec![
            DriverSeason::new("norris", "2024"),
            DriverSeason::new("piastri", "2024"),
        ];

        let reports = service.reports(&targets);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].1.is_ok());
        assert!(reports[1].1.is_err());
        assert_eq!(reports[1].0.driver_id, "piastri");
    }

    #[test]
    fn test_trends_with_points_metric() {
        let (_, service) = service(AnalyticsSettings::default());
        let trends = service.trends("norris", "2024", TrendMetric::Points).unwrap();
        assert_eq!(trends.len(), 7);
        assert_eq!(trends[6].metric_value, Some(0.0));
    }
}
