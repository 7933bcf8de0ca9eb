//! Analytics tunables parsed from environment variables.

use crate::domain::analytics::TrendMetric;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Analytics environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEnvConfig {
    pub consistency_min_races: usize,
    pub correlation_min_races: usize,
    pub form_window: usize,
    pub trend_metric: TrendMetric,
    pub cache_ttl: Duration,
}

impl Default for AnalyticsEnvConfig {
    fn default() -> Self {
        Self {
            consistency_min_races: 5,
            correlation_min_races: 5,
            form_window: 5,
            trend_metric: TrendMetric::Position,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl AnalyticsEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let parse_usize = |key: &str, default: usize| -> Result<usize> {
            lookup(key)
                .unwrap_or_else(|| default.to_string())
                .trim()
                .parse::<usize>()
                .context(format!("Failed to parse {}", key))
        };

        let form_window = parse_usize("PITWALL_FORM_WINDOW", defaults.form_window)?;
        if form_window == 0 {
            anyhow::bail!("PITWALL_FORM_WINDOW must be at least 1");
        }

        let trend_metric = match lookup("PITWALL_TREND_METRIC") {
            Some(s) => TrendMetric::from_str(&s).context("Failed to parse PITWALL_TREND_METRIC")?,
            None => defaults.trend_metric,
        };

        let ttl_secs = lookup("PITWALL_CACHE_TTL_SECS")
            .unwrap_or_else(|| defaults.cache_ttl.as_secs().to_string())
            .trim()
            .parse::<u64>()
            .context("Failed to parse PITWALL_CACHE_TTL_SECS")?;

        Ok(Self {
            consistency_min_races: parse_usize(
                "PITWALL_CONSISTENCY_MIN_RACES",
                defaults.consistency_min_races,
            )?,
            correlation_min_races: parse_usize(
                "PITWALL_CORRELATION_MIN_RACES",
                defaults.correlation_min_races,
            )?,
            form_window,
            trend_metric,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}
