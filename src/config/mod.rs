//! Configuration loading from environment variables.
//!
//! Split by concern: analytics tunables and data source location.

mod analytics_config;
mod data_config;

pub use analytics_config::AnalyticsEnvConfig;
pub use data_config::DataEnvConfig;

use crate::application::driver_analytics_service::AnalyticsSettings;
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub analytics: AnalyticsEnvConfig,
    pub data: DataEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let analytics = AnalyticsEnvConfig::from_env().context("Failed to load analytics config")?;
        let data = DataEnvConfig::from_env();
        Ok(Self { analytics, data })
    }

    pub fn analytics_settings(&self) -> AnalyticsSettings {
        AnalyticsSettings {
            trend_metric: self.analytics.trend_metric,
            consistency_min_races: self.analytics.consistency_min_races,
            correlation_min_races: self.analytics.correlation_min_races,
            form_window: self.analytics.form_window,
            cache_ttl: self.analytics.cache_ttl,
        }
    }
}
