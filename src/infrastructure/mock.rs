use crate::domain::errors::DataSourceError;
use crate::domain::ports::RaceResultSource;
use crate::domain::race::RaceResult;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory result store for tests and offline runs.
#[derive(Default)]
pub struct InMemorySource {
    seasons: RwLock<HashMap<(String, String), Vec<RaceResult>>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) a driver's season.
    pub fn insert(&self, driver_id: &str, season: &str, results: Vec<RaceResult>) {
        let key = (driver_id.to_string(), season.to_string());
        match self.seasons.write() {
            Ok(mut guard) => {
                guard.insert(key, results);
            }
            Err(poisoned) => {
                tracing::error!("InMemorySource: Lock poisoned during write, recovering");
                poisoned.into_inner().insert(key, results);
            }
        }
    }
}

impl RaceResultSource for InMemorySource {
    fn driver_race_results(
        &self,
        driver_id: &str,
        season: &str,
    ) -> Result<Vec<RaceResult>, DataSourceError> {
        let guard = match self.seasons.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard
            .get(&(driver_id.to_string(), season.to_string()))
            .cloned()
            .ok_or_else(|| DataSourceError::NotFound {
                driver_id: driver_id.to_string(),
                season: season.to_string(),
            })
    }
}
