//! File-backed source for Ergast-style result payloads.
//!
//! Expects one file per driver and season at `<data_dir>/<season>/<driver_id>.json`,
//! holding either a complete `MRData.RaceTable.Races` response or the bare races
//! array.

use crate::domain::errors::DataSourceError;
use crate::domain::ports::RaceResultSource;
use crate::domain::race::RaceResult;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ErgastJsonSource {
    data_dir: PathBuf,
}

impl ErgastJsonSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, driver_id: &str, season: &str) -> PathBuf {
        self.data_dir
            .join(season)
            .join(format!("{}.json", driver_id))
    }
}

impl RaceResultSource for ErgastJsonSource {
    fn driver_race_results(
        &self,
        driver_id: &str,
        season: &str,
    ) -> Result<Vec<RaceResult>, DataSourceError> {
        let path = self.path_for(driver_id, season);
        debug!("ErgastJsonSource: reading {:?}", path);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataSourceError::NotFound {
                    driver_id: driver_id.to_string(),
                    season: season.to_string(),
                });
            }
            Err(source) => return Err(DataSourceError::Io { path, source }),
        };

        let races = parse_races(&content, &path.display().to_string())?;
        info!(
            "Loaded {} races for {} ({}) from {:?}",
            races.len(),
            driver_id,
            season,
            path
        );
        Ok(races)
    }
}

/// Parse a results payload into races.
///
/// `origin` only labels errors.
pub fn parse_races(json: &str, origin: &str) -> Result<Vec<RaceResult>, DataSourceError> {
    let parse_err = |source| DataSourceError::Parse {
        origin: origin.to_string(),
        source,
    };

    let mut payload: Value = serde_json::from_str(json).map_err(parse_err)?;

    let races = if payload.is_array() {
        payload
    } else {
        payload
            .pointer_mut("/MRData/RaceTable/Races")
            .filter(|races| races.is_array())
            .map(Value::take)
            .ok_or_else(|| DataSourceError::MissingRaceTable {
                origin: origin.to_string(),
            })?
    };

    serde_json::from_value(races).map_err(parse_err)
}
