use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading race results from a data source
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("No results for driver {driver_id} in season {season}")]
    NotFound { driver_id: String, season: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed race results in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {origin} has no RaceTable.Races array")]
    MissingRaceTable { origin: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_formatting() {
        let error = DataSourceError::NotFound {
            driver_id: "max_verstappen".to_string(),
            season: "2024".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("max_verstappen"));
        assert!(msg.contains("2024"));
    }

    #[test]
    fn test_missing_race_table_formatting() {
        let error = DataSourceError::MissingRaceTable {
            origin: "data/2024/alonso.json".to_string(),
        };
        assert!(error.to_string().contains("data/2024/alonso.json"));
    }
}
