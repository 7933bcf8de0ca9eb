use crate::domain::errors::DataSourceError;
use crate::domain::race::RaceResult;

/// Supplies already-fetched race results for one driver and season.
///
/// Implementations own retrieval concerns (files, HTTP, retries); the analytics
/// only ever see the returned records.
pub trait RaceResultSource: Send + Sync {
    fn driver_race_results(
        &self,
        driver_id: &str,
        season: &str,
    ) -> Result<Vec<RaceResult>, DataSourceError>;
}
