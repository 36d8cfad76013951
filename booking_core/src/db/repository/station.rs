use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::Station;

/// Read access to the station catalog.
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Stations whose name or address contains `query`, ignoring case.
    ///
    /// A blank query returns every station.
    async fn search_stations(&self, query: &str) -> AppResult<Vec<Station>>;

    async fn get_all_stations(&self) -> AppResult<Vec<Station>>;

    /// # Returns
    /// * `Ok(Some(station))` if the id exists
    /// * `Ok(None)` if it does not
    async fn get_station_by_id(&self, id: &str) -> AppResult<Option<Station>>;
}
