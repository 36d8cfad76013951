//! In-memory mock backend.
//!
//! Serves the seed [`Catalog`] with a fixed latency per operation. Derived
//! booking fields come from the seeded generator, so results are stable
//! across calls. Rescheduling is accepted at random with a configurable rate
//! and never mutates the catalog.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info};
use rand::Rng;

use crate::db::catalog::Catalog;
use crate::db::config::MockOptions;
use crate::db::repository::{BookingRepository, StationRepository};
use crate::db::transform::{to_booking, to_detail};
use crate::error::AppResult;
use crate::models::{Booking, BookingDetail, Station};

// Simulated latency per operation.
const SEARCH_LATENCY: Duration = Duration::from_millis(300);
const ALL_STATIONS_LATENCY: Duration = Duration::from_millis(200);
const STATION_LATENCY: Duration = Duration::from_millis(150);
const BOOKINGS_LATENCY: Duration = Duration::from_millis(500);
const DETAIL_LATENCY: Duration = Duration::from_millis(400);
const RESCHEDULE_LATENCY: Duration = Duration::from_millis(800);

/// Mock repository backed by a read-only catalog.
///
/// # Example
/// ```no_run
/// use booking_core::db::repositories::MockRepository;
/// use booking_core::db::StationRepository;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = MockRepository::new().without_latency();
///     let stations = repo.search_stations("berlin").await?;
///     assert_eq!(stations[0].id, "1");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MockRepository {
    catalog: &'static Catalog,
    options: MockOptions,
}

impl MockRepository {
    /// Mock over the built-in dataset with default options.
    pub fn new() -> Self {
        Self::with_options(MockOptions::default())
    }

    pub fn with_options(options: MockOptions) -> Self {
        Self {
            catalog: Catalog::seed(),
            options,
        }
    }

    /// Serve a custom catalog.
    pub fn with_catalog(catalog: &'static Catalog, options: MockOptions) -> Self {
        Self { catalog, options }
    }

    /// Disable the simulated latency.
    pub fn without_latency(mut self) -> Self {
        self.options.simulate_latency = false;
        self
    }

    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.options.reschedule_success_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn options(&self) -> MockOptions {
        self.options
    }

    async fn latency(&self, duration: Duration) {
        if self.options.simulate_latency {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StationRepository for MockRepository {
    async fn search_stations(&self, query: &str) -> AppResult<Vec<Station>> {
        self.latency(SEARCH_LATENCY).await;
        Ok(self
            .catalog
            .stations()
            .iter()
            .filter(|s| s.matches(query))
            .cloned()
            .collect())
    }

    async fn get_all_stations(&self) -> AppResult<Vec<Station>> {
        self.latency(ALL_STATIONS_LATENCY).await;
        Ok(self.catalog.stations().to_vec())
    }

    async fn get_station_by_id(&self, id: &str) -> AppResult<Option<Station>> {
        self.latency(STATION_LATENCY).await;
        Ok(self.catalog.station(id).cloned())
    }
}

#[async_trait]
impl BookingRepository for MockRepository {
    async fn get_bookings_for_station(
        &self,
        station_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Booking>> {
        self.latency(BOOKINGS_LATENCY).await;

        let station = self.catalog.station(station_id);
        let bookings: Vec<Booking> = self
            .catalog
            .bookings_for(station_id)
            .iter()
            .map(|raw| to_booking(raw, station))
            .filter(|b| b.overlaps(start, end))
            .collect();

        debug!(
            "Station {} has {} bookings between {} and {}",
            station_id,
            bookings.len(),
            start,
            end
        );
        Ok(bookings)
    }

    async fn get_booking_detail(&self, id: &str) -> AppResult<Option<BookingDetail>> {
        self.latency(DETAIL_LATENCY).await;

        let Some((station_id, raw)) = self.catalog.find_booking(id) else {
            debug!("Booking {} not found in any station", id);
            return Ok(None);
        };
        let booking = to_booking(raw, self.catalog.station(station_id));
        Ok(Some(to_detail(booking)))
    }

    async fn reschedule_booking(
        &self,
        id: &str,
        pickup_date: &str,
        return_date: &str,
    ) -> AppResult<bool> {
        info!(
            "Reschedule booking {}: pickup {} return {}",
            id, pickup_date, return_date
        );
        self.latency(RESCHEDULE_LATENCY).await;

        let rate = self.options.reschedule_success_rate;
        let accepted = rate >= 1.0 || (rate > 0.0 && rand::thread_rng().gen_bool(rate));
        Ok(accepted)
    }
}
