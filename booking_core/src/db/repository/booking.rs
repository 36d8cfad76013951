use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::AppResult;
use crate::models::{Booking, BookingDetail};

/// Booking queries and mutations.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings of `station_id` whose period overlaps `[start, end]`.
    ///
    /// Unknown stations yield an empty list.
    async fn get_bookings_for_station(
        &self,
        station_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Booking>>;

    /// Full detail for one booking, `None` if no station has it.
    async fn get_booking_detail(&self, id: &str) -> AppResult<Option<BookingDetail>>;

    /// Move a booking to new dates.
    ///
    /// # Returns
    /// * `Ok(true)` if the backend accepted the change
    /// * `Ok(false)` if it was rejected
    async fn reschedule_booking(
        &self,
        id: &str,
        pickup_date: &str,
        return_date: &str,
    ) -> AppResult<bool>;
}
