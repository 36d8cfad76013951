//! Conversion from backend records to client models.

use crate::models::{Booking, BookingDetail, RawBooking, Station};
use crate::time::calculate_duration;

use super::seeded;

pub const UNKNOWN_STATION: &str = "Unknown Station";

/// Build a [`Booking`] from a raw record.
///
/// The station name falls back to [`UNKNOWN_STATION`]; duration and status are
/// derived.
pub fn to_booking(raw: &RawBooking, station: Option<&Station>) -> Booking {
    Booking {
        id: raw.id.clone(),
        customer_name: raw.customer_name.clone(),
        station_id: raw.pickup_return_station_id.clone(),
        station_name: station
            .map(|s| s.name.clone())
            .unwrap_or_else(|| UNKNOWN_STATION.to_string()),
        pickup_date: raw.start_date.clone(),
        return_date: raw.end_date.clone(),
        duration: calculate_duration(&raw.start_date, &raw.end_date),
        status: seeded::seeded_status(&raw.id),
        vehicle_model: None,
    }
}

/// Attach the seeded detail fields to a booking.
pub fn to_detail(booking: Booking) -> BookingDetail {
    BookingDetail {
        customer_email: Some(seeded::customer_email(&booking.customer_name)),
        vehicle_type: Some(seeded::seeded_vehicle_type(&booking.id).to_string()),
        total_price: Some(seeded::seeded_price(&booking.id)),
        booking,
    }
}
