//! Pure booking logic used by the store and the UI layer.
//!
//! Nothing here touches the repository; every function works on slices of
//! already-loaded models.

pub mod bookings;
pub mod calendar;
pub mod display;
pub mod stats;

#[cfg(test)]
mod calendar_tests;

pub use bookings::{
    bookings_for_day, filter_bookings_by_date_range, filter_bookings_by_status,
    find_booking_by_id, find_station_by_id, group_bookings_by_date, has_active_bookings,
    is_valid_booking_data, search_stations, sort_bookings_by_date, station_names,
    unique_customers, SortDirection,
};
pub use calendar::{build_week, week_subtitle, week_title};
pub use display::{booking_day_kind, status_css_class, status_css_class_for, BookingDayKind};
pub use stats::{active_bookings_count, occupancy_rate, weekly_bookings_count, BookingStats};
