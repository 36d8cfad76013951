//! Pure helpers over booking and station lists.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{Booking, BookingStatus, Station};
use crate::time::{format_date_iso, start_of_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Group bookings by pickup day (`YYYY-MM-DD`).
///
/// Bookings whose pickup date does not parse are left out.
pub fn group_bookings_by_date(bookings: &[Booking]) -> BTreeMap<String, Vec<Booking>> {
    let mut groups: BTreeMap<String, Vec<Booking>> = BTreeMap::new();
    for booking in bookings {
        if let Some(day) = booking.pickup_day() {
            groups
                .entry(format_date_iso(day))
                .or_default()
                .push(booking.clone());
        }
    }
    groups
}

/// Customer names in first-seen order.
pub fn unique_customers(bookings: &[Booking]) -> Vec<String> {
    let mut seen = HashSet::new();
    bookings
        .iter()
        .filter(|b| seen.insert(b.customer_name.as_str()))
        .map(|b| b.customer_name.clone())
        .collect()
}

/// Stable sort by pickup time. Unparseable pickups sort last.
pub fn sort_bookings_by_date(bookings: &[Booking], direction: SortDirection) -> Vec<Booking> {
    let mut sorted = bookings.to_vec();
    sorted.sort_by(|a, b| match (a.pickup(), b.pickup()) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Asc => x.cmp(&y),
            SortDirection::Desc => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

pub fn filter_bookings_by_status(bookings: &[Booking], statuses: &[BookingStatus]) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| statuses.contains(&b.status))
        .cloned()
        .collect()
}

/// Bookings overlapping `[start, end]`, see [`Booking::overlaps`].
pub fn filter_bookings_by_date_range(
    bookings: &[Booking],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| b.overlaps(start, end))
        .cloned()
        .collect()
}

/// Bookings shown on `day`: picked up or returned that day, or spanning it.
pub fn bookings_for_day(bookings: &[Booking], day: NaiveDate) -> Vec<Booking> {
    let midnight = start_of_day(day);
    bookings
        .iter()
        .filter(|b| {
            let (Some(pickup), Some(ret)) = (b.pickup(), b.return_at()) else {
                return false;
            };
            pickup.date() == day || ret.date() == day || (pickup < midnight && ret > midnight)
        })
        .cloned()
        .collect()
}

pub fn find_booking_by_id<'a>(bookings: &'a [Booking], id: &str) -> Option<&'a Booking> {
    bookings.iter().find(|b| b.id == id)
}

/// Whether any booking is strictly in progress at `at`.
pub fn has_active_bookings(bookings: &[Booking], at: NaiveDateTime) -> bool {
    bookings.iter().any(|b| match (b.pickup(), b.return_at()) {
        (Some(pickup), Some(ret)) => pickup < at && ret > at,
        _ => false,
    })
}

pub fn find_station_by_id<'a>(stations: &'a [Station], id: &str) -> Option<&'a Station> {
    stations.iter().find(|s| s.id == id)
}

/// Case-insensitive name/address search over an in-memory list.
pub fn search_stations(stations: &[Station], query: &str) -> Vec<Station> {
    stations
        .iter()
        .filter(|s| s.matches(query))
        .cloned()
        .collect()
}

pub fn station_names(stations: &[Station]) -> Vec<String> {
    stations.iter().map(|s| s.name.clone()).collect()
}

/// Customer, station and both dates must be non-blank.
pub fn is_valid_booking_data(booking: &Booking) -> bool {
    [
        &booking.customer_name,
        &booking.pickup_date,
        &booking.return_date,
        &booking.station_id,
    ]
    .iter()
    .all(|field| !field.trim().is_empty())
}
