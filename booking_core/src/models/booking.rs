use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::time::{calculate_duration, parse_date};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// All statuses, in the order used for seeded derivation.
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown booking status: {}", s))
    }
}

/// A booking as shown in the calendar.
///
/// Dates are kept as the ISO strings received from the backend; use
/// [`Booking::pickup`] / [`Booking::return_at`] for parsed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub station_id: String,
    pub station_name: String,
    pub pickup_date: String,
    pub return_date: String,
    pub duration: u32,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
}

impl Booking {
    pub fn pickup(&self) -> Option<NaiveDateTime> {
        parse_date(&self.pickup_date)
    }

    pub fn return_at(&self) -> Option<NaiveDateTime> {
        parse_date(&self.return_date)
    }

    /// Whether `[pickup, return]` intersects `[start, end]`.
    ///
    /// True when pickup or return falls inside the range, or the booking spans
    /// it entirely. Unparseable dates never overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let (Some(pickup), Some(ret)) = (self.pickup(), self.return_at()) else {
            return false;
        };
        let in_range = |t: NaiveDateTime| t >= start && t <= end;
        in_range(pickup) || in_range(ret) || (pickup <= start && ret >= end)
    }

    /// Pickup calendar day, if the pickup date parses.
    pub fn pickup_day(&self) -> Option<NaiveDate> {
        self.pickup().map(|p| p.date())
    }

    /// Replace both dates and recompute the derived duration.
    pub fn reschedule(&mut self, pickup_date: &str, return_date: &str) {
        self.pickup_date = pickup_date.to_string();
        self.return_date = return_date.to_string();
        self.duration = calculate_duration(pickup_date, return_date);
    }
}

/// A booking with the extra fields shown on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<u32>,
}

impl BookingDetail {
    pub fn id(&self) -> &str {
        &self.booking.id
    }
}

/// Booking record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBooking {
    pub id: String,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
    pub pickup_return_station_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_station: Option<String>,
}

/// One column of the weekly calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
    pub is_today: bool,
    pub is_weekend: bool,
}
