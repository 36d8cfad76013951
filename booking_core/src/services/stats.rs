//! Booking statistics for the calendar header.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{Booking, BookingStatus};
use crate::time::WeekRange;

use super::bookings::unique_customers;

/// Totals over a booking list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_bookings: usize,
    pub unique_customers: usize,
    pub confirmed_bookings: usize,
    pub in_progress_bookings: usize,
    pub completed_bookings: usize,
    pub cancelled_bookings: usize,
}

impl BookingStats {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let count = |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();
        Self {
            total_bookings: bookings.len(),
            unique_customers: unique_customers(bookings).len(),
            confirmed_bookings: count(BookingStatus::Confirmed),
            in_progress_bookings: count(BookingStatus::InProgress),
            completed_bookings: count(BookingStatus::Completed),
            cancelled_bookings: count(BookingStatus::Cancelled),
        }
    }
}

/// Bookings in progress at `now` that also touch `week`.
pub fn active_bookings_count(bookings: &[Booking], now: NaiveDateTime, week: &WeekRange) -> usize {
    bookings
        .iter()
        .filter(|b| match (b.pickup(), b.return_at()) {
            (Some(pickup), Some(ret)) => {
                let active = pickup <= now && ret >= now;
                let in_week = pickup <= week.end && ret >= week.start;
                active && in_week
            }
            _ => false,
        })
        .count()
}

/// Percentage of the week's 7 days covered by at least one booking.
pub fn occupancy_rate(bookings: &[Booking], week: &WeekRange) -> f64 {
    if bookings.is_empty() {
        return 0.0;
    }

    let mut covered = BTreeSet::new();
    for booking in bookings {
        let (Some(pickup), Some(ret)) = (booking.pickup(), booking.return_at()) else {
            continue;
        };
        let last = ret.date().min(week.last_day());
        let mut day = pickup.date().max(week.first_day());
        while day <= last {
            covered.insert(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }

    covered.len() as f64 / 7.0 * 100.0
}

/// Bookings picked up or returned during `week`, or spanning it strictly.
pub fn weekly_bookings_count(bookings: &[Booking], week: &WeekRange) -> usize {
    bookings
        .iter()
        .filter(|b| match (b.pickup(), b.return_at()) {
            (Some(pickup), Some(ret)) => {
                week.contains(pickup) || week.contains(ret) || (pickup < week.start && ret > week.end)
            }
            _ => false,
        })
        .count()
}
