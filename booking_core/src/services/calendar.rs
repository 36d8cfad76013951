//! Weekly calendar view-model.

use chrono::{Datelike, NaiveDate};

use crate::models::{Booking, CalendarDay};
use crate::time::{get_week_days, is_weekend};

use super::bookings::bookings_for_day;

/// The seven Monday-first columns of the week containing `anchor`.
///
/// # Arguments
/// * `anchor` - Any date in the week to display
/// * `bookings` - Bookings to distribute over the days
/// * `today` - Date flagged as today
pub fn build_week(anchor: NaiveDate, bookings: &[Booking], today: NaiveDate) -> Vec<CalendarDay> {
    get_week_days(anchor)
        .into_iter()
        .map(|date| CalendarDay {
            date,
            bookings: bookings_for_day(bookings, date),
            is_today: date == today,
            is_weekend: is_weekend(date),
        })
        .collect()
}

/// `August 2025`, or `July - August 2025` when the week spans two months.
///
/// The year is taken from the Monday.
pub fn week_title(anchor: NaiveDate) -> String {
    let days = get_week_days(anchor);
    let first = days[0];
    let last = days[6];
    let first_month = first.format("%B").to_string();
    let last_month = last.format("%B").to_string();

    if first_month == last_month {
        format!("{} {}", first_month, first.year())
    } else {
        format!("{} - {} {}", first_month, last_month, first.year())
    }
}

/// Day-of-month span, e.g. `28 - 3`.
pub fn week_subtitle(anchor: NaiveDate) -> String {
    let days = get_week_days(anchor);
    format!("{} - {}", days[0].day(), days[6].day())
}
