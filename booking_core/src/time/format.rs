use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// `Sat, Aug 9`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// `Saturday, August 9, 2025`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `2025-08-09`
pub fn format_date_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `2025-08-09T14:30`
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M").to_string()
}

/// `14:30`
pub fn format_time(value: NaiveDateTime) -> String {
    value.format("%H:%M").to_string()
}

/// `Aug 11 - Aug 17`, or `Dec 29, 2025 - Jan 4, 2026` across a year boundary.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() {
        format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
    } else {
        format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
    }
}

pub fn is_date_before(date: Option<NaiveDateTime>, other: Option<NaiveDateTime>) -> bool {
    matches!((date, other), (Some(a), Some(b)) if a < b)
}

pub fn is_date_after(date: Option<NaiveDateTime>, other: Option<NaiveDateTime>) -> bool {
    matches!((date, other), (Some(a), Some(b)) if a > b)
}

pub fn is_date_equal(date: Option<NaiveDateTime>, other: Option<NaiveDateTime>) -> bool {
    matches!((date, other), (Some(a), Some(b)) if a == b)
}
