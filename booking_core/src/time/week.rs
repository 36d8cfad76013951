use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Inclusive bounds of a Monday-first week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    /// Monday 00:00:00.000
    pub start: NaiveDateTime,
    /// Sunday 23:59:59.999
    pub end: NaiveDateTime,
}

impl WeekRange {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 always exists.
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Monday 00:00 through Sunday 23:59:59.999 of the week containing `date`.
pub fn get_week_range(date: NaiveDate) -> WeekRange {
    let monday = monday_of(date);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
    WeekRange {
        start: start_of_day(monday),
        end: end_of_day(sunday),
    }
}

/// Monday..Sunday of the week containing `date`.
pub fn get_week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = monday_of(date);
    let mut days = [monday; 7];
    for (i, day) in days.iter_mut().enumerate() {
        *day = monday.checked_add_days(Days::new(i as u64)).unwrap_or(monday);
    }
    days
}

/// Shift `date` by `weeks` weeks. Out-of-range results clamp to the input.
pub fn add_weeks(date: NaiveDate, weeks: i32) -> NaiveDate {
    let days = Days::new(u64::from(weeks.unsigned_abs()) * 7);
    let shifted = if weeks >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_today(date: NaiveDate) -> bool {
    date == today()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date string into local wall-clock time.
///
/// Strings containing `T` are read as ISO-8601 timestamps; an explicit offset
/// (`Z`, `+02:00`) is converted to local time, otherwise the value is taken
/// as local. Anything else must be `YYYY-MM-DD` and maps to midnight.
///
/// # Returns
/// * `Some(NaiveDateTime)` for well-formed input
/// * `None` when the string cannot be parsed
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.contains('T') {
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Some(instant.with_timezone(&Local).naive_local());
        }
        return DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

/// Inclusive day count between two date strings, never below 1.
///
/// Unparseable input yields 1.
pub fn calculate_duration(start: &str, end: &str) -> u32 {
    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return 1;
    };
    let days = (end - start).num_days().saturating_add(1);
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}
