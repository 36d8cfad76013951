//! Calendar arithmetic and date formatting.
//!
//! All values are local wall-clock times (`NaiveDate` / `NaiveDateTime`).
//! Weeks start on Monday.

mod format;
mod week;


pub use format::{
    format_date, format_date_iso, format_date_long, format_date_range, format_date_time,
    format_time, is_date_after, is_date_before, is_date_equal,
};
pub use week::{
    add_weeks, calculate_duration, end_of_day, get_week_days, get_week_range, is_same_day,
    is_today, is_weekend, parse_date, start_of_day, today, WeekRange,
};
