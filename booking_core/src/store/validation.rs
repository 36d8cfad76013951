//! Local checks run before a reschedule request leaves the client.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::time::{calculate_duration, parse_date, start_of_day};

pub const MAX_BOOKING_DURATION_DAYS: u32 = 365;

/// Validate a reschedule request.
///
/// # Arguments
/// * `booking_id` - Booking to move
/// * `pickup` / `return_date` - New dates as `YYYY-MM-DD` or ISO timestamps
/// * `today` - Earliest allowed pickup day
///
/// # Returns
/// * `Ok((pickup, return))` with the parsed dates
/// * `Err(AppError)` of kind `Validation` describing the first failed check
pub fn validate_reschedule(
    booking_id: &str,
    pickup: &str,
    return_date: &str,
    today: NaiveDate,
) -> AppResult<(NaiveDateTime, NaiveDateTime)> {
    if [booking_id, pickup, return_date]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(AppError::validation(
            ErrorCode::MissingFields,
            "All fields are required for rescheduling",
        ));
    }

    let pickup_at = parse_date(pickup).ok_or_else(|| {
        AppError::validation(ErrorCode::InvalidDateRange, "Pickup date is not a valid date")
    })?;
    let return_at = parse_date(return_date).ok_or_else(|| {
        AppError::validation(ErrorCode::InvalidDateRange, "Return date is not a valid date")
    })?;

    if pickup_at < start_of_day(today) {
        return Err(AppError::validation(
            ErrorCode::PastDate,
            "Pickup date cannot be in the past",
        ));
    }

    if return_at <= pickup_at {
        return Err(AppError::validation(
            ErrorCode::InvalidDateRange,
            "Return date must be after pickup date",
        ));
    }

    if calculate_duration(pickup, return_date) > MAX_BOOKING_DURATION_DAYS {
        return Err(AppError::validation(
            ErrorCode::DurationTooLong,
            "Booking duration cannot exceed 365 days",
        ));
    }

    Ok((pickup_at, return_at))
}
