//! User-facing error text.

use super::{AppError, ErrorCode};

const DEFAULT_MESSAGE: &str = "An unexpected error occurred. Please try again.";

fn message_for_code(code: ErrorCode) -> Option<&'static str> {
    let text = match code {
        ErrorCode::NetworkError => {
            "Unable to connect to the server. Please check your internet connection and try again."
        }
        ErrorCode::Timeout => "The request took too long to complete. Please try again.",
        ErrorCode::ServiceUnavailable => {
            "The service is temporarily unavailable. Please try again in a few minutes."
        }
        ErrorCode::InvalidQuery => "Please enter a valid search term.",
        ErrorCode::StationNotFound => "The selected station could not be found.",
        ErrorCode::BookingNotFound => {
            "The booking could not be found. It may have been deleted or you may not have permission to view it."
        }
        ErrorCode::DateConflict => {
            "The selected dates are not available. Please choose different dates."
        }
        ErrorCode::InvalidDateRange => "Please select valid dates.",
        ErrorCode::PastDate => "The selected date cannot be in the past.",
        ErrorCode::DurationTooLong => {
            "The booking duration is too long. Maximum allowed duration is 365 days."
        }
        _ => return None,
    };
    Some(text)
}

// Checked in order against the lower-cased message.
const PATTERNS: &[(&str, &str)] = &[
    ("network", "Network error. Please check your connection and try again."),
    ("timeout", "Request timeout. Please try again."),
    ("not found", "The requested resource was not found."),
    ("unauthorized", "You are not authorized to perform this action."),
    ("forbidden", "Access to this resource is forbidden."),
];

/// Map an error to text suitable for display.
///
/// Known codes win; otherwise the message is matched against a few common
/// patterns, then shown as-is, then replaced by a generic default.
pub fn user_friendly_message(error: &AppError) -> String {
    if let Some(text) = error.code().and_then(message_for_code) {
        return text.to_string();
    }

    let lowered = error.message().to_lowercase();
    if let Some((_, text)) = PATTERNS.iter().find(|(needle, _)| lowered.contains(needle)) {
        return (*text).to_string();
    }

    if error.message().trim().is_empty() {
        DEFAULT_MESSAGE.to_string()
    } else {
        error.message().to_string()
    }
}
