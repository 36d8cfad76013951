//! Error handling shared by the data-access layer and the store.
//!
//! Every failure that leaves the repository boundary is normalized into an
//! [`AppError`]. The store never hands these to the UI directly: it records
//! them in an [`ErrorLog`] and publishes the text produced by
//! [`user_friendly_message`].
//!
//! # Module Organization
//!
//! - [`error_log`]: bounded, injectable log of caught errors
//! - [`messages`]: mapping from errors to user-facing strings
//! - [`retry`]: exponential backoff helper

pub mod error_log;
pub mod messages;
pub mod retry;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error_log::{ErrorContext, ErrorLog, ErrorLogEntry, DEFAULT_ERROR_LOG_CAPACITY};
pub use messages::user_friendly_message;
pub use retry::{with_retry, RetryPolicy};

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Local precondition failure; never reaches the network.
    Validation,
    /// Connectivity problem, timeout or aborted request.
    Network,
    /// The requested entity does not exist.
    NotFound,
    /// Non-2xx HTTP response.
    Server,
    /// Anything uncategorized.
    Unknown,
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NetworkError,
    Timeout,
    ServiceUnavailable,
    InvalidQuery,
    StationNotFound,
    BookingNotFound,
    DateConflict,
    InvalidDateRange,
    PastDate,
    DurationTooLong,
    MissingFields,
    InvalidBookingId,
    InvalidResponse,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::InvalidQuery => "INVALID_QUERY",
            ErrorCode::StationNotFound => "STATION_NOT_FOUND",
            ErrorCode::BookingNotFound => "BOOKING_NOT_FOUND",
            ErrorCode::DateConflict => "DATE_CONFLICT",
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::PastDate => "PAST_DATE",
            ErrorCode::DurationTooLong => "DURATION_TOO_LONG",
            ErrorCode::MissingFields => "MISSING_FIELDS",
            ErrorCode::InvalidBookingId => "INVALID_BOOKING_ID",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed application error.
///
/// Carries a human message plus optional machine code, HTTP status and a
/// structured detail payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    code: Option<ErrorCode>,
    status: Option<u16>,
    details: Option<serde_json::Value>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            status: None,
            details: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // ==================== Taxonomy Constructors ====================

    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message).with_code(code)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message).with_code(ErrorCode::NetworkError)
    }

    /// The request did not complete within the configured timeout.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Network, "Request timeout").with_code(ErrorCode::Timeout)
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message).with_code(code)
    }

    /// Non-2xx response. Only 503 gets a code; other statuses are left to
    /// message pattern matching.
    pub fn server(status: u16, status_text: &str) -> Self {
        let message = format!("API Error: {} {}", status, status_text)
            .trim_end()
            .to_string();
        let error = Self::new(ErrorKind::Server, message).with_status(status);
        if status == 503 {
            error.with_code(ErrorCode::ServiceUnavailable)
        } else {
            error
        }
    }

    /// The response body could not be decoded.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message).with_code(ErrorCode::InvalidResponse)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message)
    }

    // ==================== Accessors ====================

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::invalid_response(format!("Failed to parse response: {}", err))
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::timeout()
    }
}

#[cfg(feature = "http-repo")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AppError::timeout();
        }
        if err.is_decode() {
            return AppError::invalid_response(format!("Failed to parse response: {}", err));
        }
        if let Some(status) = err.status() {
            return AppError::server(status.as_u16(), status.canonical_reason().unwrap_or(""));
        }
        if err.is_connect() || err.is_request() {
            return AppError::network(format!("Network connection failed: {}", err));
        }
        AppError::unknown(err.to_string())
    }
}
