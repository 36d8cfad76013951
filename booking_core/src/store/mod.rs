//! Application state store.
//!
//! # Module Organization
//!
//! - [`app_store`]: the store handle and its operations
//! - [`state`]: session snapshot and derived values
//! - [`validation`]: reschedule preconditions
//! - [`routing`]: route model and detail view controller

pub mod app_store;
pub mod routing;
pub mod state;
pub mod validation;

pub use app_store::{AppStore, StoreOptions, WeekDirection};
pub use routing::{BookingDetailView, Route};
pub use state::{LoadPhase, SessionState};
pub use validation::{validate_reschedule, MAX_BOOKING_DURATION_DAYS};
