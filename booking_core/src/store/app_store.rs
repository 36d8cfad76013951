//! The application store.
//!
//! [`AppStore`] owns the session state and is the only write path to it. The
//! state lives in a `watch` channel: every mutation is published to
//! subscribers in the same step, and [`AppStore::state`] returns a snapshot.
//!
//! List loads carry a generation token. Starting a new load, or clearing the
//! station, makes older responses and pending retries stale; stale results
//! are dropped instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info, warn};
use tokio::sync::watch;

use crate::db::CalendarRepository;
use crate::error::{
    user_friendly_message, AppError, ErrorCode, ErrorContext, ErrorKind, ErrorLog,
};
use crate::models::Station;
use crate::time::{add_weeks, today};

use super::state::SessionState;
use super::validation::validate_reschedule;

const COMPONENT: &str = "AppStore";

/// Direction for [`AppStore::navigate_week`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekDirection {
    Prev,
    Next,
}

/// Retry behavior for list loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    /// Retry `n` waits `n * retry_delay`.
    pub retry_delay: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

struct StoreInner {
    repository: Arc<dyn CalendarRepository>,
    state: watch::Sender<SessionState>,
    load_generation: AtomicU64,
    detail_generation: AtomicU64,
    error_log: ErrorLog,
    options: StoreOptions,
}

/// Cheaply clonable handle to the session store.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<StoreInner>,
}

impl AppStore {
    pub fn new(repository: Arc<dyn CalendarRepository>) -> Self {
        Self::with_options(repository, StoreOptions::default(), ErrorLog::new())
    }

    /// # Arguments
    /// * `repository` - Backend used for every data call
    /// * `options` - Retry behavior for list loads
    /// * `error_log` - Log receiving every caught error
    pub fn with_options(
        repository: Arc<dyn CalendarRepository>,
        options: StoreOptions,
        error_log: ErrorLog,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(StoreInner {
                repository,
                state,
                load_generation: AtomicU64::new(0),
                detail_generation: AtomicU64::new(0),
                error_log,
                options,
            }),
        }
    }

    // ==================== Observation ====================

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.inner.error_log
    }

    pub fn options(&self) -> StoreOptions {
        self.inner.options
    }

    fn update<F: FnOnce(&mut SessionState)>(&self, f: F) {
        self.inner.state.send_modify(f);
    }

    /// Record `error` and publish its user-facing text.
    fn report(&self, error: &AppError, action: &str) {
        self.inner
            .error_log
            .record(error, ErrorContext::new(COMPONENT).action(action));
        let message = user_friendly_message(error);
        self.update(|s| {
            s.error = Some(message);
            s.loading = false;
        });
    }

    // ==================== Station & Week ====================

    /// Select a station and load its bookings, or clear the selection.
    pub async fn set_selected_station(&self, station: Option<Station>) {
        match station {
            Some(station) => {
                info!("Selected station {} ({})", station.id, station.name);
                self.update(|s| s.selected_station = Some(station));
                self.load_bookings().await;
            }
            None => {
                self.next_load_generation();
                self.update(|s| {
                    s.selected_station = None;
                    s.bookings.clear();
                    s.error = None;
                    s.loading = false;
                    s.retry_count = 0;
                });
            }
        }
    }

    pub async fn set_current_week(&self, date: NaiveDate) {
        self.update(|s| s.current_week = date);
        self.refresh_data().await;
    }

    pub async fn navigate_week(&self, direction: WeekDirection) {
        let weeks = match direction {
            WeekDirection::Next => 1,
            WeekDirection::Prev => -1,
        };
        self.update(|s| s.current_week = add_weeks(s.current_week, weeks));
        self.refresh_data().await;
    }

    /// Reload bookings for the selected station, if any.
    pub async fn refresh_data(&self) {
        let has_station = self.inner.state.borrow().selected_station.is_some();
        if has_station {
            self.load_bookings().await;
        }
    }

    // ==================== Bookings ====================

    /// Load the current week's bookings for the selected station.
    ///
    /// Waits for the first attempt only. Failed attempts are retried on a
    /// background task, `retry_delay * n` after failure `n`, up to
    /// `max_retries` times. Failures never touch `bookings`.
    pub async fn load_bookings(&self) {
        let generation = self.next_load_generation();
        self.attempt_load(generation, false).await;
    }

    fn next_load_generation(&self) -> u64 {
        self.inner.load_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current_load(&self, generation: u64) -> bool {
        self.inner.load_generation.load(Ordering::SeqCst) == generation
    }

    async fn attempt_load(&self, generation: u64, is_retry: bool) {
        let (station_id, range) = {
            let state = self.inner.state.borrow();
            match &state.selected_station {
                Some(station) => (station.id.clone(), state.week_range()),
                None => return,
            }
        };

        self.update(|s| {
            if !is_retry {
                s.retry_count = 0;
            }
            s.loading = true;
            s.error = None;
        });

        let result = self
            .inner
            .repository
            .get_bookings_for_station(&station_id, range.start, range.end)
            .await;

        if !self.is_current_load(generation) {
            debug!("Discarding stale bookings response for station {}", station_id);
            return;
        }

        match result {
            Ok(bookings) => {
                debug!("Loaded {} bookings for station {}", bookings.len(), station_id);
                self.update(|s| {
                    s.bookings = bookings;
                    s.retry_count = 0;
                    s.loading = false;
                    s.error = None;
                });
            }
            Err(err) => {
                self.update(|s| s.loading = false);
                self.handle_load_failure(generation, err);
            }
        }
    }

    fn handle_load_failure(&self, generation: u64, err: AppError) {
        let max_retries = self.inner.options.max_retries;
        let retry_count = self.inner.state.borrow().retry_count;

        if retry_count >= max_retries {
            self.inner.error_log.record(
                &err,
                ErrorContext::new(COMPONENT)
                    .action("load_bookings")
                    .details(serde_json::json!({ "retries": retry_count })),
            );
            let message = with_support_hint(user_friendly_message(&err));
            self.update(|s| s.error = Some(message));
            return;
        }

        let attempt = retry_count + 1;
        warn!(
            "Retrying booking load ({}/{}): {}",
            attempt, max_retries, err
        );
        self.inner.error_log.record(
            &err,
            ErrorContext::new(COMPONENT)
                .action("load_bookings_retry")
                .details(serde_json::json!({ "attempt": attempt })),
        );
        self.update(|s| s.retry_count = attempt);

        let store = self.clone();
        let delay = self.inner.options.retry_delay.saturating_mul(attempt);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if store.is_current_load(generation) {
                store.attempt_load(generation, true).await;
            }
        });
    }

    // ==================== Booking Detail ====================

    /// Load a single booking into `selected_booking`.
    pub async fn load_booking_detail(&self, booking_id: &str) {
        if booking_id.trim().is_empty() {
            let err = AppError::validation(ErrorCode::InvalidBookingId, "Invalid booking ID provided");
            self.report(&err, "load_booking_detail");
            return;
        }

        let generation = self.inner.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|s| {
            s.loading = true;
            s.error = None;
            s.selected_booking = None;
        });

        let result = self.inner.repository.get_booking_detail(booking_id).await;

        if self.inner.detail_generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale detail response for booking {}", booking_id);
            return;
        }

        match result {
            Ok(Some(detail)) => {
                debug!("Loaded booking detail {}", booking_id);
                self.update(|s| {
                    s.selected_booking = Some(detail);
                    s.loading = false;
                });
            }
            Ok(None) => {
                let err = AppError::not_found(
                    ErrorCode::BookingNotFound,
                    format!("Booking {} not found", booking_id),
                );
                self.report(&err, "load_booking_detail");
            }
            Err(err) => self.report(&err, "load_booking_detail"),
        }
    }

    /// Move a booking to new dates.
    ///
    /// # Returns
    /// `true` if the backend accepted the change. On `false`, `error` holds
    /// the reason.
    pub async fn reschedule_booking(&self, booking_id: &str, pickup: &str, return_date: &str) -> bool {
        if let Err(err) = validate_reschedule(booking_id, pickup, return_date, today()) {
            self.report(&err, "reschedule_booking");
            return false;
        }

        self.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self
            .inner
            .repository
            .reschedule_booking(booking_id, pickup, return_date)
            .await
        {
            Ok(true) => {
                info!("Rescheduled booking {} to {} - {}", booking_id, pickup, return_date);
                self.update(|s| {
                    if let Some(booking) = s.bookings.iter_mut().find(|b| b.id == booking_id) {
                        booking.reschedule(pickup, return_date);
                    }
                    if let Some(detail) = s.selected_booking.as_mut() {
                        if detail.booking.id == booking_id {
                            detail.booking.reschedule(pickup, return_date);
                        }
                    }
                    s.loading = false;
                });
                true
            }
            Ok(false) => {
                let err = AppError::new(
                    ErrorKind::Server,
                    "Failed to reschedule booking. The dates may not be available.",
                )
                .with_code(ErrorCode::DateConflict);
                self.report(&err, "reschedule_booking");
                false
            }
            Err(err) => {
                self.report(&err, "reschedule_booking");
                false
            }
        }
    }

    // ==================== Stations ====================

    /// Search stations, tracking `search_loading` around the call.
    pub async fn search_stations(&self, query: &str) -> Vec<Station> {
        self.set_search_loading(true);
        let result = self.inner.repository.search_stations(query).await;
        self.set_search_loading(false);

        match result {
            Ok(stations) => {
                let found = stations.clone();
                self.update(|s| s.search_results = found);
                stations
            }
            Err(err) => {
                self.report(&err, "search_stations");
                Vec::new()
            }
        }
    }

    // ==================== Flags ====================

    pub fn set_search_loading(&self, loading: bool) {
        self.update(|s| s.search_loading = loading);
    }

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }

    /// Leave the detail view: drops the selected booking and any in-flight
    /// detail response.
    pub fn clear_selected_booking(&self) {
        self.inner.detail_generation.fetch_add(1, Ordering::SeqCst);
        self.update(|s| {
            s.selected_booking = None;
            s.error = None;
            s.loading = false;
        });
        debug!("Cleared selected booking");
    }
}

/// Append the contact-support hint without repeating a "try again" the
/// message already carries.
fn with_support_hint(message: String) -> String {
    if message.to_lowercase().contains("try again") {
        format!("{} If the problem persists, contact support.", message)
    } else {
        format!("{} Please try again or contact support.", message)
    }
}
