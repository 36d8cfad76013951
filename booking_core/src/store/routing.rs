//! Route model and the booking detail view controller.

use std::fmt;

use log::warn;

use crate::models::BookingDetail;

use super::app_store::AppStore;

/// Navigable screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Calendar,
    /// `/booking/{id}`
    BookingDetail(String),
}

impl Route {
    /// Parse a path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Calendar);
        }
        let id = trimmed.strip_prefix("/booking/")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::BookingDetail(id.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Calendar => "/".to_string(),
            Route::BookingDetail(id) => format!("/booking/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Controller behind the booking detail screen.
pub struct BookingDetailView {
    store: AppStore,
    booking_id: String,
}

impl BookingDetailView {
    pub fn new(store: AppStore, booking_id: impl Into<String>) -> Self {
        Self {
            store,
            booking_id: booking_id.into(),
        }
    }

    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }

    /// Load the booking into the store.
    ///
    /// # Returns
    /// * `None` once the load has run
    /// * `Some(Route::Calendar)` if the id is blank and the view should redirect
    pub async fn load_booking(&self) -> Option<Route> {
        if self.booking_id.trim().is_empty() {
            warn!("Invalid booking ID provided");
            return Some(Route::Calendar);
        }
        self.store.load_booking_detail(&self.booking_id).await;
        None
    }

    /// Leave the view, clearing the selected booking.
    pub fn go_back(&self) -> Route {
        self.store.clear_selected_booking();
        Route::Calendar
    }

    pub fn booking(&self) -> Option<BookingDetail> {
        self.store.state().selected_booking
    }

    pub fn loading(&self) -> bool {
        self.store.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.store.state().error
    }

    pub fn clear_error(&self) {
        self.store.clear_error();
    }
}
