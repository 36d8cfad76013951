use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Booking, BookingDetail, CalendarDay, Station};
use crate::services::build_week;
use crate::time::{get_week_range, today, WeekRange};

/// Where the bookings list of the selected station stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// No station selected.
    Idle,
    /// A request or a scheduled retry is pending.
    Loading,
    Loaded,
    Errored,
}

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub selected_station: Option<Station>,
    /// Any date inside the displayed week.
    pub current_week: NaiveDate,
    pub bookings: Vec<Booking>,
    pub selected_booking: Option<BookingDetail>,
    pub search_results: Vec<Station>,
    pub loading: bool,
    pub search_loading: bool,
    pub error: Option<String>,
    pub retry_count: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(today())
    }
}

impl SessionState {
    pub fn new(current_week: NaiveDate) -> Self {
        Self {
            selected_station: None,
            current_week,
            bookings: Vec::new(),
            selected_booking: None,
            search_results: Vec::new(),
            loading: false,
            search_loading: false,
            error: None,
            retry_count: 0,
        }
    }

    // ==================== Derived State ====================

    pub fn week_range(&self) -> WeekRange {
        get_week_range(self.current_week)
    }

    pub fn has_data(&self) -> bool {
        !self.bookings.is_empty()
    }

    /// A station is selected, nothing is loading and there is nothing to show.
    pub fn is_empty(&self) -> bool {
        !self.loading && !self.has_data() && self.selected_station.is_some()
    }

    /// Bookings of the current week; empty without a station.
    pub fn week_bookings(&self) -> &[Booking] {
        if self.selected_station.is_none() {
            return &[];
        }
        &self.bookings
    }

    pub fn calendar_days(&self, today: NaiveDate) -> Vec<CalendarDay> {
        build_week(self.current_week, self.week_bookings(), today)
    }

    pub fn phase(&self) -> LoadPhase {
        if self.selected_station.is_none() {
            LoadPhase::Idle
        } else if self.loading || (self.retry_count > 0 && self.error.is_none()) {
            LoadPhase::Loading
        } else if self.error.is_some() {
            LoadPhase::Errored
        } else {
            LoadPhase::Loaded
        }
    }
}
