//! Store behavior under failures, retries and overlapping requests.
//!
//! Uses a scripted repository whose responses are queued per test, and
//! tokio's paused clock so retry backoff runs instantly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::Mutex;

use booking_core::db::{BookingRepository, StationRepository};
use booking_core::error::{AppError, AppResult, ErrorLog};
use booking_core::store::{AppStore, LoadPhase, StoreOptions, WeekDirection};
use booking_core::time::{format_date_iso, today};
use booking_core::{Booking, BookingDetail, BookingStatus, Station};

const SLOW_STATION: &str = "slow";
const SLOW_BOOKING: &str = "slow-detail";

#[derive(Default)]
struct ScriptedRepository {
    bookings: Mutex<VecDeque<AppResult<Vec<Booking>>>>,
    reschedule_result: Mutex<Option<AppResult<bool>>>,
    booking_calls: AtomicUsize,
    reschedule_calls: AtomicUsize,
}

impl ScriptedRepository {
    fn push(&self, result: AppResult<Vec<Booking>>) {
        self.bookings.lock().push_back(result);
    }

    fn booking_calls(&self) -> usize {
        self.booking_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StationRepository for ScriptedRepository {
    async fn search_stations(&self, query: &str) -> AppResult<Vec<Station>> {
        Ok(vec![station("1")]
            .into_iter()
            .filter(|s| s.matches(query))
            .collect())
    }

    async fn get_all_stations(&self) -> AppResult<Vec<Station>> {
        Ok(vec![station("1")])
    }

    async fn get_station_by_id(&self, id: &str) -> AppResult<Option<Station>> {
        Ok(Some(station(id)))
    }
}

#[async_trait]
impl BookingRepository for ScriptedRepository {
    async fn get_bookings_for_station(
        &self,
        station_id: &str,
        _start: NaiveDateTime,
        _end: NaiveDateTime,
    ) -> AppResult<Vec<Booking>> {
        self.booking_calls.fetch_add(1, Ordering::SeqCst);
        if station_id == SLOW_STATION {
            tokio::time::sleep(Duration::from_secs(5)).await;
            return Ok(vec![booking("slow-booking", station_id)]);
        }
        self.bookings
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_booking_detail(&self, id: &str) -> AppResult<Option<BookingDetail>> {
        if id == SLOW_BOOKING {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if id == "missing" {
            return Ok(None);
        }
        Ok(Some(BookingDetail {
            booking: booking(id, "1"),
            customer_email: None,
            vehicle_type: None,
            total_price: None,
        }))
    }

    async fn reschedule_booking(
        &self,
        _id: &str,
        _pickup_date: &str,
        _return_date: &str,
    ) -> AppResult<bool> {
        self.reschedule_calls.fetch_add(1, Ordering::SeqCst);
        self.reschedule_result.lock().take().unwrap_or(Ok(true))
    }
}

fn station(id: &str) -> Station {
    Station::new(id, format!("Station {}", id), "Somewhere")
}

fn booking(id: &str, station_id: &str) -> Booking {
    Booking {
        id: id.to_string(),
        customer_name: "Test Customer".to_string(),
        station_id: station_id.to_string(),
        station_name: format!("Station {}", station_id),
        pickup_date: "2025-08-11".to_string(),
        return_date: "2025-08-13".to_string(),
        duration: 3,
        status: BookingStatus::Confirmed,
        vehicle_model: None,
    }
}

fn store_with(repo: Arc<ScriptedRepository>) -> AppStore {
    AppStore::with_options(repo, StoreOptions::default(), ErrorLog::new())
}

fn future_date(days: i64) -> String {
    format_date_iso(today() + chrono::Duration::days(days))
}

// ==================== Loading & Retry ====================

#[tokio::test(start_paused = true)]
async fn test_load_success() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Ok(vec![booking("1", "1")]));
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;

    let state = store.state();
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(state.phase(), LoadPhase::Loaded);
    assert!(state.error.is_none());
    assert_eq!(repo.booking_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_pending_counts_as_loading() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Err(AppError::network("connection refused")));
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;

    let state = store.state();
    assert_eq!(state.retry_count, 1);
    assert!(state.error.is_none());
    assert_eq!(state.phase(), LoadPhase::Loading);
}

#[tokio::test(start_paused = true)]
async fn test_retry_then_success_clears_error() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Err(AppError::network("connection refused")));
    repo.push(Err(AppError::timeout()));
    repo.push(Ok(vec![booking("7", "1")]));
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    let state = store.state();
    assert_eq!(repo.booking_calls(), 3);
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(state.bookings[0].id, "7");
    assert_eq!(state.retry_count, 0);
    assert!(state.error.is_none());
    assert_eq!(state.phase(), LoadPhase::Loaded);
}

#[tokio::test(start_paused = true)]
async fn test_retry_backoff_is_linear() {
    let repo = Arc::new(ScriptedRepository::default());
    for _ in 0..4 {
        repo.push(Err(AppError::network("connection refused")));
    }
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;
    assert_eq!(repo.booking_calls(), 1);

    // First retry after 1s, second 2s later, third 3s after that
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(repo.booking_calls(), 2);
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(repo.booking_calls(), 3);
    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert_eq!(repo.booking_calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_retry_exhaustion_keeps_bookings() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Ok(vec![booking("1", "1"), booking("2", "1")]));
    let store = store_with(repo.clone());
    store.set_selected_station(Some(station("1"))).await;
    assert_eq!(store.state().bookings.len(), 2);

    for _ in 0..4 {
        repo.push(Err(AppError::network("connection refused")));
    }
    store.navigate_week(WeekDirection::Next).await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    let state = store.state();
    // Initial load, then one attempt plus three retries
    assert_eq!(repo.booking_calls(), 5);
    assert_eq!(state.bookings.len(), 2);
    assert_eq!(state.phase(), LoadPhase::Errored);
    assert_eq!(
        state.error.as_deref(),
        Some(
            "Unable to connect to the server. Please check your internet connection and try again. \
             If the problem persists, contact support."
        )
    );

    let actions: Vec<Option<String>> = store
        .error_log()
        .entries()
        .into_iter()
        .map(|e| e.context.action)
        .collect();
    assert_eq!(actions.len(), 4);
    assert_eq!(actions.last().unwrap().as_deref(), Some("load_bookings"));
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_retries_suggest_support() {
    let repo = Arc::new(ScriptedRepository::default());
    for _ in 0..4 {
        repo.push(Err(AppError::server(500, "Internal Server Error")));
    }
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(
        store.state().error.as_deref(),
        Some("API Error: 500 Internal Server Error Please try again or contact support.")
    );
}

#[tokio::test(start_paused = true)]
async fn test_new_load_resets_retry_count() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Err(AppError::network("connection refused")));
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;
    assert_eq!(store.state().retry_count, 1);

    repo.push(Ok(vec![booking("1", "1")]));
    store.refresh_data().await;
    assert_eq!(store.state().retry_count, 0);
    assert_eq!(store.state().bookings.len(), 1);

    // The retry scheduled by the first load is stale now
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(repo.booking_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_clearing_station_cancels_retries() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Err(AppError::network("connection refused")));
    repo.push(Ok(vec![booking("1", "1")]));
    let store = store_with(repo.clone());

    store.set_selected_station(Some(station("1"))).await;
    store.set_selected_station(None).await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    let state = store.state();
    assert_eq!(repo.booking_calls(), 1);
    assert!(state.bookings.is_empty());
    assert_eq!(state.retry_count, 0);
    assert_eq!(state.phase(), LoadPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_load_is_discarded() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Ok(vec![booking("fast-booking", "2")]));
    let store = store_with(repo.clone());

    let slow = {
        let store = store.clone();
        tokio::spawn(async move {
            store.set_selected_station(Some(station(SLOW_STATION))).await;
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    store.set_selected_station(Some(station("2"))).await;
    slow.await.unwrap();

    let state = store.state();
    assert_eq!(state.selected_station.unwrap().id, "2");
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(state.bookings[0].id, "fast-booking");
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn test_week_navigation_without_station_does_not_load() {
    let repo = Arc::new(ScriptedRepository::default());
    let store = store_with(repo.clone());

    let start = store.state().current_week;
    store.navigate_week(WeekDirection::Next).await;
    store.navigate_week(WeekDirection::Next).await;
    store.navigate_week(WeekDirection::Prev).await;

    assert_eq!(
        store.state().current_week,
        start + chrono::Duration::days(7)
    );
    assert_eq!(repo.booking_calls(), 0);
}

// ==================== Detail ====================

#[tokio::test]
async fn test_detail_not_found_sets_error() {
    let store = store_with(Arc::new(ScriptedRepository::default()));

    store.load_booking_detail("missing").await;

    let state = store.state();
    assert!(state.selected_booking.is_none());
    assert!(!state.loading);
    assert!(state
        .error
        .unwrap()
        .starts_with("The booking could not be found."));
}

#[tokio::test]
async fn test_detail_blank_id_is_rejected() {
    let store = store_with(Arc::new(ScriptedRepository::default()));

    store.load_booking_detail("  ").await;

    assert_eq!(
        store.state().error.as_deref(),
        Some("Invalid booking ID provided")
    );
}

#[tokio::test]
async fn test_detail_then_clear() {
    let store = store_with(Arc::new(ScriptedRepository::default()));

    store.load_booking_detail("42").await;
    assert_eq!(store.state().selected_booking.unwrap().id(), "42");

    store.clear_selected_booking();
    assert!(store.state().selected_booking.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_detail_response_after_clear_is_discarded() {
    let store = store_with(Arc::new(ScriptedRepository::default()));

    let pending = {
        let store = store.clone();
        tokio::spawn(async move { store.load_booking_detail(SLOW_BOOKING).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(store.state().loading);

    store.clear_selected_booking();
    pending.await.unwrap();

    let state = store.state();
    assert!(state.selected_booking.is_none());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_newer_detail_wins_over_slower_one() {
    let store = store_with(Arc::new(ScriptedRepository::default()));

    let pending = {
        let store = store.clone();
        tokio::spawn(async move { store.load_booking_detail(SLOW_BOOKING).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    store.load_booking_detail("42").await;
    pending.await.unwrap();

    assert_eq!(store.state().selected_booking.unwrap().id(), "42");
}

// ==================== Reschedule ====================

#[tokio::test]
async fn test_reschedule_past_date_skips_backend() {
    let repo = Arc::new(ScriptedRepository::default());
    let store = store_with(repo.clone());

    let accepted = store
        .reschedule_booking("1", "2000-01-01", "2000-01-05")
        .await;

    assert!(!accepted);
    assert_eq!(repo.reschedule_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        store.state().error.as_deref(),
        Some("The selected date cannot be in the past.")
    );
}

#[tokio::test]
async fn test_reschedule_missing_fields() {
    let repo = Arc::new(ScriptedRepository::default());
    let store = store_with(repo.clone());

    assert!(!store.reschedule_booking("1", "", "2030-01-05").await);
    assert_eq!(repo.reschedule_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        store.state().error.as_deref(),
        Some("All fields are required for rescheduling")
    );
}

#[tokio::test]
async fn test_reschedule_success_updates_local_copies() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Ok(vec![booking("1", "1"), booking("2", "1")]));
    let store = store_with(repo.clone());
    store.set_selected_station(Some(station("1"))).await;
    store.load_booking_detail("1").await;

    let pickup = future_date(10);
    let ret = future_date(14);
    assert!(store.reschedule_booking("1", &pickup, &ret).await);

    let state = store.state();
    let moved = state.bookings.iter().find(|b| b.id == "1").unwrap();
    assert_eq!(moved.pickup_date, pickup);
    assert_eq!(moved.return_date, ret);
    assert_eq!(moved.duration, 5);

    let untouched = state.bookings.iter().find(|b| b.id == "2").unwrap();
    assert_eq!(untouched.pickup_date, "2025-08-11");

    let detail = state.selected_booking.unwrap();
    assert_eq!(detail.booking.pickup_date, pickup);
    assert_eq!(detail.booking.duration, 5);
    assert!(state.error.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn test_reschedule_rejected_by_backend() {
    let repo = Arc::new(ScriptedRepository::default());
    *repo.reschedule_result.lock() = Some(Ok(false));
    let store = store_with(repo.clone());

    let accepted = store
        .reschedule_booking("1", &future_date(3), &future_date(6))
        .await;

    assert!(!accepted);
    assert_eq!(repo.reschedule_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        store.state().error.as_deref(),
        Some("The selected dates are not available. Please choose different dates.")
    );
}

#[tokio::test]
async fn test_reschedule_backend_error() {
    let repo = Arc::new(ScriptedRepository::default());
    *repo.reschedule_result.lock() = Some(Err(AppError::server(500, "Internal Server Error")));
    let store = store_with(repo.clone());

    assert!(
        !store
            .reschedule_booking("1", &future_date(3), &future_date(6))
            .await
    );
    assert_eq!(
        store.state().error.as_deref(),
        Some("API Error: 500 Internal Server Error")
    );
    assert_eq!(store.error_log().len(), 1);
}

// ==================== Stations ====================

#[tokio::test]
async fn test_search_updates_results() {
    let store = store_with(Arc::new(ScriptedRepository::default()));

    let found = store.search_stations("station").await;
    assert_eq!(found.len(), 1);

    let state = store.state();
    assert_eq!(state.search_results, found);
    assert!(!state.search_loading);
}

#[tokio::test]
async fn test_subscribers_see_updates() {
    let repo = Arc::new(ScriptedRepository::default());
    repo.push(Ok(vec![booking("1", "1")]));
    let store = store_with(repo);
    let mut rx = store.subscribe();

    store.set_selected_station(Some(station("1"))).await;

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().bookings.len(), 1);
}
