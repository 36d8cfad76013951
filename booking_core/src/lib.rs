//! Booking Calendar Core
//!
//! State and data layer for a station booking calendar: station search,
//! weekly booking views, booking detail and rescheduling.
//!
//! # Features
//! - `http-repo`: remote backend over HTTP (reqwest)
//! - `cli`: the `booking-calendar` command-line driver
//!
//! # Quick Start
//!
//! ```no_run
//! use booking_core::db::RepositoryFactory;
//! use booking_core::store::AppStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = AppStore::new(RepositoryFactory::create_mock());
//!     let stations = store.search_stations("berlin").await;
//!     store.set_selected_station(stations.into_iter().next()).await;
//!     println!("{} bookings this week", store.state().bookings.len());
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time;

pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use models::{Booking, BookingDetail, BookingStatus, CalendarDay, Station};
pub use store::AppStore;
