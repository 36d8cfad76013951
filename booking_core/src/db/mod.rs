//! Data access for stations and bookings.
//!
//! This module abstracts the booking backend behind the Repository pattern so
//! the store can run against the built-in mock or a remote HTTP API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Store (crate::store) - session state & orchestration   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────────┐
//!     │                                  │
//! ┌───▼──────────────────┐   ┌───────────▼──────────────┐
//! │  MockRepository      │   │  HttpRepository          │
//! │  (seed catalog)      │   │  (reqwest, http-repo)    │
//! └──────────────────────┘   └──────────────────────────┘
//! ```
//!
//! # Module Organization
//! - `repository`: trait definitions
//! - `repositories`: mock and HTTP implementations
//! - `catalog`: seed dataset
//! - `seeded`: deterministic derived fields
//! - `transform`: raw record to model conversion
//! - `config` / `repo_config`: environment and TOML configuration
//! - `factory`: construction from configuration

pub mod catalog;
pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod seeded;
pub mod transform;

pub use catalog::Catalog;
pub use config::{ApiConfig, ConfigError, MockOptions};
pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::BookingConfig;
#[cfg(feature = "http-repo")]
pub use repositories::HttpRepository;
pub use repositories::MockRepository;
pub use repository::{BookingRepository, CalendarRepository, StationRepository};
