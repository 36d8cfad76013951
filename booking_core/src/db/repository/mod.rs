//! Repository traits for station and booking data.
//!
//! # Module Organization
//!
//! - [`station`]: station lookup and search
//! - [`booking`]: booking queries and rescheduling
//!
//! # Trait Composition
//!
//! The store depends on [`CalendarRepository`], which any type implementing
//! both traits gets for free:
//!
//! ```ignore
//! impl StationRepository for MyRepo { ... }
//! impl BookingRepository for MyRepo { ... }
//!
//! let repo: Arc<dyn CalendarRepository> = Arc::new(MyRepo::new());
//! ```

pub mod booking;
pub mod station;

pub use booking::BookingRepository;
pub use station::StationRepository;

/// Composite trait bound for a complete calendar backend.
pub trait CalendarRepository: StationRepository + BookingRepository {}

impl<T> CalendarRepository for T where T: StationRepository + BookingRepository {}
