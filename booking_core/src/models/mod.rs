pub mod booking;
pub mod station;

pub use booking::*;
pub use station::*;
