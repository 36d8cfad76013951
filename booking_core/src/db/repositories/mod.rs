//! Repository implementations.

#[cfg(feature = "http-repo")]
pub mod http;
pub mod mock;

#[cfg(feature = "http-repo")]
pub use http::HttpRepository;
pub use mock::MockRepository;
