//! Fleet directory backends.

pub mod fixed;
#[cfg(feature = "http")]
pub mod http;

pub use fixed::StaticDirectory;
#[cfg(feature = "http")]
pub use http::HttpDirectory;
