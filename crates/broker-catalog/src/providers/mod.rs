//! Object listing backends.

#[cfg(feature = "local")]
pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "local")]
pub use local::LocalLister;
#[cfg(feature = "s3")]
pub use s3::S3Lister;
