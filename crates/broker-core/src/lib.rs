//! # broker-core
//!
//! Core crate for the license broker. Contains the store, catalog and
//! membership traits, configuration schemas, typed identifiers, the
//! assignment record codec, and the unified error system.
//!
//! This crate has **no** internal dependencies on other broker crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
