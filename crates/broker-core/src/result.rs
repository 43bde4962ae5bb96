//! Convenience result type alias for the license broker.

use crate::error::AppError;

/// A specialized `Result` type for broker operations.
pub type AppResult<T> = Result<T, AppError>;
