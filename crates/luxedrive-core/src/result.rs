//! Convenience result type alias for LuxeDrive.

use crate::error::AppError;

/// A specialized `Result` type for LuxeDrive operations.
pub type AppResult<T> = Result<T, AppError>;
