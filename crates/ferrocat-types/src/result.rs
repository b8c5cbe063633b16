//! Result type alias for ferrocat operations

use crate::Error;

/// Result type alias for ferrocat operations
pub type Result<T> = std::result::Result<T, Error>;
