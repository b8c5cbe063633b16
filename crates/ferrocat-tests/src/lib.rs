//! ferrocat testing suite
//!
//! Integration tests that drive the copy engine end to end, plus the stub
//! sources and destinations they share.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Deterministic test data, temporary input files and in-memory
/// destinations with controllable write behavior.
pub mod test_utils;

pub use test_utils::*;
