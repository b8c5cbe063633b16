//! Core type system and error handling for ferrocat
//!
//! This crate provides the foundational types shared by every ferrocat crate:
//!
//! - **Error handling**: the open/read/write/status/allocation taxonomy and
//!   its recoverable-vs-fatal classification
//! - **Core types**: operands, per-source statistics, diagnostic labels
//! - **Configuration values**: validated chunk sizes and buffer strategies
//!
//! # Examples
//!
//! ```rust
//! use ferrocat_types::{CopyStats, Result, SourceSpec};
//!
//! fn example_operation() -> Result<CopyStats> {
//!     let sources = SourceSpec::from_args(["-", "notes.txt"]);
//!     assert_eq!(sources[0], SourceSpec::Stdin);
//!
//!     let mut stats = CopyStats::new();
//!     stats.bytes_read = 1024;
//!     stats.bytes_written = 1024;
//!     Ok(stats)
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod types;

// Re-export commonly used types
pub use config::{BufferStrategy, ChunkSize};
pub use error::{Error, ErrorKind, ErrorSeverity};
pub use result::Result;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_copy_stats_creation() {
        let stats = CopyStats::new();
        assert_eq!(stats.bytes_read, 0);
        assert_eq!(stats.bytes_written, 0);
        assert!(stats.is_balanced());
    }

    #[test]
    fn test_copy_stats_merge() {
        let mut stats1 = CopyStats::new();
        stats1.bytes_read = 1000;
        stats1.bytes_written = 1000;
        stats1.sources_copied = 1;

        let mut stats2 = CopyStats::new();
        stats2.bytes_read = 500;
        stats2.bytes_written = 500;
        stats2.short_writes = 2;
        stats2.sources_copied = 1;

        stats1.merge(&stats2);
        assert_eq!(stats1.bytes_read, 1500);
        assert_eq!(stats1.bytes_written, 1500);
        assert_eq!(stats1.short_writes, 2);
        assert_eq!(stats1.sources_copied, 2);
    }

    #[test]
    fn test_empty_operand_list_means_stdin() {
        let specs = SourceSpec::from_args(Vec::<String>::new());
        assert_eq!(specs, vec![SourceSpec::Stdin]);
    }

    #[test]
    fn test_operands_keep_order() {
        let specs = SourceSpec::from_args(["a.txt", "-", "b.txt"]);
        assert_eq!(
            specs,
            vec![
                SourceSpec::Path(PathBuf::from("a.txt")),
                SourceSpec::Stdin,
                SourceSpec::Path(PathBuf::from("b.txt")),
            ]
        );
        assert_eq!(specs[0].path(), Some(std::path::Path::new("a.txt")));
        assert_eq!(specs[1].path(), None);
        assert_eq!(specs[1].label(), STDIN_LABEL);
        assert_eq!(specs[2].to_string(), "b.txt");
    }

    #[test]
    fn test_empty_string_operand_is_a_path() {
        assert_eq!(SourceSpec::from_arg(""), SourceSpec::Path(PathBuf::new()));
    }
}
