//! Buffered stream-copy engine for ferrocat
//!
//! This crate moves bytes from sources to a single destination:
//!
//! - **Buffer sizing**: chunk size from the destination's block size, floored
//!   by the memory page size
//! - **Stream copying**: read/write loop with explicit short-write handling
//! - **Sessions**: in-order processing of many sources with recoverable
//!   per-source failures and fatal destination failures
//!
//! # Examples
//!
//! ```rust,no_run
//! use ferrocat_io::{CatSession, CopyOptions, FileSink};
//! use ferrocat_types::SourceSpec;
//!
//! # fn example() -> ferrocat_types::Result<()> {
//! let mut session = CatSession::new(FileSink::stdout()?, CopyOptions::default())?;
//! let sources = SourceSpec::from_args(["header.txt", "-", "footer.txt"]);
//! let summary = session.run(&sources, |e| eprintln!("ferrocat: {}", e))?;
//! println!("{} sources failed", summary.failures);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod copy;
pub mod reader;
pub mod session;
pub mod writer;

pub use buffer::{BufferSizer, SizingPolicy, SystemInfo, TransferBuffer};
pub use copy::{CopyOptions, StreamCopier};
pub use reader::Source;
pub use session::{CatSession, RunSummary, SourceOutcome};
pub use writer::{Destination, DestinationInfo, FileSink};
