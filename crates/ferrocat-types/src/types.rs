//! Core data types for ferrocat

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Label used for standard input in diagnostics
pub const STDIN_LABEL: &str = "stdin";

/// Label used for standard output in diagnostics
pub const STDOUT_LABEL: &str = "stdout";

/// Per-source transfer statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Total bytes read from the source
    pub bytes_read: u64,
    /// Total bytes written to the destination
    pub bytes_written: u64,
    /// Number of read calls that returned data or EOF
    pub read_calls: u64,
    /// Number of write calls issued
    pub write_calls: u64,
    /// Number of write calls that accepted fewer bytes than offered
    pub short_writes: u64,
    /// Number of sources copied to completion
    pub sources_copied: u64,
}

impl CopyStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every byte read was also written
    pub fn is_balanced(&self) -> bool {
        self.bytes_read == self.bytes_written
    }

    /// Merge statistics from another instance
    pub fn merge(&mut self, other: &CopyStats) {
        self.bytes_read += other.bytes_read;
        self.bytes_written += other.bytes_written;
        self.read_calls += other.read_calls;
        self.write_calls += other.write_calls;
        self.short_writes += other.short_writes;
        self.sources_copied += other.sources_copied;
    }
}

/// One input operand as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Standard input, selected by `-` or by an empty operand list
    Stdin,
    /// A path to open
    Path(PathBuf),
}

impl SourceSpec {
    /// Interpret a command-line operand
    pub fn from_arg<S: AsRef<OsStr>>(arg: S) -> Self {
        let arg = arg.as_ref();
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }

    /// Expand an operand list, mapping an empty list to a single stdin source
    pub fn from_args<I, S>(args: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let specs: Vec<Self> = args.into_iter().map(Self::from_arg).collect();
        if specs.is_empty() {
            vec![Self::Stdin]
        } else {
            specs
        }
    }

    /// Path to open, or `None` for standard input
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::Path(path) => Some(path),
        }
    }

    /// Human-readable label used in diagnostics
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => STDIN_LABEL.to_string(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
