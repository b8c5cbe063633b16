//! Error types and handling for ferrocat
//!
//! Errors are split by which side of the transfer they come from. Anything
//! that goes wrong with a single source (opening it, reading it) is
//! recoverable: the run records the failure and moves on to the next source.
//! Anything that goes wrong with the shared destination, the transfer buffer
//! or the configuration is fatal and ends the run.

use std::collections::TryReserveError;
use std::path::PathBuf;

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Report, record a failed exit status and continue with the next source
    Recoverable,
    /// Report and terminate the run immediately
    Fatal,
}

/// Main error type for ferrocat operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A source path could not be opened
    #[error("{}: {source}", path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading from a source failed part-way through
    #[error("{label}: {source}")]
    Read {
        /// Human-readable name of the source (`stdin` or its path)
        label: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing to the destination failed
    #[error("{label}: {source}")]
    Write {
        /// Human-readable name of the destination
        label: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The destination's status (block size, file type) could not be queried
    #[error("{label}: {source}")]
    DestinationStatus {
        /// Human-readable name of the destination
        label: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The transfer buffer could not be allocated
    #[error("failed to allocate {size}-byte I/O buffer: {source}")]
    Allocation {
        /// Requested buffer size in bytes
        size: usize,
        /// Underlying allocation error
        #[source]
        source: TryReserveError,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source open failure
    Open,
    /// Source read failure
    Read,
    /// Destination write failure
    Write,
    /// Destination status query failure
    DestinationStatus,
    /// Buffer allocation failure
    Allocation,
    /// Configuration errors
    Config,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } => ErrorKind::Open,
            Self::Read { .. } => ErrorKind::Read,
            Self::Write { .. } => ErrorKind::Write,
            Self::DestinationStatus { .. } => ErrorKind::DestinationStatus,
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Open { .. } | Self::Read { .. } => ErrorSeverity::Recoverable,
            Self::Write { .. }
            | Self::DestinationStatus { .. }
            | Self::Allocation { .. }
            | Self::Config { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Check if this error ends the whole run
    pub fn is_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// Check if the run may continue with the next source
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Recoverable
    }

    /// Underlying I/O error, if this error wraps one
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Open { source, .. }
            | Self::Read { source, .. }
            | Self::Write { source, .. }
            | Self::DestinationStatus { source, .. } => Some(source),
            Self::Allocation { .. } | Self::Config { .. } => None,
        }
    }

    /// Create a new open error
    pub fn open<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a new read error
    pub fn read<S: Into<String>>(label: S, source: std::io::Error) -> Self {
        Self::Read {
            label: label.into(),
            source,
        }
    }

    /// Create a new write error
    pub fn write<S: Into<String>>(label: S, source: std::io::Error) -> Self {
        Self::Write {
            label: label.into(),
            source,
        }
    }

    /// Create a new destination status error
    pub fn destination_status<S: Into<String>>(label: S, source: std::io::Error) -> Self {
        Self::DestinationStatus {
            label: label.into(),
            source,
        }
    }

    /// Create a new allocation error
    pub fn allocation(size: usize, source: TryReserveError) -> Self {
        Self::Allocation { size, source }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
