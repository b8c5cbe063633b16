//! Destination handles
//!
//! The destination is opened once per process and shared by every copy. It
//! writes straight to the underlying descriptor with no user-space buffering,
//! so every chunk handed to [`Write::write`] reaches the kernel before the
//! next read is issued.

use ferrocat_types::{Error, Result, STDOUT_LABEL};
use std::fs::File;
use std::io::{self, Write};
use tracing::debug;

/// What the platform reports about a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestinationInfo {
    /// Preferred I/O block size, if the platform reports a positive one
    pub block_size: Option<u64>,
    /// Whether the destination is a regular file
    pub is_regular_file: bool,
}

impl DestinationInfo {
    /// Extract the relevant fields from file metadata
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        #[cfg(unix)]
        let block_size = {
            use std::os::unix::fs::MetadataExt;
            Some(metadata.blksize()).filter(|&size| size > 0)
        };
        #[cfg(not(unix))]
        let block_size = None;

        Self {
            block_size,
            is_regular_file: metadata.file_type().is_file(),
        }
    }
}

/// Sink that copied bytes are written to
///
/// Implementors must report errors from `write` rather than retrying
/// internally; the stream copier owns the partial-write loop.
pub trait Destination: Write {
    /// Human-readable name used in diagnostics
    fn label(&self) -> &str;

    /// Query the platform for the destination's status
    fn probe(&self) -> Result<DestinationInfo>;
}

impl<D: Destination + ?Sized> Destination for &mut D {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn probe(&self) -> Result<DestinationInfo> {
        (**self).probe()
    }
}

/// Unbuffered destination backed by an open file handle
#[derive(Debug)]
pub struct FileSink {
    file: File,
    label: String,
}

impl FileSink {
    /// Wrap an already open file
    pub fn new<S: Into<String>>(file: File, label: S) -> Self {
        Self {
            file,
            label: label.into(),
        }
    }

    /// Open the process's standard output as an unbuffered destination
    ///
    /// The descriptor is duplicated so writes bypass the line buffering of
    /// [`std::io::Stdout`]; the original descriptor stays open for the
    /// lifetime of the process.
    pub fn stdout() -> Result<Self> {
        let file = Self::duplicate_stdout()
            .map_err(|e| Error::destination_status(STDOUT_LABEL, e))?;

        debug!("Opened {} as destination", STDOUT_LABEL);
        Ok(Self::new(file, STDOUT_LABEL))
    }

    #[cfg(unix)]
    fn duplicate_stdout() -> io::Result<File> {
        use std::os::fd::AsFd;
        Ok(File::from(io::stdout().as_fd().try_clone_to_owned()?))
    }

    #[cfg(windows)]
    fn duplicate_stdout() -> io::Result<File> {
        use std::os::windows::io::AsHandle;
        Ok(File::from(io::stdout().as_handle().try_clone_to_owned()?))
    }

    #[cfg(not(any(unix, windows)))]
    fn duplicate_stdout() -> io::Result<File> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "standard output cannot be opened as a file on this platform",
        ))
    }

    /// Consume the sink and return the underlying file
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Destination for FileSink {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&self) -> Result<DestinationInfo> {
        let metadata = self
            .file
            .metadata()
            .map_err(|e| Error::destination_status(self.label.as_str(), e))?;

        let info = DestinationInfo::from_metadata(&metadata);
        debug!("Probed destination {}: {:?}", self.label, info);
        Ok(info)
    }
}
