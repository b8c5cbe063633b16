//! Shared helpers for ferrocat tests
//!
//! Everything here is deterministic so failures reproduce exactly.

use ferrocat_io::{Destination, DestinationInfo};
use ferrocat_types::Result;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test data generation patterns
#[derive(Debug, Clone, Copy)]
pub enum TestDataPattern {
    /// All zeros
    Zeros,
    /// Printable ASCII lines
    Text,
    /// Every byte value, including NUL and high bytes
    Binary,
}

/// Generate test data with specified pattern
pub fn generate_test_data(size: usize, pattern: TestDataPattern) -> Vec<u8> {
    match pattern {
        TestDataPattern::Zeros => vec![0u8; size],
        TestDataPattern::Text => {
            let line = b"the quick brown fox jumps over the lazy dog\n";
            line.iter().copied().cycle().take(size).collect()
        }
        TestDataPattern::Binary => (0..size).map(|i| ((i * 7 + 13) % 256) as u8).collect(),
    }
}

/// Create a temporary file with test data
pub fn create_test_file(
    temp_dir: &TempDir,
    name: &str,
    size: usize,
    pattern: TestDataPattern,
) -> PathBuf {
    let file_path = temp_dir.path().join(name);
    let data = generate_test_data(size, pattern);
    fs::write(&file_path, data).expect("Failed to write test file");
    file_path
}

/// Common chunk sizes for testing
pub struct CommonChunkSizes;

impl CommonChunkSizes {
    /// Smallest legal chunk
    pub const BYTE: usize = 1;
    /// Odd size that never divides test data evenly
    pub const ODD: usize = 1000;
    /// Common page size
    pub const PAGE: usize = 4 * 1024;
    /// Default buffer for pipes and terminals
    pub const SMALL_FILE: usize = 128 * 1024;

    /// Get all standard chunk sizes
    pub fn all() -> Vec<(&'static str, usize)> {
        vec![
            ("1B", Self::BYTE),
            ("1000B", Self::ODD),
            ("4KB", Self::PAGE),
            ("128KB", Self::SMALL_FILE),
        ]
    }
}

/// In-memory destination with controllable write behavior
///
/// Accepts at most `max_write` bytes per call, which exercises the
/// partial-write path, and can be told to fail or stall once `fail_after`
/// bytes have been accepted.
#[derive(Debug, Clone)]
pub struct MemorySink {
    /// Bytes accepted so far
    pub data: Vec<u8>,
    /// Largest number of bytes accepted by a single write call
    pub max_write: usize,
    /// Fail every write once this many bytes have been accepted
    pub fail_after: Option<usize>,
    /// How the sink fails; `None` means writes return `Ok(0)`
    pub failure: Option<io::ErrorKind>,
    /// Number of write calls received
    pub writes: usize,
    /// What `probe` reports
    pub info: DestinationInfo,
}

impl MemorySink {
    /// Sink that accepts every byte offered
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            max_write: usize::MAX,
            fail_after: None,
            failure: Some(io::ErrorKind::BrokenPipe),
            writes: 0,
            info: DestinationInfo::default(),
        }
    }

    /// Sink that accepts at most `max_write` bytes per call
    pub fn short_writes(max_write: usize) -> Self {
        Self {
            max_write,
            ..Self::new()
        }
    }

    /// Sink that fails with `kind` after `limit` bytes
    pub fn failing_after(limit: usize, kind: io::ErrorKind) -> Self {
        Self {
            fail_after: Some(limit),
            failure: Some(kind),
            ..Self::new()
        }
    }

    /// Sink that stops accepting bytes after `limit`, returning `Ok(0)`
    pub fn stalling_after(limit: usize) -> Self {
        Self {
            fail_after: Some(limit),
            failure: None,
            ..Self::new()
        }
    }

    /// Report the given block size from `probe`
    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.info.block_size = Some(block_size);
        self
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;

        let mut allowed = buf.len().min(self.max_write);
        if let Some(limit) = self.fail_after {
            let room = limit.saturating_sub(self.data.len());
            if room == 0 {
                return match self.failure {
                    Some(kind) => Err(io::Error::from(kind)),
                    None => Ok(0),
                };
            }
            allowed = allowed.min(room);
        }

        self.data.extend_from_slice(&buf[..allowed]);
        Ok(allowed)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Destination for MemorySink {
    fn label(&self) -> &str {
        "memory"
    }

    fn probe(&self) -> Result<DestinationInfo> {
        Ok(self.info)
    }
}

/// Reader that yields `data` and then fails with `kind`
#[derive(Debug)]
pub struct FailingReader {
    data: Vec<u8>,
    position: usize,
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Create a reader that fails once `data` is exhausted
    pub fn new(data: Vec<u8>, kind: io::ErrorKind) -> Self {
        Self {
            data,
            position: 0,
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.data.len() {
            return Err(io::Error::from(self.kind));
        }
        let n = buf.len().min(self.data.len() - self.position);
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}
