//! Configuration types for ferrocat
//!
//! Validated value types shared by the I/O engine and the configuration
//! loader.

use std::fmt;

/// Number of bytes requested per read/write call
///
/// Always strictly positive and never larger than [`ChunkSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkSize(usize);

impl ChunkSize {
    /// Maximum chunk size (64MB)
    pub const MAX: usize = 64 * 1024 * 1024;
    /// Size used when nothing better is known (4KB, the common page size)
    pub const FALLBACK: usize = 4 * 1024;

    /// Create a new chunk size with validation
    pub fn new(size: usize) -> Result<Self, String> {
        if size == 0 {
            Err("Chunk size must be greater than 0".to_string())
        } else if size > Self::MAX {
            Err(format!("Chunk size {} exceeds maximum {}", size, Self::MAX))
        } else {
            Ok(Self(size))
        }
    }

    /// Create a chunk size, clamping into `1..=MAX`
    pub fn saturating(size: usize) -> Self {
        Self(size.clamp(1, Self::MAX))
    }

    /// Get the chunk size value
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(Self::FALLBACK)
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

/// How the stream copier obtains its transfer buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferStrategy {
    /// Allocate once and reuse the buffer for every source
    #[default]
    Reuse,
    /// Allocate a fresh buffer for each source
    PerCall,
}

impl BufferStrategy {
    /// Map the `reuse_buffer` configuration switch onto a strategy
    pub fn from_reuse(reuse: bool) -> Self {
        if reuse {
            Self::Reuse
        } else {
            Self::PerCall
        }
    }
}
