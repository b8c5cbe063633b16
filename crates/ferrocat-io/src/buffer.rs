//! Transfer buffer sizing and allocation
//!
//! The chunk size is decided once per run from the destination: its
//! preferred block size, floored by the memory page size. Sizing to the
//! storage block keeps the number of system calls low without allocating
//! more than one block's worth of memory.

use crate::writer::{Destination, DestinationInfo};
use ferrocat_types::{ChunkSize, Error, Result};
use tracing::debug;

/// Physical-memory threshold, in pages, above which regular-file
/// destinations get a large buffer
pub const PHYS_PAGES_THRESHOLD: u64 = 32 * 1024;

/// Upper bound for the large regular-file buffer (2MB)
pub const LARGE_BUFFER_MAX: usize = 2 * 1024 * 1024;

/// Largest single transfer the storage stack is assumed to issue (128KB)
pub const MAX_PHYS_IO: usize = 128 * 1024;

/// Memory facts the sizing policy depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemInfo {
    /// Memory page size in bytes
    pub page_size: Option<usize>,
    /// Number of physical memory pages
    pub phys_pages: Option<u64>,
}

impl SystemInfo {
    /// Query the running system
    pub fn current() -> Self {
        Self {
            page_size: Self::query_page_size(),
            phys_pages: Self::query_phys_pages(),
        }
    }

    /// Page size, falling back to [`ChunkSize::FALLBACK`] when unknown
    pub fn page_size_or_fallback(&self) -> usize {
        self.page_size
            .filter(|&size| size > 0)
            .unwrap_or(ChunkSize::FALLBACK)
    }

    #[cfg(unix)]
    fn query_page_size() -> Option<usize> {
        use nix::unistd::{sysconf, SysconfVar};

        sysconf(SysconfVar::PAGE_SIZE)
            .ok()
            .flatten()
            .and_then(|size| usize::try_from(size).ok())
            .filter(|&size| size > 0)
    }

    #[cfg(not(unix))]
    fn query_page_size() -> Option<usize> {
        None
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn query_phys_pages() -> Option<u64> {
        use nix::unistd::{sysconf, SysconfVar};

        sysconf(SysconfVar::_PHYS_PAGES)
            .ok()
            .flatten()
            .and_then(|pages| u64::try_from(pages).ok())
    }

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn query_phys_pages() -> Option<u64> {
        None
    }
}

/// Knobs that adjust the default block-size policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizingPolicy {
    /// Fixed chunk size that replaces the probed one
    pub override_size: Option<ChunkSize>,
    /// Use a large buffer when the destination is a regular file
    pub large_file_buffers: bool,
}

/// Decides the chunk size for a destination
#[derive(Debug, Clone)]
pub struct BufferSizer {
    policy: SizingPolicy,
    system: SystemInfo,
}

impl BufferSizer {
    /// Create a sizer for the running system
    pub fn new(policy: SizingPolicy) -> Self {
        Self::with_system_info(policy, SystemInfo::current())
    }

    /// Create a sizer with explicit system facts
    pub fn with_system_info(policy: SizingPolicy, system: SystemInfo) -> Self {
        Self { policy, system }
    }

    /// Probe the destination and pick a chunk size for it
    ///
    /// Fails only when the destination cannot report its status at all,
    /// which is fatal for the run. The destination is probed even when an
    /// override is configured.
    pub fn chunk_size_for<D: Destination + ?Sized>(&self, destination: &D) -> Result<ChunkSize> {
        let info = destination.probe()?;
        Ok(self.chunk_size_from(&info))
    }

    /// Pick a chunk size from already probed destination facts
    pub fn chunk_size_from(&self, info: &DestinationInfo) -> ChunkSize {
        if let Some(size) = self.policy.override_size {
            debug!("Using configured chunk size: {}", size);
            return size;
        }

        if self.policy.large_file_buffers && info.is_regular_file {
            let size = self.regular_file_size();
            debug!("Regular-file destination, chunk size {} bytes", size);
            return ChunkSize::saturating(size);
        }

        let page_size = self.system.page_size_or_fallback();
        let block_size = info
            .block_size
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(0);
        let size = block_size.max(page_size);

        debug!(
            "Chunk size {} bytes (block size {}, page size {})",
            size, block_size, page_size
        );
        ChunkSize::saturating(size)
    }

    fn regular_file_size(&self) -> usize {
        match self.system.phys_pages {
            Some(pages) if pages > PHYS_PAGES_THRESHOLD => LARGE_BUFFER_MAX.min(MAX_PHYS_IO * 8),
            _ => MAX_PHYS_IO,
        }
    }
}

impl Default for BufferSizer {
    fn default() -> Self {
        Self::new(SizingPolicy::default())
    }
}

/// Heap buffer holding one chunk in flight
#[derive(Debug)]
pub struct TransferBuffer {
    data: Vec<u8>,
}

impl TransferBuffer {
    /// Allocate a zeroed buffer of exactly `size` bytes
    pub fn allocate(size: ChunkSize) -> Result<Self> {
        let len = size.get();
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation(len, e))?;
        data.resize(len, 0);

        Ok(Self { data })
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer has zero length
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a mutable view of the whole buffer
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
