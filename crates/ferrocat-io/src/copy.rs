//! Stream copier
//!
//! Reads a source to exhaustion and writes every byte to the destination in
//! order. A short write is resumed from the new offset until the whole chunk
//! has been accepted; the next read is only issued after that.

use crate::buffer::{BufferSizer, SizingPolicy, TransferBuffer};
use crate::writer::Destination;
use ferrocat_types::{BufferStrategy, ChunkSize, CopyStats, Error, Result};
use std::io::{self, Read};
use tracing::{debug, trace};

/// Copy options for customizing copy behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// How the transfer buffer is obtained
    pub strategy: BufferStrategy,
    /// Chunk-size policy applied to the destination
    pub sizing: SizingPolicy,
}

/// Buffered copier from sources to a single destination
#[derive(Debug)]
pub struct StreamCopier {
    chunk_size: ChunkSize,
    strategy: BufferStrategy,
    buffer: Option<TransferBuffer>,
}

impl StreamCopier {
    /// Create a copier with a known chunk size
    pub fn new(chunk_size: ChunkSize, strategy: BufferStrategy) -> Self {
        Self {
            chunk_size,
            strategy,
            buffer: None,
        }
    }

    /// Size the copier for a destination
    ///
    /// The destination is probed exactly once here; an unusable destination
    /// is reported as a fatal error.
    pub fn for_destination<D: Destination + ?Sized>(
        destination: &D,
        options: CopyOptions,
    ) -> Result<Self> {
        let sizer = BufferSizer::new(options.sizing);
        let chunk_size = sizer.chunk_size_for(destination)?;

        debug!(
            "Copier for {}: chunk size {}, {:?} buffer",
            destination.label(),
            chunk_size,
            options.strategy
        );
        Ok(Self::new(chunk_size, options.strategy))
    }

    /// Chunk size used for every read and write call
    pub fn chunk_size(&self) -> ChunkSize {
        self.chunk_size
    }

    /// Buffer strategy in use
    pub fn strategy(&self) -> BufferStrategy {
        self.strategy
    }

    /// Whether a reusable buffer is currently held
    pub fn holds_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// Copy all remaining bytes of `source` to `destination`
    ///
    /// Read failures come back as recoverable [`Error::Read`] values carrying
    /// `label`; write and allocation failures are fatal.
    pub fn copy<R, D>(&mut self, source: &mut R, label: &str, destination: &mut D) -> Result<CopyStats>
    where
        R: Read + ?Sized,
        D: Destination + ?Sized,
    {
        let mut buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None => TransferBuffer::allocate(self.chunk_size)?,
        };

        let result = transfer(buffer.as_mut_slice(), source, label, destination);

        if self.strategy == BufferStrategy::Reuse {
            self.buffer = Some(buffer);
        }

        match &result {
            Ok(stats) => debug!(
                "Copied {}: {} bytes, {} reads, {} writes ({} short)",
                label, stats.bytes_written, stats.read_calls, stats.write_calls, stats.short_writes
            ),
            Err(e) => debug!("Copy of {} stopped: {}", label, e),
        }
        result
    }
}

fn transfer<R, D>(buf: &mut [u8], source: &mut R, label: &str, destination: &mut D) -> Result<CopyStats>
where
    R: Read + ?Sized,
    D: Destination + ?Sized,
{
    let mut stats = CopyStats::new();

    loop {
        let nread = match source.read(buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::read(label, e)),
        };
        stats.read_calls += 1;

        if nread == 0 {
            break;
        }
        stats.bytes_read += nread as u64;
        trace!("Read {} bytes from {}", nread, label);

        write_chunk(&buf[..nread], destination, &mut stats)?;
    }

    stats.sources_copied = 1;
    Ok(stats)
}

/// Write one chunk, resuming after short writes
fn write_chunk<D>(chunk: &[u8], destination: &mut D, stats: &mut CopyStats) -> Result<()>
where
    D: Destination + ?Sized,
{
    let mut offset = 0;
    let mut remaining = chunk.len();

    while remaining > 0 {
        let written = match destination.write(&chunk[offset..offset + remaining]) {
            Ok(0) => {
                return Err(Error::write(
                    destination.label(),
                    io::Error::from(io::ErrorKind::WriteZero),
                ))
            }
            Ok(n) => n.min(remaining),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::write(destination.label(), e)),
        };

        stats.write_calls += 1;
        if written < remaining {
            stats.short_writes += 1;
            trace!("Short write: {} of {} bytes", written, remaining);
        }
        stats.bytes_written += written as u64;
        offset += written;
        remaining -= written;
    }

    Ok(())
}
