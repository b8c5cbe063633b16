//! Sequential concatenation of many sources into one destination

use crate::copy::{CopyOptions, StreamCopier};
use crate::reader::Source;
use crate::writer::Destination;
use ferrocat_types::{CopyStats, Error, Result, SourceSpec};
use std::io::Read;
use tracing::debug;

/// Result of copying one source
#[derive(Debug)]
pub enum SourceOutcome {
    /// The source was copied to completion
    Copied(CopyStats),
    /// The source failed to open or read; the run may continue
    Failed(Error),
}

impl SourceOutcome {
    /// Whether the source was copied to completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Copied(_))
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Aggregated statistics of every source that was copied
    pub stats: CopyStats,
    /// Number of sources that failed to open or read
    pub failures: usize,
}

impl RunSummary {
    /// Whether every requested source was copied without error
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

/// Copies sources one after another into a shared destination
///
/// Sources are processed strictly in order. A failing source is recorded
/// and skipped; a failing destination ends the session.
#[derive(Debug)]
pub struct CatSession<D: Destination> {
    destination: D,
    copier: StreamCopier,
    summary: RunSummary,
}

impl<D: Destination> CatSession<D> {
    /// Create a session, sizing the transfer buffer for `destination`
    pub fn new(destination: D, options: CopyOptions) -> Result<Self> {
        let copier = StreamCopier::for_destination(&destination, options)?;
        Ok(Self::with_copier(destination, copier))
    }

    /// Create a session around an already sized copier
    pub fn with_copier(destination: D, copier: StreamCopier) -> Self {
        Self {
            destination,
            copier,
            summary: RunSummary::default(),
        }
    }

    /// Open and copy one operand
    ///
    /// Returns `Err` only for fatal errors. The opened file is closed before
    /// this returns.
    pub fn process(&mut self, spec: &SourceSpec) -> Result<SourceOutcome> {
        let mut source = match Source::open(spec) {
            Ok(source) => source,
            Err(e) => return Ok(self.record_failure(e)),
        };
        let label = source.label();
        self.process_reader(&mut source, &label)
    }

    /// Copy an already open reader
    pub fn process_reader<R: Read + ?Sized>(
        &mut self,
        source: &mut R,
        label: &str,
    ) -> Result<SourceOutcome> {
        match self.copier.copy(source, label, &mut self.destination) {
            Ok(stats) => {
                self.summary.stats.merge(&stats);
                Ok(SourceOutcome::Copied(stats))
            }
            Err(e) if e.is_recoverable() => Ok(self.record_failure(e)),
            Err(e) => Err(e),
        }
    }

    /// Copy every operand in order, reporting recoverable failures to `report`
    ///
    /// Stops at the first fatal error and returns it; sources after it are
    /// never opened.
    pub fn run<F>(&mut self, specs: &[SourceSpec], mut report: F) -> Result<RunSummary>
    where
        F: FnMut(&Error),
    {
        for spec in specs {
            if let SourceOutcome::Failed(e) = self.process(spec)? {
                report(&e);
            }
        }

        debug!(
            "Run finished: {} sources copied, {} failed, {} bytes",
            self.summary.stats.sources_copied, self.summary.failures, self.summary.stats.bytes_written
        );
        Ok(self.summary.clone())
    }

    /// Totals so far
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Chunk size chosen for the destination
    pub fn copier(&self) -> &StreamCopier {
        &self.copier
    }

    /// Consume the session and return the destination
    pub fn into_destination(self) -> D {
        self.destination
    }

    fn record_failure(&mut self, error: Error) -> SourceOutcome {
        debug!("Skipping source after error: {}", error);
        self.summary.failures += 1;
        SourceOutcome::Failed(error)
    }
}
