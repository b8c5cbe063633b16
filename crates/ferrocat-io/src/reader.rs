//! Source handles

use ferrocat_types::{Error, Result, SourceSpec, STDIN_LABEL};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An open input stream
///
/// File sources are closed when the value is dropped. Standard input is only
/// locked for the duration and is never closed.
#[derive(Debug)]
pub enum Source {
    /// The process's standard input
    Stdin(io::StdinLock<'static>),
    /// A file opened by path
    File {
        /// Open handle
        file: File,
        /// Path the handle was opened from
        path: PathBuf,
    },
}

impl Source {
    /// Open the source described by a command-line operand
    pub fn open(spec: &SourceSpec) -> Result<Self> {
        match spec.path() {
            None => Ok(Self::stdin()),
            Some(path) => Self::open_path(path),
        }
    }

    /// Lock standard input for reading
    pub fn stdin() -> Self {
        Self::Stdin(io::stdin().lock())
    }

    /// Open a file for reading
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::open(path, e))?;

        debug!("Opened file for reading: {}", path.display());

        Ok(Self::File {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Human-readable label used in diagnostics
    pub fn label(&self) -> String {
        match self {
            Self::Stdin(_) => STDIN_LABEL.to_string(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    /// Whether this source is standard input
    pub fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin(_))
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin(stdin) => stdin.read(buf),
            Self::File { file, .. } => file.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrocat_types::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_path_reads_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("input.txt");
        fs::write(&path, b"some bytes").unwrap();

        let mut source = Source::open(&SourceSpec::Path(path.clone())).unwrap();
        let mut contents = Vec::new();
        source.read_to_end(&mut contents).unwrap();

        assert_eq!(contents, b"some bytes");
        assert!(!source.is_stdin());
        assert_eq!(source.label(), path.display().to_string());
    }

    #[test]
    fn test_open_missing_path_is_recoverable() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let error = Source::open_path(&missing).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Open);
        assert!(error.is_recoverable());
        assert!(error.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_stdin_label() {
        let source = Source::open(&SourceSpec::Stdin).unwrap();
        assert!(source.is_stdin());
        assert_eq!(source.label(), STDIN_LABEL);
    }
}
