//! ferrocat - concatenate files to standard output
//!
//! Streams every operand (or standard input) to standard output byte for
//! byte, in order. A source that cannot be opened or read is reported and
//! skipped; a failing standard output ends the run immediately.

mod display;

use anyhow::Result;
use clap::{ArgAction, Parser};
use display::{display_diagnostic, display_usage, log_summary};
use ferrocat_config::{Config, ConfigLoader};
use ferrocat_io::{CatSession, CopyOptions, FileSink, RunSummary, SizingPolicy};
use ferrocat_types::{ChunkSize, Error, SourceSpec};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};

/// ferrocat - concatenate files to standard output
#[derive(Parser, Debug)]
#[command(
    name = "ferrocat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate files to standard output",
    disable_help_flag = true
)]
struct Cli {
    /// Print usage and exit
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    help: bool,

    /// Unbuffered output (output is never buffered; accepted for compatibility)
    #[arg(short = 'u')]
    unbuffered: bool,

    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bytes per read/write call, overriding the destination's block size
    #[arg(long, value_name = "BYTES")]
    buffer_size: Option<usize>,

    /// Files to concatenate; `-` or no operands reads standard input
    #[arg(value_name = "FILE")]
    files: Vec<OsString>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) if !cli.help => cli,
        Ok(_) => return usage(),
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayVersion => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => return usage(),
    };

    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return fatal(&Error::from(e)),
    };

    if let Err(e) = init_logging(cli.verbose, &config.logging.level) {
        display_diagnostic(e);
        return ExitCode::FAILURE;
    }

    info!("ferrocat v{} starting", env!("CARGO_PKG_VERSION"));
    if cli.unbuffered {
        debug!("-u given; output is always unbuffered");
    }

    let started = Instant::now();
    match run(&cli, &config) {
        Ok(summary) => {
            log_summary(&summary, started.elapsed());
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => fatal(&e),
    }
}

fn run(cli: &Cli, config: &Config) -> ferrocat_types::Result<RunSummary> {
    let options = copy_options(cli, config)?;
    let destination = FileSink::stdout()?;
    let mut session = CatSession::new(destination, options)?;

    let sources = SourceSpec::from_args(&cli.files);
    debug!("Processing {} sources", sources.len());

    session.run(&sources, |e| display_diagnostic(e))
}

/// Merge configuration with command-line overrides
fn copy_options(cli: &Cli, config: &Config) -> ferrocat_types::Result<CopyOptions> {
    let override_size = match cli.buffer_size {
        Some(size) => Some(ChunkSize::new(size).map_err(Error::config)?),
        None => config.io.chunk_size_override()?,
    };

    Ok(CopyOptions {
        strategy: config.io.buffer_strategy(),
        sizing: SizingPolicy {
            override_size,
            large_file_buffers: config.io.large_file_buffers,
        },
    })
}

fn init_logging(verbose: u8, configured_level: &str) -> Result<()> {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => configured_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}

fn usage() -> ExitCode {
    display_usage();
    ExitCode::FAILURE
}

fn fatal(error: &Error) -> ExitCode {
    display_diagnostic(error);
    ExitCode::FAILURE
}
