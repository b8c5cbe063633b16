//! Configuration management system for ferrocat
//!
//! Settings are layered from built-in defaults, an optional configuration
//! file (TOML, YAML or JSON) and `FERROCAT__*` environment variables, in
//! that order of increasing priority. Command-line flags are applied on top
//! by the binary.
//!
//! # Examples
//!
//! ```rust
//! use ferrocat_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .add_defaults()
//!     .add_env_prefix("FERROCAT")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! println!("Reuse buffer: {}", config.io.reuse_buffer);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use ferrocat_types::{BufferStrategy, ChunkSize};
use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "FERROCAT";

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for ferrocat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// I/O configuration
    #[serde(default)]
    pub io: IoConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// I/O configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoConfig {
    /// Fixed chunk size in bytes; probed from the destination when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,
    /// Keep one transfer buffer for the whole run
    #[serde(default = "default_reuse_buffer")]
    pub reuse_buffer: bool,
    /// Use a large buffer when standard output is a regular file
    #[serde(default)]
    pub large_file_buffers: bool,
}

fn default_reuse_buffer() -> bool {
    true
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            buffer_size: None,
            reuse_buffer: default_reuse_buffer(),
            large_file_buffers: false,
        }
    }
}

impl IoConfig {
    /// Validated chunk-size override
    pub fn chunk_size_override(&self) -> ConfigResult<Option<ChunkSize>> {
        self.buffer_size
            .map(|size| ChunkSize::new(size).map_err(ConfigError::validation))
            .transpose()
    }

    /// Buffer strategy selected by `reuse_buffer`
    pub fn buffer_strategy(&self) -> BufferStrategy {
        BufferStrategy::from_reuse(self.reuse_buffer)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set and no `-v` is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Check every field for a usable value
    pub fn validate(&self) -> ConfigResult<()> {
        self.io.chunk_size_override()?;

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::validation(
                "Log level must be one of: trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }
}
