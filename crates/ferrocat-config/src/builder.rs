//! Configuration builder for flexible configuration loading

use crate::{Config, ConfigError, ConfigResult};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Separator between nested keys in environment variable names
const ENV_SEPARATOR: &str = "__";

/// Configuration builder for loading configuration from multiple sources
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<ConfigSource>,
    defaults: bool,
}

#[derive(Debug, Clone)]
enum ConfigSource {
    File { path: PathBuf, format: FileFormat },
    Environment { prefix: String },
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
            defaults: false,
        }
    }

    /// Use the built-in defaults as the lowest-priority layer
    pub fn add_defaults(mut self) -> Self {
        self.defaults = true;
        self
    }

    /// Add a configuration file source; missing files are skipped
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ConfigSource::File { path, format });
        self
    }

    /// Add environment variable source with prefix
    ///
    /// Nested keys are separated by `__`, e.g. `FERROCAT__IO__BUFFER_SIZE`.
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(ConfigSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Build the configuration
    pub fn build(mut self) -> ConfigResult<Config> {
        if self.defaults {
            let defaults_value = serde_yaml::to_value(Config::default()).map_err(|e| {
                ConfigError::serialization(format!("Failed to serialize defaults: {}", e))
            })?;
            self.inner = self
                .inner
                .add_source(config::Config::try_from(&defaults_value)?);
        }

        for source in &self.sources {
            match source {
                ConfigSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                ConfigSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix)
                            .separator(ENV_SEPARATOR)
                            .try_parsing(true),
                    );
                }
            }
        }

        let config: Config = self.inner.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Detect file format from extension
    pub(crate) fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().add_defaults().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_without_defaults_layer() {
        let file = config_file(".toml", "[io]\nlarge_file_buffers = true\n");

        let config = ConfigBuilder::new()
            .add_source_file(file.path())
            .build()
            .unwrap();

        assert!(config.io.large_file_buffers);
        assert!(config.io.reuse_buffer);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_builder_toml_file() {
        let file = config_file(
            ".toml",
            r#"
[io]
buffer_size = 16384
reuse_buffer = false

[logging]
level = "debug"
"#,
        );

        let config = ConfigBuilder::new()
            .add_defaults()
            .add_source_file(file.path())
            .build()
            .unwrap();

        assert_eq!(config.io.buffer_size, Some(16384));
        assert!(!config.io.reuse_buffer);
        assert!(!config.io.large_file_buffers);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_builder_yaml_file() {
        let file = config_file(
            ".yaml",
            r#"
io:
  large_file_buffers: true
"#,
        );

        let config = ConfigBuilder::new()
            .add_defaults()
            .add_source_file(file.path())
            .build()
            .unwrap();

        assert!(config.io.large_file_buffers);
        assert!(config.io.reuse_buffer);
    }

    #[test]
    fn test_builder_validation() {
        let file = config_file(".toml", "[io]\nbuffer_size = 0\n");

        let result = ConfigBuilder::new()
            .add_defaults()
            .add_source_file(file.path())
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Chunk size must be greater than 0"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = config_file(".toml", "[io]\nbuffer_size = 16384\n");
        std::env::set_var("FERROCAT_BUILDER_TEST__IO__BUFFER_SIZE", "32768");
        std::env::set_var("FERROCAT_BUILDER_TEST__IO__REUSE_BUFFER", "false");

        let config = ConfigBuilder::new()
            .add_defaults()
            .add_source_file(file.path())
            .add_env_prefix("FERROCAT_BUILDER_TEST")
            .build()
            .unwrap();

        std::env::remove_var("FERROCAT_BUILDER_TEST__IO__BUFFER_SIZE");
        std::env::remove_var("FERROCAT_BUILDER_TEST__IO__REUSE_BUFFER");

        assert_eq!(config.io.buffer_size, Some(32768));
        assert!(!config.io.reuse_buffer);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let config = ConfigBuilder::new()
            .add_defaults()
            .add_source_file("/nonexistent/ferrocat.toml")
            .build()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(ConfigBuilder::detect_format(Path::new("a.yml")), FileFormat::Yaml);
        assert_eq!(ConfigBuilder::detect_format(Path::new("a.json")), FileFormat::Json);
        assert_eq!(ConfigBuilder::detect_format(Path::new("a.toml")), FileFormat::Toml);
        assert_eq!(ConfigBuilder::detect_format(Path::new("a")), FileFormat::Toml);
    }
}
