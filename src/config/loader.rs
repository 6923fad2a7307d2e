//! Configuration Loader
//!
//! Layers an optional YAML/TOML/JSON file under `TYPE_HANDLER__*` environment
//! overrides and deserializes the result into a [`RegistryConfig`].

use super::RegistryConfig;
use crate::error::ConfigurationError;
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Default environment variable prefix (`TYPE_HANDLER__LIST_DELIMITER=|`)
pub const ENV_PREFIX: &str = "TYPE_HANDLER";

#[derive(Debug, Clone)]
enum FileSource {
    Path(PathBuf),
    Inline(String, FileFormat),
}

/// Builder-style loader for [`RegistryConfig`]
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<FileSource>,
    env_prefix: String,
    /// Replaces the process environment when set
    environment: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: ENV_PREFIX.to_string(),
            environment: None,
        }
    }

    /// Read a file; the format follows the extension
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSource::Path(path.into()));
        self
    }

    /// Read configuration from an in-memory document
    pub fn with_content(mut self, content: impl Into<String>, format: FileFormat) -> Self {
        self.file = Some(FileSource::Inline(content.into(), format));
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Use `variables` instead of the process environment
    pub fn with_environment(mut self, variables: HashMap<String, String>) -> Self {
        self.environment = Some(variables);
        self
    }

    pub fn load(&self) -> Result<RegistryConfig, ConfigurationError> {
        let mut builder = Config::builder();

        match &self.file {
            Some(FileSource::Path(path)) => {
                debug!(path = %path.display(), "Loading type handler configuration file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            Some(FileSource::Inline(content, format)) => {
                builder = builder.add_source(File::from_str(content, *format));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true)
                .source(self.environment.clone()),
        );

        let config: RegistryConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            builtins = config.builtins,
            list_delimiter = %config.list_delimiter,
            registrations = config.registrations.len(),
            "Type handler configuration loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
