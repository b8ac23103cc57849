//! TOML project configuration provider.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::provider::ConfigurationProvider;
use crate::providers::ProjectConfigFile;
use crate::types::Configuration;

/// Loads a TOML project configuration file into the shared aggregate.
#[derive(Debug)]
pub struct TomlConfigurationProvider {
    path: PathBuf,
}

impl TomlConfigurationProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationProvider for TomlConfigurationProvider {
    fn name(&self) -> &str {
        "toml-config"
    }

    fn load(&mut self, config: &mut Configuration) -> Result<()> {
        let text = fs::read_to_string(&self.path)?;
        let file: ProjectConfigFile =
            toml::from_str(&text).map_err(|source| ConfigError::Toml {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "loaded project configuration");
        file.apply(config)
    }
}
