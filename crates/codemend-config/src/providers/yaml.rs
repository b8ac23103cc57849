//! YAML project configuration provider.
//!
//! Besides loading an existing file, this provider carries the
//! project-configuration capability: it can bootstrap a skeleton
//! configuration for a new project.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::provider::{ConfigurationProvider, ProjectConfigurationProvider};
use crate::providers::ProjectConfigFile;
use crate::types::Configuration;

const SKELETON: &str = "language: rust\nplugins: []\n";

/// Loads a YAML project configuration file into the shared aggregate.
#[derive(Debug)]
pub struct YamlConfigurationProvider {
    path: PathBuf,
}

impl YamlConfigurationProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationProvider for YamlConfigurationProvider {
    fn name(&self) -> &str {
        "yaml-config"
    }

    fn load(&mut self, config: &mut Configuration) -> Result<()> {
        let text = fs::read_to_string(&self.path)?;
        let file: ProjectConfigFile =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "loaded project configuration");
        file.apply(config)
    }

    fn project_capability(&self) -> Option<&dyn ProjectConfigurationProvider> {
        Some(self)
    }

    fn project_capability_mut(&mut self) -> Option<&mut dyn ProjectConfigurationProvider> {
        Some(self)
    }
}

impl ProjectConfigurationProvider for YamlConfigurationProvider {
    fn create_config(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, SKELETON)?;
        info!(path = %self.path.display(), "created project configuration");
        Ok(())
    }

    fn config_path(&self) -> &Path {
        &self.path
    }
}
