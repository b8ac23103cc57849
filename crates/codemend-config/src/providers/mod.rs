//! Built-in configuration providers.

pub mod language;
pub mod plugins;
pub mod registry;
pub mod toml;
pub mod writers;
pub mod yaml;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::Configuration;

pub use self::language::{LanguageConfigurationProvider, DEFAULT_LANGUAGE};
pub use self::plugins::PluginsConfigurationProvider;
pub use self::registry::ComponentRegistryProvider;
pub use self::toml::TomlConfigurationProvider;
pub use self::writers::{WritersConfigurationProvider, DEFAULT_WRITER};
pub use self::yaml::YamlConfigurationProvider;

/// On-disk project configuration schema shared by the file-backed providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfigFile {
    pub language: Option<String>,
    pub writer: Option<String>,
    /// Plugin coordinates: `artifact`, `group:artifact` or
    /// `group:artifact:version`.
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub params: BTreeMap<String, Value>,
}

impl ProjectConfigFile {
    /// Merge the parsed file into the shared aggregate.
    pub fn apply(self, config: &mut Configuration) -> Result<()> {
        if let Some(language) = self.language {
            config.set_language(language);
        }
        if let Some(writer) = self.writer {
            config.set_writer(writer);
        }
        for coordinates in self.plugins {
            config.add_plugin(coordinates.parse()?);
        }
        for (key, value) in self.params {
            config.set_setting(key, value);
        }
        Ok(())
    }
}
