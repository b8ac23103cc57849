//! Language selection provider.

use tracing::debug;

use crate::error::Result;
use crate::provider::ConfigurationProvider;
use crate::types::Configuration;

/// Language selected when neither a config file nor a custom provider set
/// one.
pub const DEFAULT_LANGUAGE: &str = "rust";

/// Fills in the default language when no earlier provider selected one.
#[derive(Debug)]
pub struct LanguageConfigurationProvider {
    default_language: String,
}

impl LanguageConfigurationProvider {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }
}

impl Default for LanguageConfigurationProvider {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl ConfigurationProvider for LanguageConfigurationProvider {
    fn name(&self) -> &str {
        "language"
    }

    fn load(&mut self, config: &mut Configuration) -> Result<()> {
        if config.language().is_none() {
            debug!(language = %self.default_language, "defaulting language");
            config.set_language(self.default_language.clone());
        }
        Ok(())
    }
}
