//! Writer selection provider.

use tracing::debug;

use crate::error::Result;
use crate::provider::ConfigurationProvider;
use crate::types::Configuration;

/// Writer selected when neither a config file nor a custom provider set one.
pub const DEFAULT_WRITER: &str = "file-writer";

/// Fills in the default writer when no earlier provider selected one.
#[derive(Debug)]
pub struct WritersConfigurationProvider {
    default_writer: String,
}

impl WritersConfigurationProvider {
    pub fn new(default_writer: impl Into<String>) -> Self {
        Self {
            default_writer: default_writer.into(),
        }
    }
}

impl Default for WritersConfigurationProvider {
    fn default() -> Self {
        Self::new(DEFAULT_WRITER)
    }
}

impl ConfigurationProvider for WritersConfigurationProvider {
    fn name(&self) -> &str {
        "writers"
    }

    fn load(&mut self, config: &mut Configuration) -> Result<()> {
        if config.writer().is_none() {
            debug!(writer = %self.default_writer, "defaulting writer");
            config.set_writer(self.default_writer.clone());
        }
        Ok(())
    }
}
