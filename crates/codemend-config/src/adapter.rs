//! Final preparation of an assembled configuration.

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::providers::{DEFAULT_LANGUAGE, DEFAULT_WRITER};
use crate::types::Configuration;

/// Receives the finished configuration after the pipeline for validation and
/// defaulting. Runs once, only when the manager auto-executes.
pub trait ConfigurationAdapter {
    fn prepare(&self, config: &mut Configuration) -> Result<()>;
}

/// Standard preparation: reject blank language/writer selections and fill
/// defaults for anything the pipeline left unset.
#[derive(Debug, Default)]
pub struct DefaultConfigurationAdapter;

impl ConfigurationAdapter for DefaultConfigurationAdapter {
    fn prepare(&self, config: &mut Configuration) -> Result<()> {
        if let Some(language) = config.language() {
            if language.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "language must not be blank".to_string(),
                ));
            }
        } else {
            config.set_language(DEFAULT_LANGUAGE);
        }

        if let Some(writer) = config.writer() {
            if writer.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "writer must not be blank".to_string(),
                ));
            }
        } else {
            config.set_writer(DEFAULT_WRITER);
        }

        debug!(
            language = config.language(),
            writer = config.writer(),
            plugins = config.plugins().len(),
            "configuration prepared"
        );
        Ok(())
    }
}
