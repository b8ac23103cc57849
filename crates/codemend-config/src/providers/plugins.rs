//! Plugin discovery provider.

use tracing::debug;

use crate::error::Result;
use crate::provider::ConfigurationProvider;
use crate::types::{Configuration, PluginDescriptor, DESCRIPTOR_DIR};

/// Discovers installed plugins by listing the primary descriptor directory
/// across the loader roots and merging a descriptor for every fragment found.
///
/// Runs first in the built-in chain so later providers see the full plugin
/// set.
#[derive(Debug, Default)]
pub struct PluginsConfigurationProvider;

impl ConfigurationProvider for PluginsConfigurationProvider {
    fn name(&self) -> &str {
        "plugins"
    }

    fn load(&mut self, config: &mut Configuration) -> Result<()> {
        for file in config.loader().list(DESCRIPTOR_DIR) {
            let Some(stem) = file.strip_suffix(".toml") else {
                continue;
            };
            let descriptor = PluginDescriptor::from_descriptor_name(stem);
            if !config.contains_plugin(&descriptor) {
                debug!(artifact = descriptor.artifact_id(), "discovered plugin");
                config.add_plugin(descriptor);
            }
        }
        Ok(())
    }
}
