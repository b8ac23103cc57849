//! Component registry provider.

use std::sync::Arc;

use tracing::{debug, info};

use codemend_di::RegistryBuilder;

use crate::error::{ConfigError, Result};
use crate::provider::ConfigurationProvider;
use crate::types::{Configuration, BASE_DESCRIPTOR, DESCRIPTOR_DIR, LEGACY_DESCRIPTOR_DIR};

/// Builds the component registry from the base descriptor plus one fragment
/// per discovered plugin.
///
/// Runs last in the built-in chain so it sees the final plugin set. The
/// rebuild is keyed on loader identity: when the configuration's registry was
/// already built for the current loader, the whole pass is skipped and the
/// registry handle survives untouched, which makes re-running the pipeline
/// safe.
#[derive(Debug)]
pub struct ComponentRegistryProvider {
    base_descriptor: String,
}

impl ComponentRegistryProvider {
    pub fn new(base_descriptor: impl Into<String>) -> Self {
        Self {
            base_descriptor: base_descriptor.into(),
        }
    }

    /// Build or skip the registry for the current configuration.
    pub fn load_registry(&self, config: &mut Configuration) -> Result<()> {
        let loader = Arc::clone(config.loader());
        if config.registry().map(|registry| registry.built_for()) == Some(loader.id()) {
            debug!("component registry already current, skipping rebuild");
            return Ok(());
        }

        let mut builder = RegistryBuilder::new(Arc::clone(&loader));
        builder.load_fragment(&self.base_descriptor)?;

        for plugin in config.plugins() {
            let descriptor = plugin.descriptor_name();
            let primary = format!("{DESCRIPTOR_DIR}/{descriptor}.toml");
            if loader.resolve(&primary).is_none() {
                return Err(ConfigError::MissingDescriptor {
                    plugin: plugin.artifact_id().to_string(),
                    resource: primary,
                });
            }
            builder.load_fragment(&primary)?;

            let legacy = format!("{LEGACY_DESCRIPTOR_DIR}/{descriptor}.toml");
            if !builder.load_fragment_if_present(&legacy)? {
                debug!(resource = %legacy, "no legacy descriptor fragment");
            }
        }

        let definitions = builder.definitions().to_vec();
        let registry = Arc::new(builder.build()?);
        info!(components = registry.len(), "component registry built");
        config.set_registry(definitions, registry);
        Ok(())
    }
}

impl Default for ComponentRegistryProvider {
    fn default() -> Self {
        Self::new(BASE_DESCRIPTOR)
    }
}

impl ConfigurationProvider for ComponentRegistryProvider {
    fn name(&self) -> &str {
        "component-registry"
    }

    fn load(&mut self, config: &mut Configuration) -> Result<()> {
        self.load_registry(config)
    }
}
