//! Configuration manager: owns the provider list and drives the pipeline.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use codemend_common::ResourceLoader;

use crate::adapter::{ConfigurationAdapter, DefaultConfigurationAdapter};
use crate::error::{ConfigError, Result};
use crate::provider::{ConfigurationProvider, ProjectConfigurationProvider};
use crate::providers::{
    ComponentRegistryProvider, LanguageConfigurationProvider, PluginsConfigurationProvider,
    TomlConfigurationProvider, WritersConfigurationProvider, YamlConfigurationProvider,
};
use crate::types::Configuration;

/// Owns an ordered list of [`ConfigurationProvider`]s and executes them
/// against one [`Configuration`].
///
/// The built-in chain is appended in a fixed order: plugin discovery first,
/// then any caller-supplied providers, then language and writer selection,
/// and the component-registry provider last so it sees the final plugin set.
pub struct ConfigurationManager {
    configuration: Option<Configuration>,
    providers: Vec<Box<dyn ConfigurationProvider>>,
}

impl ConfigurationManager {
    /// Hold a configuration with no providers; nothing runs.
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration: Some(configuration),
            providers: Vec::new(),
        }
    }

    /// Install the built-in chain around the caller-supplied providers and,
    /// when `execute` is set, run the full pipeline followed by the default
    /// adapter.
    pub fn with_providers(
        configuration: Configuration,
        execute: bool,
        providers: Vec<Box<dyn ConfigurationProvider>>,
    ) -> Result<Self> {
        let mut manager = Self::new(configuration);
        manager.install_builtins(execute, providers)?;
        Ok(manager)
    }

    /// Resolve the primary configuration source by file extension (`.toml`
    /// selects the TOML provider, anything else the YAML provider), prepend
    /// the matching file provider and delegate to [`Self::with_providers`]
    /// semantics. The loader defaults to the config file's directory.
    pub fn from_path(
        path: impl AsRef<Path>,
        execute: bool,
        providers: Vec<Box<dyn ConfigurationProvider>>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let root = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let configuration = Configuration::new(Arc::new(ResourceLoader::new(vec![root])));

        let mut manager = Self::new(configuration);
        let file_provider: Box<dyn ConfigurationProvider> =
            if path.extension().and_then(OsStr::to_str) == Some("toml") {
                Box::new(TomlConfigurationProvider::new(path))
            } else {
                Box::new(YamlConfigurationProvider::new(path))
            };
        manager.providers.push(file_provider);
        manager.install_builtins(execute, providers)?;
        Ok(manager)
    }

    fn install_builtins(
        &mut self,
        execute: bool,
        providers: Vec<Box<dyn ConfigurationProvider>>,
    ) -> Result<()> {
        self.providers.push(Box::new(PluginsConfigurationProvider));
        self.providers.extend(providers);
        self.providers
            .push(Box::new(LanguageConfigurationProvider::default()));
        self.providers
            .push(Box::new(WritersConfigurationProvider::default()));
        // the loader can still change before the registry provider runs
        self.providers
            .push(Box::new(ComponentRegistryProvider::default()));
        if execute {
            self.execute_providers()?;
            let configuration = self
                .configuration
                .as_mut()
                .ok_or(ConfigError::ConfigurationDestroyed)?;
            DefaultConfigurationAdapter.prepare(configuration)?;
        }
        Ok(())
    }

    /// Run `init` then `load` on every provider in order. The first failure
    /// aborts the remaining pipeline; the configuration keeps whatever state
    /// the prior providers left.
    pub fn execute_providers(&mut self) -> Result<()> {
        let configuration = self
            .configuration
            .as_mut()
            .ok_or(ConfigError::ConfigurationDestroyed)?;
        for provider in &mut self.providers {
            debug!(provider = provider.name(), "running configuration provider");
            provider.init(configuration)?;
            provider.load(configuration)?;
        }
        Ok(())
    }

    /// First registered provider exposing the project-configuration
    /// capability, if any.
    pub fn project_configuration_provider(&self) -> Option<&dyn ProjectConfigurationProvider> {
        self.providers
            .iter()
            .find_map(|provider| provider.project_capability())
    }

    /// Bootstrap a new project configuration: materialize the config source,
    /// re-run the full pipeline so it gets loaded, then run the
    /// configuration's initializer hooks with the project provider as
    /// context. A no-op when no project provider is registered.
    pub fn run_project_initializers(&mut self) -> Result<()> {
        {
            let Some(project) = self.project_configuration_provider() else {
                return Ok(());
            };
            project.create_config()?;
        }
        self.execute_providers()?;
        if let (Some(configuration), Some(project)) = (
            self.configuration.as_ref(),
            self.project_configuration_provider(),
        ) {
            configuration.run_initializers(project)?;
        }
        Ok(())
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        self.configuration.as_ref()
    }

    pub fn configuration_mut(&mut self) -> Option<&mut Configuration> {
        self.configuration.as_mut()
    }

    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = Some(configuration);
    }

    /// Drop the held configuration. Provider state is untouched; later
    /// pipeline runs fail until a new configuration is set.
    pub fn destroy_configuration(&mut self) {
        self.configuration = None;
    }

    pub fn providers(&self) -> &[Box<dyn ConfigurationProvider>] {
        &self.providers
    }

    pub fn set_providers(&mut self, providers: Vec<Box<dyn ConfigurationProvider>>) {
        self.providers = providers;
    }

    pub fn clear_providers(&mut self) {
        self.providers.clear();
    }

    /// Append a provider unless one with the same name is already
    /// registered.
    pub fn add_provider(&mut self, provider: Box<dyn ConfigurationProvider>) {
        if self
            .providers
            .iter()
            .any(|existing| existing.name() == provider.name())
        {
            debug!(provider = provider.name(), "provider already registered");
            return;
        }
        self.providers.push(provider);
    }
}
