//! Configuration aggregate and plugin descriptors.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use codemend_common::ResourceLoader;
use codemend_di::{ComponentDefinition, ComponentRegistry};

use crate::error::{ConfigError, Result};
use crate::provider::{ProjectConfigurationProvider, ProjectInitializer};

/// Namespace prefix every plugin artifact carries.
pub const PLUGIN_PREFIX: &str = "codemend-";

/// Suffix every plugin artifact carries.
pub const PLUGIN_SUFFIX: &str = "-plugin";

/// Primary descriptor directory, searched across the loader roots.
pub const DESCRIPTOR_DIR: &str = "meta/codemend";

/// Legacy descriptor directory; fragments here are optional.
pub const LEGACY_DESCRIPTOR_DIR: &str = "meta/codemend2";

/// Base descriptor fragment loaded before any plugin fragment.
pub const BASE_DESCRIPTOR: &str = "application-context.toml";

/// Identifies an installed plugin.
///
/// Ordered by artifact id, so a set of descriptors merges its registry
/// fragments in a deterministic, lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PluginDescriptor {
    artifact_id: String,
    group_id: Option<String>,
    version: Option<String>,
}

impl PluginDescriptor {
    pub fn new(artifact_id: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            group_id: None,
            version: None,
        }
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Derived descriptor filename (without extension), recomputed on demand.
    ///
    /// The artifact id gains the namespace prefix unless already present,
    /// then the plugin suffix unless already present. Idempotent: feeding the
    /// result back through changes nothing.
    pub fn descriptor_name(&self) -> String {
        let mut name = self.artifact_id.clone();
        if !name.starts_with(PLUGIN_PREFIX) {
            name = format!("{PLUGIN_PREFIX}{name}");
        }
        if !name.ends_with(PLUGIN_SUFFIX) {
            name.push_str(PLUGIN_SUFFIX);
        }
        name
    }

    /// Inverse of [`descriptor_name`](Self::descriptor_name): recover an
    /// artifact id from a descriptor filename.
    pub fn from_descriptor_name(name: &str) -> Self {
        let stripped = name.strip_prefix(PLUGIN_PREFIX).unwrap_or(name);
        let stripped = stripped.strip_suffix(PLUGIN_SUFFIX).unwrap_or(stripped);
        Self::new(stripped)
    }
}

impl FromStr for PluginDescriptor {
    type Err = ConfigError;

    /// Parse `artifact`, `group:artifact` or `group:artifact:version`
    /// coordinates.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let invalid = || ConfigError::PluginCoordinates(s.to_string());
        match parts.as_slice() {
            [artifact] if !artifact.is_empty() => Ok(Self::new(*artifact)),
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => Ok(Self {
                artifact_id: (*artifact).to_string(),
                group_id: Some((*group).to_string()),
                version: None,
            }),
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self {
                    artifact_id: (*artifact).to_string(),
                    group_id: Some((*group).to_string()),
                    version: Some((*version).to_string()),
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.group_id, &self.version) {
            (Some(group), Some(version)) => {
                write!(f, "{group}:{}:{version}", self.artifact_id)
            }
            (Some(group), None) => write!(f, "{group}:{}", self.artifact_id),
            _ => write!(f, "{}", self.artifact_id),
        }
    }
}

/// The mutable aggregate threaded through the provider pipeline.
///
/// Created once per manager, passed `&mut` to every provider in order, and
/// handed to callers once the pipeline completes. The component registry is
/// only present after a successful registry build and is always replaced
/// wholesale together with its raw definitions.
pub struct Configuration {
    loader: Arc<ResourceLoader>,
    language: Option<String>,
    writer: Option<String>,
    plugins: BTreeSet<PluginDescriptor>,
    settings: BTreeMap<String, Value>,
    registry_definitions: Vec<ComponentDefinition>,
    registry: Option<Arc<ComponentRegistry>>,
    initializers: Vec<Box<dyn ProjectInitializer>>,
}

impl Configuration {
    pub fn new(loader: Arc<ResourceLoader>) -> Self {
        Self {
            loader,
            language: None,
            writer: None,
            plugins: BTreeSet::new(),
            settings: BTreeMap::new(),
            registry_definitions: Vec::new(),
            registry: None,
            initializers: Vec::new(),
        }
    }

    /// The active loading context.
    pub fn loader(&self) -> &Arc<ResourceLoader> {
        &self.loader
    }

    /// Swap the loading context. Does not touch the registry; the registry
    /// provider notices the identity change on its next run.
    pub fn set_loader(&mut self, loader: Arc<ResourceLoader>) {
        self.loader = loader;
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    pub fn writer(&self) -> Option<&str> {
        self.writer.as_deref()
    }

    pub fn set_writer(&mut self, writer: impl Into<String>) {
        self.writer = Some(writer.into());
    }

    pub fn plugins(&self) -> &BTreeSet<PluginDescriptor> {
        &self.plugins
    }

    /// Add a plugin descriptor; duplicates collapse set-wise.
    pub fn add_plugin(&mut self, plugin: PluginDescriptor) {
        self.plugins.insert(plugin);
    }

    pub fn contains_plugin(&self, plugin: &PluginDescriptor) -> bool {
        self.plugins.contains(plugin)
    }

    pub fn settings(&self) -> &BTreeMap<String, Value> {
        &self.settings
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn set_setting(&mut self, key: impl Into<String>, value: Value) {
        self.settings.insert(key.into(), value);
    }

    /// The finalized component registry, if a registry build has run.
    pub fn registry(&self) -> Option<&Arc<ComponentRegistry>> {
        self.registry.as_ref()
    }

    /// The raw definitions the last registry build accumulated.
    pub fn registry_definitions(&self) -> &[ComponentDefinition] {
        &self.registry_definitions
    }

    /// Store a freshly built registry together with its raw definitions.
    /// Both are replaced wholesale so they cannot drift apart.
    pub fn set_registry(
        &mut self,
        definitions: Vec<ComponentDefinition>,
        registry: Arc<ComponentRegistry>,
    ) {
        self.registry_definitions = definitions;
        self.registry = Some(registry);
    }

    /// Register a hook to run after a project configuration is bootstrapped.
    pub fn add_initializer(&mut self, initializer: Box<dyn ProjectInitializer>) {
        self.initializers.push(initializer);
    }

    /// Run every registered initializer hook with the given project provider
    /// as context, stopping at the first failure.
    pub fn run_initializers(&self, provider: &dyn ProjectConfigurationProvider) -> Result<()> {
        for initializer in &self.initializers {
            initializer.execute(provider)?;
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Arc::new(ResourceLoader::new(vec![])))
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("loader", &self.loader.id())
            .field("language", &self.language)
            .field("writer", &self.writer)
            .field("plugins", &self.plugins)
            .field("settings", &self.settings)
            .field("registry", &self.registry.as_ref().map(|r| r.len()))
            .field("initializers", &self.initializers.len())
            .finish()
    }
}
