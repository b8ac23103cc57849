//! Registry builder and the finalized component registry.

use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use codemend_common::{LoaderId, ResourceLoader};

use crate::definition::{ComponentDefinition, DescriptorFragment};
use crate::{RegistryError, RegistryResult};

/// An instantiated component in the finalized registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    kind: String,
    properties: BTreeMap<String, Value>,
    references: Vec<String>,
}

impl Component {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Names of other components this one was wired to.
    pub fn references(&self) -> &[String] {
        &self.references
    }
}

/// Accumulates descriptor fragments and finalizes them into a registry.
///
/// Fragments load in call order; a later definition with an already-seen name
/// replaces the earlier one when the registry is built (last writer wins).
pub struct RegistryBuilder {
    loader: Arc<ResourceLoader>,
    definitions: Vec<ComponentDefinition>,
}

impl RegistryBuilder {
    /// Start a builder bound to a loading context. The finalized registry is
    /// tagged with this loader's identity.
    pub fn new(loader: Arc<ResourceLoader>) -> Self {
        Self {
            loader,
            definitions: Vec::new(),
        }
    }

    pub fn loader(&self) -> &Arc<ResourceLoader> {
        &self.loader
    }

    /// The raw definitions accumulated so far, in load order.
    pub fn definitions(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    /// Add a definition directly, bypassing fragment loading.
    pub fn add_definition(&mut self, definition: ComponentDefinition) {
        self.definitions.push(definition);
    }

    /// Load a descriptor fragment by resource path. Fails if no loader root
    /// contains it.
    pub fn load_fragment(&mut self, resource: &str) -> RegistryResult<()> {
        let path = self
            .loader
            .resolve(resource)
            .ok_or_else(|| RegistryError::FragmentNotFound {
                resource: resource.to_string(),
            })?;
        let text = fs::read_to_string(path)?;
        let fragment = DescriptorFragment::parse(resource, &text)?;
        debug!(
            resource,
            components = fragment.components.len(),
            "loaded descriptor fragment"
        );
        self.definitions.extend(fragment.components);
        Ok(())
    }

    /// Probe for a fragment and load it when present. Returns whether it was
    /// found; absence is not an error.
    pub fn load_fragment_if_present(&mut self, resource: &str) -> RegistryResult<bool> {
        if self.loader.resolve(resource).is_none() {
            return Ok(false);
        }
        self.load_fragment(resource)?;
        Ok(true)
    }

    /// Finalize: merge definitions by name (last writer wins), resolve every
    /// `@name` reference, and instantiate the components.
    pub fn build(self) -> RegistryResult<ComponentRegistry> {
        let mut merged: BTreeMap<String, ComponentDefinition> = BTreeMap::new();
        for definition in self.definitions {
            merged.insert(definition.name.clone(), definition);
        }

        let mut components = BTreeMap::new();
        for (name, definition) in &merged {
            let mut references = Vec::new();
            for reference in definition.references() {
                if !merged.contains_key(reference) {
                    return Err(RegistryError::UnresolvedReference {
                        component: name.clone(),
                        reference: reference.to_string(),
                    });
                }
                references.push(reference.to_string());
            }
            components.insert(
                name.clone(),
                Arc::new(Component {
                    name: definition.name.clone(),
                    kind: definition.kind.clone(),
                    properties: definition.properties.clone(),
                    references,
                }),
            );
        }

        debug!(
            components = components.len(),
            loader = ?self.loader.id(),
            "component registry finalized"
        );
        Ok(ComponentRegistry {
            built_for: self.loader.id(),
            components,
        })
    }
}

/// The finalized, immutable registry of instantiated components.
///
/// Always rebuilt wholesale; never patched incrementally. `built_for` records
/// the loading context identity the build used, stored together with the
/// components so the two can never disagree.
#[derive(Debug)]
pub struct ComponentRegistry {
    built_for: LoaderId,
    components: BTreeMap<String, Arc<Component>>,
}

impl ComponentRegistry {
    /// Identity of the loading context this registry was built for.
    pub fn built_for(&self) -> LoaderId {
        self.built_for
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Component>> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
