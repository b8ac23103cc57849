//! Declarative component definitions and the descriptor fragment format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{RegistryError, RegistryResult};

/// One declarative component definition.
///
/// `kind` names the component implementation to instantiate; `properties`
/// carries free-form configuration. A string property of the form `"@other"`
/// is a reference to another component by name and is validated when the
/// registry is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl ComponentDefinition {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Names of components this definition references through `@name`
    /// property values.
    pub fn references(&self) -> Vec<&str> {
        self.properties
            .values()
            .filter_map(|value| value.as_str())
            .filter_map(|value| value.strip_prefix('@'))
            .collect()
    }
}

/// A parsed descriptor fragment: the unit in which plugins contribute
/// component definitions.
///
/// On disk a fragment is a TOML file of `[[component]]` tables:
///
/// ```toml
/// [[component]]
/// name = "json-parser"
/// kind = "parser"
///
/// [component.properties]
/// strict = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorFragment {
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentDefinition>,
}

impl DescriptorFragment {
    /// Parse fragment text, naming the resource in the error on failure.
    pub fn parse(resource: &str, text: &str) -> RegistryResult<Self> {
        toml::from_str(text).map_err(|source| RegistryError::Parse {
            resource: resource.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_components_with_properties() {
        let text = r#"
            [[component]]
            name = "json-parser"
            kind = "parser"

            [component.properties]
            strict = true
            formatter = "@json-formatter"

            [[component]]
            name = "json-formatter"
            kind = "formatter"
        "#;

        let fragment = DescriptorFragment::parse("test.toml", text).unwrap();
        assert_eq!(fragment.components.len(), 2);

        let parser = &fragment.components[0];
        assert_eq!(parser.name, "json-parser");
        assert_eq!(parser.kind, "parser");
        assert_eq!(parser.properties["strict"], Value::Bool(true));
        assert_eq!(parser.references(), vec!["json-formatter"]);
    }

    #[test]
    fn empty_fragment_is_valid() {
        let fragment = DescriptorFragment::parse("empty.toml", "").unwrap();
        assert!(fragment.components.is_empty());
    }

    #[test]
    fn parse_error_names_the_resource() {
        let err = DescriptorFragment::parse("broken.toml", "component = 3").unwrap_err();
        assert!(matches!(err, RegistryError::Parse { ref resource, .. } if resource == "broken.toml"));
    }
}
