//! Component registry for codemend.
//!
//! Plugins contribute declarative component definitions through descriptor
//! fragments (TOML files resolved against a [`ResourceLoader`]). The
//! [`RegistryBuilder`] accumulates fragments in load order and finalizes them
//! into an immutable [`ComponentRegistry`] tagged with the loader identity it
//! was built for, so callers can tell whether a registry is still current for
//! a given loading context.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use codemend_di::RegistryBuilder;
//!
//! let mut builder = RegistryBuilder::new(loader);
//! builder.load_fragment("application-context.toml")?;
//! builder.load_fragment("meta/codemend/codemend-json-plugin.toml")?;
//! let registry = builder.build()?;
//! let parser = registry.get("json-parser").unwrap();
//! ```

pub mod definition;
pub mod registry;

use thiserror::Error;

pub use codemend_common::{LoaderId, ResourceLoader};
pub use definition::{ComponentDefinition, DescriptorFragment};
pub use registry::{Component, ComponentRegistry, RegistryBuilder};

/// Errors raised while loading descriptor fragments or finalizing a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("descriptor fragment not found: {resource}")]
    FragmentNotFound { resource: String },

    #[error("failed to parse descriptor fragment {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("component `{component}` references unknown component `{reference}`")]
    UnresolvedReference {
        component: String,
        reference: String,
    },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
