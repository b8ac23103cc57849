//! Configuration pipeline for codemend.
//!
//! A [`ConfigurationManager`] owns an ordered list of
//! [`ConfigurationProvider`]s and drives them against one shared
//! [`Configuration`] aggregate: each provider is initialized and loaded in
//! order, observing the effects of every provider before it. The built-in
//! chain discovers installed plugins, applies the project configuration file
//! (TOML or YAML), fills language and writer defaults, and finally builds the
//! component registry from the discovered plugin descriptors.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use codemend_config::ConfigurationManager;
//!
//! let manager = ConfigurationManager::from_path("codemend.yml", true, vec![])?;
//! let configuration = manager.configuration().unwrap();
//! let registry = configuration.registry().unwrap();
//! ```

pub mod adapter;
pub mod error;
pub mod manager;
pub mod provider;
pub mod providers;
pub mod types;

pub use adapter::{ConfigurationAdapter, DefaultConfigurationAdapter};
pub use error::{ConfigError, Result};
pub use manager::ConfigurationManager;
pub use provider::{ConfigurationProvider, ProjectConfigurationProvider, ProjectInitializer};
pub use types::{Configuration, PluginDescriptor};
