//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use codemend_di::RegistryError;

/// Configuration result type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while assembling the runtime configuration.
///
/// A provider failure aborts the remaining pipeline and propagates unchanged;
/// there is no partial-success state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid plugin coordinates: {0}")]
    PluginCoordinates(String),

    #[error("missing descriptor for plugin `{plugin}`: {resource}")]
    MissingDescriptor { plugin: String, resource: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration has been destroyed")]
    ConfigurationDestroyed,
}
