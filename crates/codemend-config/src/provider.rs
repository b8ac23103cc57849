//! Provider contracts for the configuration pipeline.

use std::path::Path;

use crate::error::Result;
use crate::types::Configuration;

/// A pluggable unit contributing to or transforming the shared configuration.
///
/// The manager calls `init` then `load` on every provider in list order, once
/// per pipeline run. Both receive the shared aggregate `&mut` and observe the
/// effects of every provider before them; either may fail, which aborts the
/// remaining pipeline.
pub trait ConfigurationProvider {
    /// Stable name used for logging and for de-duplication when providers
    /// are registered dynamically.
    fn name(&self) -> &str;

    /// Pre-load setup. Default is a no-op.
    fn init(&mut self, config: &mut Configuration) -> Result<()> {
        let _ = config;
        Ok(())
    }

    /// Contribute to the shared configuration.
    fn load(&mut self, config: &mut Configuration) -> Result<()>;

    /// Explicit capability query: providers that can bootstrap a project
    /// configuration expose themselves here instead of relying on downcasts.
    fn project_capability(&self) -> Option<&dyn ProjectConfigurationProvider> {
        None
    }

    fn project_capability_mut(&mut self) -> Option<&mut dyn ProjectConfigurationProvider> {
        None
    }
}

/// Optional capability: materialize a new primary configuration source.
pub trait ProjectConfigurationProvider {
    /// Create the configuration source if it does not already exist.
    fn create_config(&self) -> Result<()>;

    /// Where the configuration source lives.
    fn config_path(&self) -> &Path;
}

/// Hook run after a project configuration has been bootstrapped, with the
/// project provider as context.
pub trait ProjectInitializer {
    fn execute(&self, provider: &dyn ProjectConfigurationProvider) -> Result<()>;
}
