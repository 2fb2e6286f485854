//! Example data settings resolved by the server configuration layer.

use std::path::{Path, PathBuf};

/// Values controlling example data seeding at startup.
///
/// The server maps its own OrthoConfig-backed settings onto this struct so
/// the library stays independent of how configuration is sourced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleDataSettings {
    /// Seed the record store on startup.
    pub enabled: bool,
    /// Registry file to load instead of the bundled registry.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Whether seeding should run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Registry override, if one was configured.
    pub fn registry_path(&self) -> Option<&Path> {
        self.registry_path.as_deref()
    }
}
