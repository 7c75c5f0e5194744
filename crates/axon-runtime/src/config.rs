//! Module manifest (axon.json)
//!
//! Naming and metadata overrides the host tooling writes next to the module
//! source. The manifest is auxiliary: a missing or malformed file degrades
//! to no overrides with a warning, it never fails the run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use axon_catalog::Catalog;

/// Parsed `axon.json` contents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    /// Module name override.
    pub name: Option<String>,

    /// Module description override.
    pub description: Option<String>,

    /// Engine version the module was authored against. Recorded by the
    /// host tooling; the runtime does not act on it.
    pub engine_version: Option<String>,
}

impl Manifest {
    /// Load a manifest from `path`.
    ///
    /// Missing files are normal (modules are not required to carry one) and
    /// log at debug. A file that exists but does not parse logs a warning
    /// and also yields the empty manifest.
    pub fn load(path: impl AsRef<Path>) -> Manifest {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                debug!("no manifest at {}", path.display());
                return Manifest::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!("ignoring malformed manifest {}: {}", path.display(), err);
                Manifest::default()
            }
        }
    }

    /// Parse a manifest from a JSON string.
    pub fn from_str(content: &str) -> Result<Manifest, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Apply the overrides to a catalog. Absent fields leave the catalog
    /// untouched.
    pub fn apply(&self, catalog: &mut Catalog) {
        if let Some(name) = &self.name {
            catalog.name = name.clone();
        }
        if let Some(description) = &self.description {
            catalog.description = Some(description.clone());
        }
    }
}
