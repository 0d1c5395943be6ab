//! Persisted identifier mapping.
//!
//! After a successful reconciliation the local-identifier-to-uuid map is
//! written to `.berth/identifiers.toml` under the project root, keyed by
//! app id, and loaded back as the pinned mapping for the next run. Entries
//! may go stale between runs (registration deleted, type changed); the
//! reconciliation engine discards stale entries rather than failing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Local identifier → remote registration uuid.
pub type IdentifierMap = BTreeMap<String, String>;

const STATE_DIR: &str = ".berth";
const IDENTIFIERS_FILE: &str = "identifiers.toml";

/// Store for loading and saving the identifier file.
#[derive(Debug, Clone)]
pub struct IdentifierStore {
    path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredIdentifiers {
    #[serde(default)]
    apps: BTreeMap<String, AppIdentifiers>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AppIdentifiers {
    #[serde(default)]
    extensions: IdentifierMap,
}

impl IdentifierStore {
    pub fn new(project_root: &Path) -> Self {
        Self {
            path: project_root.join(STATE_DIR).join(IDENTIFIERS_FILE),
        }
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the mapping recorded for an app. A missing file or an app with
    /// no recorded mapping yields an empty map.
    pub fn load(&self, app_id: &str) -> anyhow::Result<IdentifierMap> {
        let stored = self.read()?;
        Ok(stored
            .apps
            .get(app_id)
            .map(|app| app.extensions.clone())
            .unwrap_or_default())
    }

    /// Replace the mapping recorded for an app, keeping other apps' entries.
    pub fn save(&self, app_id: &str, extensions: &IdentifierMap) -> anyhow::Result<()> {
        let mut stored = self.read()?;
        stored.apps.insert(
            app_id.to_string(),
            AppIdentifiers {
                extensions: extensions.clone(),
            },
        );

        let content =
            toml::to_string_pretty(&stored).context("Failed to serialize identifier mapping")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.path, content).with_context(|| {
            format!("Failed to write identifier file: {}", self.path.display())
        })?;
        Ok(())
    }

    fn read(&self) -> anyhow::Result<StoredIdentifiers> {
        if !self.path.exists() {
            return Ok(StoredIdentifiers::default());
        }
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read identifier file: {}", self.path.display())
        })?;
        toml::from_str(&content)
            .with_context(|| format!("Malformed identifier file: {}", self.path.display()))
    }
}
