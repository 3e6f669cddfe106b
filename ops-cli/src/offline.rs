// Local data file backing `--offline`
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use database_layer::{tables, MemoryStore};
use serde_json::Value;
use tracing::debug;

/// Name of the data file, kept next to the session file
pub const DATA_FILE: &str = "offline-store.json";

/// A [`MemoryStore`] loaded from and saved to a JSON file of `table -> rows`
#[derive(Debug, Clone)]
pub struct OfflineData {
    store: Arc<MemoryStore>,
    path: PathBuf,
}

impl OfflineData {
    /// Data file for a session stored at `session_file`
    pub fn path_for(session_file: &Path) -> PathBuf {
        session_file.with_file_name(DATA_FILE)
    }

    /// Load `path`; a missing file gives empty tables
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let store = MemoryStore::new();

        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let snapshot: BTreeMap<String, Vec<Value>> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?;
            for (table, rows) in snapshot {
                store.seed(&table, rows)?;
            }
            debug!(path = %path.display(), "Loaded offline data");
        }

        Ok(Self {
            store: Arc::new(store),
            path,
        })
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let snapshot: BTreeMap<&str, Vec<Value>> = tables::ALL
            .iter()
            .map(|table| (*table, self.store.rows(table)))
            .collect();

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&snapshot)?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Saved offline data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_for() {
        assert_eq!(
            OfflineData::path_for(Path::new(".clinicdesk/session.json")),
            PathBuf::from(".clinicdesk/offline-store.json")
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DATA_FILE);

        let data = OfflineData::load(&path).unwrap();
        assert!(data.store().rows(tables::PATIENTS).is_empty());
        data.store()
            .seed(tables::PATIENTS, vec![json!({"id": "p1", "full_name": "Asha Rao"})])
            .unwrap();
        data.save().unwrap();

        let reloaded = OfflineData::load(&path).unwrap();
        assert_eq!(reloaded.store().rows(tables::PATIENTS).len(), 1);
        assert!(reloaded.store().rows(tables::BILLING).is_empty());
    }
}
