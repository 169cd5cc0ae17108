use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::store::StoreState;

/// Durable storage for the application store snapshot: one JSON record,
/// read once at startup, rewritten on every mutation.
pub struct StoreStorage {
    store_path: PathBuf,
}

impl StoreStorage {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Load the snapshot. A missing file yields defaults; a corrupt file is
    /// backed up, logged, and replaced by defaults.
    pub fn load(&self) -> StoreState {
        if !self.store_path.exists() {
            debug!("Store snapshot does not exist, starting with defaults");
            return StoreState::default();
        }

        let content = match std::fs::read_to_string(&self.store_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read store snapshot: {}", e);
                return StoreState::default();
            }
        };

        match serde_json::from_str::<StoreState>(&content) {
            Ok(state) => {
                info!(
                    "Loaded store snapshot ({} watchlist entries, {} recently viewed)",
                    state.watchlist.len(),
                    state.recently_viewed.len()
                );
                state
            }
            Err(e) => {
                let backup_path = self.store_path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&self.store_path, &backup_path) {
                    warn!(
                        "Store snapshot corrupt ({}) and backup failed ({}). Starting with defaults.",
                        e, backup_err
                    );
                } else {
                    warn!(
                        "Store snapshot corrupt ({}). Backed up to {:?} and starting with defaults.",
                        e, backup_path
                    );
                }
                StoreState::default()
            }
        }
    }

    /// Write the snapshot atomically (temp file + rename).
    pub fn save(&self, state: &StoreState) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let temp_path = self.store_path.with_extension("tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &self.store_path)?;

        debug!("Store snapshot saved to {:?}", self.store_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let storage = StoreStorage::new(dir.path().join("store.json"));
        let state = storage.load();
        assert!(state.watchlist.is_empty());
        assert!(state.filters.search_query.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = StoreStorage::new(dir.path().join("store.json"));

        let mut state = StoreState::default();
        state.filters.search_query = "batman".to_string();
        state.recently_viewed = vec![3, 2, 1];
        storage.save(&state).unwrap();

        let loaded = storage.load();
        assert_eq!(loaded.filters.search_query, "batman");
        assert_eq!(loaded.recently_viewed, vec![3, 2, 1]);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = StoreStorage::new(&path);
        let state = storage.load();
        assert!(state.watchlist.is_empty());
        // Corrupt snapshot kept as a backup
        assert!(dir.path().join("store.json.bak").exists());
    }
}
