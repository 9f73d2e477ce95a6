//! On-disk save slot, config file and exports.

use super::codec::{decode, export_file_name, SaveDocument};
use crate::core::config::GameConfig;
use crate::core::constants::{CONFIG_FILE_NAME, SAVE_FILE_NAME};
use crate::core::error::GameError;
use crate::utils::persistence::{data_dir, load_json_or_default, save_json};
use std::fs;
use std::path::{Path, PathBuf};

/// Manages the save document and config in one directory.
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Store in the per-user data directory.
    pub fn new() -> Result<Self, GameError> {
        Ok(Self { dir: data_dir()? })
    }

    pub fn new_in(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in a fresh directory under the system temp dir.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new_in(std::env::temp_dir().join(format!(
            "xianxia_store_test_{}_{}",
            std::process::id(),
            id
        )))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE_NAME)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    pub fn exists(&self) -> bool {
        self.save_path().exists()
    }

    pub fn save(&self, document: &SaveDocument) -> Result<(), GameError> {
        save_json(&self.save_path(), document)?;
        tracing::debug!(path = %self.save_path().display(), "saved");
        Ok(())
    }

    /// `Ok(None)` when no save exists yet.
    pub fn load(&self) -> Result<Option<SaveDocument>, GameError> {
        let path = self.save_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        decode(&json).map(Some)
    }

    pub fn delete(&self) -> Result<(), GameError> {
        let path = self.save_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Missing or invalid config falls back to defaults.
    pub fn load_config(&self) -> GameConfig {
        load_json_or_default::<GameConfig>(&self.config_path()).normalized()
    }

    /// Write an export file into `dir` and return its path.
    pub fn export_to(dir: &Path, document: &SaveDocument, unix_ms: i64) -> Result<PathBuf, GameError> {
        let path = dir.join(export_file_name(&document.character, unix_ms));
        save_json(&path, document)?;
        tracing::info!(path = %path.display(), "exported save");
        Ok(path)
    }

    /// Raw contents of an import file; decoding happens on import.
    pub fn read_import(path: &Path) -> Result<String, GameError> {
        Ok(fs::read_to_string(path)?)
    }
}
