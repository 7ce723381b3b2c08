//! Category preferences persisted on disk.
//!
//! One JSON document with a versioned schema replaces the ad hoc blob the web
//! client kept in local storage. The feed reads preferences at mount; only
//! the settings view writes them.

use crate::errors::{NewsflowError, NewsflowResult};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const PREFERENCES_VERSION: u32 = 1;

pub fn default_categories() -> Vec<String> {
    vec!["Technology".to_string(), "Science".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredPreferences {
    pub version: u32,
    pub categories: Vec<String>,
}

impl Default for StoredPreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            categories: default_categories(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> NewsflowResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            NewsflowError::preferences_error("Could not determine config directory")
        })?;
        Ok(Self::new(config_dir.join("newsflow").join("preferences.json")))
    }

    /// Reads the stored selection. A missing file, unreadable content or an
    /// unknown schema version all yield the default selection; a corrupt
    /// store never takes a page down.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return default_categories(),
        };
        match serde_json::from_str::<StoredPreferences>(&raw) {
            Ok(prefs) if prefs.version == PREFERENCES_VERSION => prefs.categories,
            Ok(prefs) => {
                log::warn!(
                    "preferences file has unknown version {}, using defaults",
                    prefs.version
                );
                default_categories()
            }
            Err(e) => {
                log::warn!("failed to parse preferences: {}, using defaults", e);
                default_categories()
            }
        }
    }

    /// Persists the selection as a full rewrite. The document is written to a
    /// sibling temp file and renamed so readers never see a half-written
    /// store.
    pub fn save(&self, categories: &[String]) -> NewsflowResult<()> {
        let prefs = StoredPreferences {
            version: PREFERENCES_VERSION,
            categories: categories.to_vec(),
        };
        let serialized = serde_json::to_string_pretty(&prefs)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NewsflowError::preferences_error(format!(
                    "Failed to create preferences directory: {}",
                    e
                ))
            })?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &serialized).map_err(|e| {
            NewsflowError::preferences_error(format!("Failed to write preferences: {}", e))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            NewsflowError::preferences_error(format!("Failed to replace preferences: {}", e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_persists_exact_versioned_document() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        let categories = vec!["Technology".to_string(), "Science".to_string()];
        store.save(&categories).unwrap();

        let raw = fs::read_to_string(dir.path().join("preferences.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "version": 1,
                "categories": ["Technology", "Science"]
            })
        );
    }

    #[test]
    fn load_restores_saved_selection() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        let categories = vec!["Health".to_string(), "World".to_string()];
        store.save(&categories).unwrap();
        assert_eq!(store.load(), categories);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load(), default_categories());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();
        let store = PreferenceStore::new(path);
        assert_eq!(store.load(), default_categories());
    }

    #[test]
    fn unknown_version_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"version": 99, "categories": ["Art"]}"#).unwrap();
        let store = PreferenceStore::new(path);
        assert_eq!(store.load(), default_categories());
    }

    #[test]
    fn save_overwrites_previous_selection() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("preferences.json"));
        store.save(&["Art".to_string()]).unwrap();
        store.save(&["Sports".to_string()]).unwrap();
        assert_eq!(store.load(), vec!["Sports".to_string()]);
    }
}
