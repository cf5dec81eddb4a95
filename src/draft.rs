//! Local draft persistence
//!
//! Drafts are stored as one JSON file per key under the platform data
//! directory. Decode failures discard the draft and start from an empty
//! record; a missing platform directory degrades to a no-op store.

use crate::state::IntakeRecord;
use anyhow::Result;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// The single fixed key the intake draft lives under
pub const DRAFT_KEY: &str = "vesselIntakeDraft";

/// Key-value draft storage the form session depends on
pub trait DraftStore {
    /// Fetch the stored text for a key, if any
    fn load(&self, key: &str) -> Option<String>;

    /// Persist text under a key
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the entry for a key (no-op when absent)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Draft storage backed by JSON files in the platform data directory
pub struct FileDraftStore {
    dir: Option<PathBuf>,
}

impl FileDraftStore {
    pub fn new() -> Self {
        let dir = ProjectDirs::from("io", "berthside", "vessel-intake-tui")
            .map(|dirs| dirs.data_dir().to_path_buf());
        Self { dir }
    }

    /// Store rooted at an explicit directory (tests)
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }
}

impl Default for FileDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key)?;
        fs::read_to_string(path).ok()
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if let Some(path) = self.path_for(key) {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, value)?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Some(path) = self.path_for(key) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

/// Serialize a record for storage or submission logging
pub fn encode_record(record: &IntakeRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parse a stored draft; `None` for malformed text
pub fn decode_record(text: &str) -> Option<IntakeRecord> {
    serde_json::from_str(text).ok()
}

/// Load the saved draft, falling back to an empty record on any failure
pub fn hydrate_draft(store: &dyn DraftStore) -> IntakeRecord {
    match store.load(DRAFT_KEY) {
        Some(text) => match decode_record(&text) {
            Some(record) => record,
            None => {
                tracing::warn!("discarding malformed draft");
                IntakeRecord::default()
            }
        },
        None => IntakeRecord::default(),
    }
}

/// Save the in-progress record under the draft key
pub fn persist_draft(store: &dyn DraftStore, record: &IntakeRecord) -> Result<()> {
    store.save(DRAFT_KEY, &encode_record(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileDraftStore) {
        let dir = TempDir::new().unwrap();
        let store = FileDraftStore::with_dir(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        let mut record = IntakeRecord::default();
        record.vessel_name = "MT Kestrel".to_string();
        record.safety_checks.scuppers_plugged = true;

        persist_draft(&store, &record).unwrap();
        assert_eq!(hydrate_draft(&store), record);
    }

    #[test]
    fn test_missing_draft_hydrates_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(hydrate_draft(&store), IntakeRecord::default());
    }

    #[test]
    fn test_malformed_draft_hydrates_empty() {
        let (_dir, store) = temp_store();
        store.save(DRAFT_KEY, "{not json").unwrap();
        assert_eq!(hydrate_draft(&store), IntakeRecord::default());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = temp_store();
        store.save(DRAFT_KEY, "{}").unwrap();
        store.remove(DRAFT_KEY).unwrap();
        assert!(store.load(DRAFT_KEY).is_none());
        // Removing again is not an error
        store.remove(DRAFT_KEY).unwrap();
    }

    #[test]
    fn test_encode_decode_round_trips_checklists() {
        let mut record = IntakeRecord::default();
        for i in 0..crate::state::SafetyChecklist::LEN {
            record.safety_checks.toggle(i);
        }
        record.equipment_checks.toggle(2);

        let encoded = encode_record(&record).unwrap();
        assert_eq!(decode_record(&encoded), Some(record));
    }

    #[test]
    fn test_storeless_fallback_is_a_noop() {
        let store = FileDraftStore { dir: None };
        assert!(store.load(DRAFT_KEY).is_none());
        store.save(DRAFT_KEY, "{}").unwrap();
        store.remove(DRAFT_KEY).unwrap();
    }
}
