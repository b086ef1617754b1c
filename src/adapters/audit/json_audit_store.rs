use std::path::{Path, PathBuf};

use crate::adapters::json_file::{read_json, write_json};
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditEntry;
use crate::core::traits::audit::AuditStore;

/// Default audit log file name inside the data directory.
pub const AUDIT_FILE: &str = "audit.json";

/// Audit store that keeps the whole log as one pretty-printed JSON array.
pub struct JsonAuditStore {
    log_path: PathBuf,
}

impl JsonAuditStore {
    /// Create a store that reads and writes `{data_dir}/audit.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            log_path: data_dir.join(AUDIT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

impl AuditStore for JsonAuditStore {
    fn load(&self) -> Result<Option<Vec<AuditEntry>>> {
        read_json(&self.log_path)
    }

    fn save(&self, entries: &[AuditEntry]) -> Result<()> {
        write_json(&self.log_path, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::LedgerError;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_entry(key: &str, success: bool) -> AuditEntry {
        AuditEntry::ai_usage(
            vec![key.to_string()],
            "fr",
            success,
            None,
            (!success).then(|| "boom".to_string()),
            Utc::now(),
        )
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = JsonAuditStore::new(tmp.path());

        let entries = vec![sample_entry("a", true), sample_entry("b", false)];
        store.save(&entries).unwrap();

        assert_eq!(store.load().unwrap(), Some(entries));
    }

    #[test]
    fn load_nonexistent_file_returns_none() {
        let store = JsonAuditStore::new(Path::new("/nonexistent"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_is_a_pretty_json_array() {
        let tmp = TempDir::new().unwrap();
        let store = JsonAuditStore::new(tmp.path());
        store.save(&[sample_entry("home.title", true)]).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.contains("\"action\": \"ai_translate\""));
        assert!(content.contains("\"home.title\""));
    }

    #[test]
    fn malformed_log_is_reported() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(AUDIT_FILE), "[{\"id\": 1}]").unwrap();

        let store = JsonAuditStore::new(tmp.path());
        assert!(matches!(
            store.load(),
            Err(LedgerError::PersistenceRead { .. })
        ));
    }
}
