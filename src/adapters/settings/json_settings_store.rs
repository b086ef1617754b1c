use std::path::{Path, PathBuf};

use crate::adapters::json_file::{read_json, write_json};
use crate::core::errors::Result;
use crate::core::models::settings::LedgerSettings;
use crate::core::traits::settings_store::SettingsStore;

/// Default settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Settings store backed by `{data_dir}/settings.json`.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Option<LedgerSettings>> {
        read_json(&self.path)
    }

    fn save(&self, settings: &LedgerSettings) -> Result<()> {
        write_json(&self.path, settings)
    }
}
