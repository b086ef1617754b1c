use crate::core::errors::Result;
use crate::core::models::settings::LedgerSettings;

/// Port for persisting the singleton settings record.
pub trait SettingsStore: Send + Sync {
    /// Load the record. `None` means it has never been written.
    fn load(&self) -> Result<Option<LedgerSettings>>;

    /// Overwrite the persisted record.
    fn save(&self, settings: &LedgerSettings) -> Result<()>;
}
