use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditEntry;

/// Port for persisting the audit log.
///
/// The ledger owns ordering and the size cap; a store only reads and
/// writes the whole log.
pub trait AuditStore: Send + Sync {
    /// Load all entries in insertion order. `None` means no log exists yet.
    fn load(&self) -> Result<Option<Vec<AuditEntry>>>;

    /// Replace the persisted log with `entries`.
    fn save(&self, entries: &[AuditEntry]) -> Result<()>;
}
