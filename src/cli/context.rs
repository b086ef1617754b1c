use crate::adapters::audit::json_audit_store::JsonAuditStore;
use crate::adapters::cipher::aes_gcm_cipher::AesGcmCipher;
use crate::adapters::settings::json_settings_store::JsonSettingsStore;
use crate::adapters::verifier::http_verifier::HttpVerifier;
use crate::config::app_config::AppConfig;
use crate::core::services::ledger::Ledger;

/// The ledger as wired for the CLI: JSON files, AES-256-GCM and an HTTP verifier.
pub type FileLedger = Ledger<JsonAuditStore, JsonSettingsStore, AesGcmCipher, HttpVerifier>;

/// Build a ledger over the data directory named in `config`.
pub fn open_ledger(config: &AppConfig) -> FileLedger {
    let audit = JsonAuditStore::new(&config.data_dir);
    let settings = JsonSettingsStore::new(&config.data_dir);
    tracing::debug!(
        settings = %settings.path().display(),
        audit = %audit.path().display(),
        "opening ledger"
    );
    Ledger::new(
        audit,
        settings,
        AesGcmCipher::from_passphrase(&config.encryption_key),
        HttpVerifier::new(config.verify_url.clone()),
    )
}
