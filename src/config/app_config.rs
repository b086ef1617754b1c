use std::path::PathBuf;

use crate::adapters::cipher::aes_gcm_cipher::AesGcmCipher;
use crate::cli::Cli;
use crate::core::errors::{LedgerError, Result};

/// Runtime configuration resolved from flags and environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `settings.json` and `audit.json`.
    pub data_dir: PathBuf,
    /// Process-wide key the stored API key is encrypted with.
    pub encryption_key: String,
    /// Endpoint used by `keyledger test`.
    pub verify_url: String,
}

impl AppConfig {
    /// Resolve the configuration for this invocation.
    ///
    /// Fails with `MissingEncryptionKey` when no encryption key is
    /// configured, unless development mode is on.
    pub fn from_cli(args: &Cli) -> Result<Self> {
        let data_dir = PathBuf::from(&args.data_dir);
        if data_dir.as_os_str().is_empty() {
            return Err(LedgerError::InvalidConfig {
                detail: "data directory must not be empty".into(),
            });
        }

        let url = args.verify_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(LedgerError::InvalidConfig {
                detail: format!("verify URL must be http(s), got '{url}'"),
            });
        }

        Ok(Self {
            data_dir,
            encryption_key: resolve_encryption_key(args.encryption_key.as_deref(), args.dev)?,
            verify_url: url.to_string(),
        })
    }
}

/// Pick the process-wide encryption key.
///
/// In development mode a missing key is replaced by a freshly generated one,
/// reported once on the log channel. Secrets stored with a generated key
/// cannot be read after a restart unless the key is exported.
pub fn resolve_encryption_key(configured: Option<&str>, dev_mode: bool) -> Result<String> {
    if let Some(key) = configured.map(str::trim)
        && !key.is_empty()
    {
        return Ok(key.to_string());
    }

    if !dev_mode {
        return Err(LedgerError::MissingEncryptionKey);
    }

    let generated = AesGcmCipher::generate_passphrase();
    tracing::warn!(
        "KEYLEDGER_ENCRYPTION_KEY is not set; generated a development key. \
         Export it to keep access to stored keys: KEYLEDGER_ENCRYPTION_KEY={generated}"
    );
    Ok(generated)
}
