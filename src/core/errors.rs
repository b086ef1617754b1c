use std::path::PathBuf;

/// All domain errors for keyledger.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(
        "Invalid API key: {reason}\n\n  \
         Expected format: sk-<letters, digits, '-' or '_'>\n  \
         Example: keyledger set-key sk-proj-abc123"
    )]
    Validation { reason: String },

    #[error(
        "Decryption failed: {reason}\n\n  \
         The stored key could not be decrypted with the current encryption key.\n\n  \
         Solutions:\n    \
         → Check that KEYLEDGER_ENCRYPTION_KEY matches the value used by 'set-key'\n    \
         → Or store the API key again: keyledger set-key <value>"
    )]
    Decryption { reason: String },

    #[error("Encryption failed: {reason}")]
    Encryption { reason: String },

    #[error("Cannot read {}: {detail}", path.display())]
    PersistenceRead { path: PathBuf, detail: String },

    #[error("Cannot write {}: {detail}", path.display())]
    PersistenceWrite { path: PathBuf, detail: String },

    #[error("Verification request failed: {reason}")]
    Transport { reason: String },

    #[error(
        "No encryption key configured\n\n  \
         Solutions:\n    \
         → Export one: export KEYLEDGER_ENCRYPTION_KEY=<random string>\n    \
         → Or pass it once: keyledger --encryption-key <value> <command>\n    \
         → For local experiments only: keyledger --dev <command>"
    )]
    MissingEncryptionKey,

    #[error("Batch of {size} keys exceeds the configured maximum of {max}")]
    BatchTooLarge { size: usize, max: u32 },

    #[error("Rate limit exceeded: {reason}")]
    RateLimited { reason: String },

    #[error(
        "API key verification failed\n\n  \
         Solutions:\n    \
         → Check the key is still active with your provider\n    \
         → Store a new key: keyledger set-key <value>"
    )]
    VerificationFailed,

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
