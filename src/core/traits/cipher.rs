use crate::core::errors::Result;

/// Port for encrypting the stored API key.
///
/// Implementations live in `adapters::cipher`. The core layer only
/// depends on this trait, never on a concrete algorithm.
pub trait SecretCipher: Send + Sync {
    /// Encrypt `plaintext` into a self-contained, printable blob.
    fn encrypt(&self, plaintext: &str) -> Result<String>;

    /// Decrypt a blob produced by `encrypt`.
    fn decrypt(&self, blob: &str) -> Result<String>;

    /// Human-readable name of this cipher (e.g. "aes-256-gcm").
    fn name(&self) -> &str;
}
