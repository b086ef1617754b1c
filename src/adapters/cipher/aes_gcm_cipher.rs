use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};

use crate::core::errors::{LedgerError, Result};
use crate::core::traits::cipher::SecretCipher;

/// AES-GCM nonce size (12 bytes / 96 bits).
const NONCE_SIZE: usize = 12;

/// PBKDF2 rounds applied to the process-wide encryption key.
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt for deriving the AES key. Fixed per application, so the same
/// encryption key always yields the same AES key across restarts.
const KDF_SALT: &[u8] = b"keyledger/settings/v1";

/// AES-256-GCM cipher for the stored API key.
///
/// Blobs are `<nonce hex>:<ciphertext hex>`, with a fresh random nonce per
/// call. GCM authenticates the ciphertext, so a wrong key or a tampered blob
/// is reported as an error instead of producing garbage plaintext.
pub struct AesGcmCipher {
    key: [u8; 32],
}

impl AesGcmCipher {
    /// Create a cipher from a raw 256-bit key.
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Derive the AES key from the process-wide encryption key with
    /// PBKDF2-HMAC-SHA256.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<sha2::Sha256>(
            passphrase.as_bytes(),
            KDF_SALT,
            PBKDF2_ITERATIONS,
            &mut key,
        );
        Self { key }
    }

    /// Generate a random 256-bit value, hex encoded, suitable as an
    /// encryption key passphrase.
    pub fn generate_passphrase() -> String {
        hex::encode(Aes256Gcm::generate_key(OsRng))
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key))
    }
}

impl SecretCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher()
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| LedgerError::Encryption {
                reason: format!("{e}"),
            })?;

        Ok(format!("{}:{}", hex::encode(nonce), hex::encode(ciphertext)))
    }

    fn decrypt(&self, blob: &str) -> Result<String> {
        let (nonce_hex, ciphertext_hex) =
            blob.split_once(':').ok_or_else(|| LedgerError::Decryption {
                reason: "stored value is not in '<nonce>:<ciphertext>' form".into(),
            })?;

        let nonce_bytes = hex::decode(nonce_hex).map_err(|e| LedgerError::Decryption {
            reason: format!("invalid nonce encoding: {e}"),
        })?;
        if nonce_bytes.len() != NONCE_SIZE {
            return Err(LedgerError::Decryption {
                reason: format!(
                    "nonce must be {NONCE_SIZE} bytes, got {}",
                    nonce_bytes.len()
                ),
            });
        }
        let ciphertext = hex::decode(ciphertext_hex).map_err(|e| LedgerError::Decryption {
            reason: format!("invalid ciphertext encoding: {e}"),
        })?;

        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
            .map_err(|_| LedgerError::Decryption {
                reason: "authentication failed (wrong encryption key or corrupted data)".into(),
            })?;

        String::from_utf8(plaintext).map_err(|e| LedgerError::Decryption {
            reason: format!("decrypted value is not valid UTF-8: {e}"),
        })
    }

    fn name(&self) -> &str {
        "aes-256-gcm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_cipher() -> AesGcmCipher {
        let mut key = [0u8; 32];
        key.copy_from_slice(&Aes256Gcm::generate_key(OsRng));
        AesGcmCipher::new(key)
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let cipher = random_cipher();
        let blob = cipher.encrypt("sk-abc123").unwrap();

        assert!(!blob.contains("sk-abc123"));
        assert_eq!(blob.matches(':').count(), 1);
        assert_eq!(cipher.decrypt(&blob).unwrap(), "sk-abc123");
    }

    #[test]
    fn fresh_nonce_per_call() {
        let cipher = random_cipher();
        let a = cipher.encrypt("sk-same").unwrap();
        let b = cipher.encrypt("sk-same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn same_passphrase_derives_same_key() {
        let blob = AesGcmCipher::from_passphrase("hunter2")
            .encrypt("sk-persisted")
            .unwrap();
        let decrypted = AesGcmCipher::from_passphrase("hunter2")
            .decrypt(&blob)
            .unwrap();
        assert_eq!(decrypted, "sk-persisted");
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let blob = random_cipher().encrypt("sk-secret").unwrap();
        let result = random_cipher().decrypt(&blob);
        assert!(matches!(result, Err(LedgerError::Decryption { .. })));
    }

    #[test]
    fn malformed_blobs_are_rejected() {
        let cipher = random_cipher();
        assert!(cipher.decrypt("no-separator").is_err());
        assert!(cipher.decrypt("zz:00").is_err());
        assert!(cipher.decrypt("0011:00").is_err());

        let blob = cipher.encrypt("sk-secret").unwrap();
        let mut tampered = blob.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == '0' { '1' } else { '0' });
        assert!(cipher.decrypt(&tampered).is_err());
    }

    #[test]
    fn generated_passphrase_is_hex() {
        let passphrase = AesGcmCipher::generate_passphrase();
        assert_eq!(passphrase.len(), 64);
        assert!(passphrase.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(passphrase, AesGcmCipher::generate_passphrase());
    }
}
