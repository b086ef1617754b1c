use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::core::errors::{LedgerError, Result};
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::settings::{LedgerSettings, SettingsPatch};
use crate::core::models::usage::{RateLimitDecision, UsageStats};
use crate::core::services::key_format;
use crate::core::services::rate_limiter::{self, RateLimiter};
use crate::core::traits::audit::AuditStore;
use crate::core::traits::cipher::SecretCipher;
use crate::core::traits::settings_store::SettingsStore;
use crate::core::traits::verifier::KeyVerifier;

/// Maximum number of entries kept in the audit log.
pub const MAX_AUDIT_ENTRIES: usize = 1000;

/// Default page size for `get_audit_log`.
pub const DEFAULT_AUDIT_LIMIT: usize = 50;

/// Number of failed entries reported by `get_usage_stats`.
const RECENT_ERRORS: usize = 5;

/// Owns the encrypted API key, the usage counters and the audit log.
///
/// All read-modify-write sequences on the two persisted artifacts run
/// under one lock, so concurrent callers sharing a `Ledger` never lose
/// updates. Separate processes are not coordinated.
pub struct Ledger<A: AuditStore, S: SettingsStore, C: SecretCipher, V: KeyVerifier> {
    audit: A,
    settings: S,
    cipher: C,
    verifier: V,
    lock: Mutex<()>,
}

impl<A, S, C, V> Ledger<A, S, C, V>
where
    A: AuditStore,
    S: SettingsStore,
    C: SecretCipher,
    V: KeyVerifier,
{
    pub fn new(audit: A, settings: S, cipher: C, verifier: V) -> Self {
        Self {
            audit,
            settings,
            cipher,
            verifier,
            lock: Mutex::new(()),
        }
    }

    /// Validate, encrypt and store `raw`, replacing any previous key.
    ///
    /// Invalid input is rejected before anything is written.
    pub fn set_secret(&self, raw: &str) -> Result<()> {
        key_format::validate(raw)?;
        let blob = self.cipher.encrypt(raw)?;

        let _guard = self.guard();
        let mut settings = self.load_settings_for_update()?;
        settings.encrypted_secret = Some(blob);
        self.settings.save(&settings)?;
        tracing::info!(cipher = self.cipher.name(), "stored new API key");
        Ok(())
    }

    /// Decrypt the stored key. `Ok(None)` when no key has been set.
    pub fn try_get_secret(&self) -> Result<Option<String>> {
        let settings = {
            let _guard = self.guard();
            self.load_settings()
        };
        settings
            .encrypted_secret
            .map(|blob| self.cipher.decrypt(&blob))
            .transpose()
    }

    /// Decrypted key, or `None` if there is none or it cannot be decrypted.
    /// Decryption failures are logged.
    pub fn get_secret(&self) -> Option<String> {
        match self.try_get_secret() {
            Ok(secret) => secret,
            Err(e) => {
                tracing::error!("could not decrypt stored API key: {e}");
                None
            }
        }
    }

    /// Ask the provider whether the stored key is accepted.
    ///
    /// Returns false without any network traffic when no usable key is
    /// stored. Transport failures count as false. The CLI decrypts once
    /// itself and calls `verify_secret`.
    #[allow(dead_code)]
    pub async fn test_secret_validity(&self) -> bool {
        match self.get_secret() {
            Some(secret) => self.verify_secret(&secret).await,
            None => false,
        }
    }

    /// Ask the provider whether an already decrypted `secret` is accepted.
    /// Transport failures count as false.
    pub async fn verify_secret(&self, secret: &str) -> bool {
        match self.verifier.verify(secret).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        }
    }

    /// Evaluate the rate-limit policy against the current audit log.
    pub fn check_rate_limit(&self) -> RateLimitDecision {
        let (settings, entries) = {
            let _guard = self.guard();
            (self.load_settings(), self.load_audit())
        };
        RateLimiter::new(settings.rate_limit).evaluate(&entries, Utc::now())
    }

    /// Reject batches larger than the configured `maxBatchSize`.
    pub fn validate_batch(&self, size: usize) -> Result<()> {
        let max = self.get_settings().rate_limit.max_batch_size;
        if size > max as usize {
            return Err(LedgerError::BatchTooLarge { size, max });
        }
        Ok(())
    }

    /// Record one AI usage event and bump the usage counters.
    ///
    /// Both files are read before either is written, and an unreadable file
    /// fails the call instead of being replaced. The audit log is written
    /// first; if that fails the counters are left untouched. The two files
    /// are not updated transactionally.
    pub fn log_event(
        &self,
        subject_keys: Vec<String>,
        locale: &str,
        success: bool,
        user_id: Option<String>,
        error: Option<String>,
    ) -> Result<()> {
        let entry = AuditEntry::ai_usage(subject_keys, locale, success, user_id, error, Utc::now());
        let timestamp = entry.timestamp;

        let _guard = self.guard();
        let mut settings = self.load_settings_for_update()?;
        let mut entries = self.load_audit_for_update()?;

        push_capped(&mut entries, entry);
        self.audit.save(&entries)?;

        settings.usage_count += 1;
        settings.last_used_at = Some(timestamp);
        self.settings.save(&settings)?;

        tracing::debug!(usage_count = settings.usage_count, "logged usage event");
        Ok(())
    }

    /// Counters and recent failures for display.
    pub fn get_usage_stats(&self) -> UsageStats {
        let (settings, entries) = {
            let _guard = self.guard();
            (self.load_settings(), self.load_audit())
        };

        let mut recent_errors: Vec<AuditEntry> = entries
            .iter()
            .rev()
            .filter(|e| !e.success)
            .take(RECENT_ERRORS)
            .cloned()
            .collect();
        recent_errors.reverse();

        UsageStats {
            total_translations: settings.usage_count,
            last_used_at: settings.last_used_at,
            hourly_usage: rate_limiter::hourly_usage(&entries, Utc::now()),
            recent_errors,
        }
    }

    /// Up to `limit` entries, newest first.
    pub fn get_audit_log(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = {
            let _guard = self.guard();
            self.load_audit()
        };
        newest_first(entries, limit)
    }

    /// Like `get_audit_log`, keeping only entries with `action`.
    pub fn get_audit_log_for(&self, action: AuditAction, limit: usize) -> Vec<AuditEntry> {
        let entries = {
            let _guard = self.guard();
            self.load_audit()
        };
        let filtered = entries.into_iter().filter(|e| e.action == action).collect();
        newest_first(filtered, limit)
    }

    /// Shallow-merge `patch` into the stored settings.
    pub fn update_settings(&self, patch: SettingsPatch) -> Result<LedgerSettings> {
        let _guard = self.guard();
        let mut settings = self.load_settings_for_update()?;
        patch.apply_to(&mut settings);
        self.settings.save(&settings)?;
        Ok(settings)
    }

    /// Current settings, persisting the defaults on first access.
    pub fn get_settings(&self) -> LedgerSettings {
        let _guard = self.guard();
        self.load_settings()
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The lock protects no data of its own, so a poisoned lock is still usable.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load settings, writing defaults if none exist yet. Read errors fall
    /// back to defaults without overwriting the unreadable file.
    fn load_settings(&self) -> LedgerSettings {
        match self.settings.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let settings = LedgerSettings::default();
                if let Err(e) = self.settings.save(&settings) {
                    tracing::warn!("could not create default settings: {e}");
                }
                settings
            }
            Err(e) => {
                tracing::error!("{e}; using default settings");
                LedgerSettings::default()
            }
        }
    }

    /// Starting point for an operation that rewrites settings. Missing means
    /// defaults; a read error is returned so the caller never writes over
    /// a file it could not read.
    fn load_settings_for_update(&self) -> Result<LedgerSettings> {
        Ok(self.settings.load()?.unwrap_or_default())
    }

    /// Load the audit log, creating an empty one if missing. Read errors
    /// fall back to an empty log.
    fn load_audit(&self) -> Vec<AuditEntry> {
        match self.audit.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                if let Err(e) = self.audit.save(&[]) {
                    tracing::warn!("could not create audit log: {e}");
                }
                Vec::new()
            }
            Err(e) => {
                tracing::error!("{e}; using an empty audit log");
                Vec::new()
            }
        }
    }

    fn load_audit_for_update(&self) -> Result<Vec<AuditEntry>> {
        Ok(self.audit.load()?.unwrap_or_default())
    }
}

/// Append `entry`, dropping the oldest entries beyond `MAX_AUDIT_ENTRIES`.
fn push_capped(entries: &mut Vec<AuditEntry>, entry: AuditEntry) {
    entries.push(entry);
    if entries.len() > MAX_AUDIT_ENTRIES {
        let excess = entries.len() - MAX_AUDIT_ENTRIES;
        entries.drain(..excess);
    }
}

/// Sort by timestamp descending and keep `limit` entries. Entries with equal
/// timestamps keep newest-logged first.
fn newest_first(mut entries: Vec<AuditEntry>, limit: usize) -> Vec<AuditEntry> {
    entries.reverse();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(limit);
    entries
}
