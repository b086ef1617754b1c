use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model used when none has been configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Persisted ledger configuration (`settings.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSettings {
    /// `<nonce hex>:<ciphertext hex>`, present once a key has been stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_secret: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub rate_limit: RateLimitPolicy,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            encrypted_secret: None,
            model: default_model(),
            last_used_at: None,
            usage_count: 0,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Limits applied to AI usage events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitPolicy {
    pub max_requests_per_hour: u32,
    pub max_batch_size: u32,
    #[serde(rename = "cooldownMilliseconds")]
    pub cooldown_ms: u64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests_per_hour: 100,
            max_batch_size: 50,
            cooldown_ms: 1000,
        }
    }
}

/// Fields accepted by `Ledger::update_settings`.
///
/// Only the user-editable top-level fields are exposed: the stored secret is
/// replaced through `set_secret` and the usage counters through `log_event`.
/// `rate_limit` replaces the whole policy, it is never merged field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub model: Option<String>,
    pub rate_limit: Option<RateLimitPolicy>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.rate_limit.is_none()
    }

    /// Shallow-merge this patch into `settings`.
    pub fn apply_to(self, settings: &mut LedgerSettings) {
        if let Some(model) = self.model {
            settings.model = model;
        }
        if let Some(rate_limit) = self.rate_limit {
            settings.rate_limit = rate_limit;
        }
    }
}
