use chrono::{DateTime, Utc};

use crate::core::models::audit_entry::AuditEntry;

/// Outcome of a rate-limit check. `reason` is set only when denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl RateLimitDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: String) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Usage summary returned by `Ledger::get_usage_stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageStats {
    pub total_translations: u64,
    pub last_used_at: Option<DateTime<Utc>>,
    /// AI usage events in the last hour.
    pub hourly_usage: usize,
    /// Up to five most recent failed entries, oldest first.
    pub recent_errors: Vec<AuditEntry>,
}
