use chrono::{DateTime, Duration, Utc};

use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::models::settings::RateLimitPolicy;
use crate::core::models::usage::RateLimitDecision;

/// Length of the sliding window for the hourly cap.
pub fn hourly_window() -> Duration {
    Duration::hours(1)
}

/// Applies a `RateLimitPolicy` to the AI usage entries of an audit log.
pub struct RateLimiter {
    policy: RateLimitPolicy,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self { policy }
    }

    /// Decide whether another AI request may run at `now`.
    ///
    /// The hourly cap is checked first, then the cooldown. Only the first
    /// failing rule is reported.
    pub fn evaluate(&self, entries: &[AuditEntry], now: DateTime<Utc>) -> RateLimitDecision {
        let recent = hourly_usage(entries, now);
        let max = self.policy.max_requests_per_hour;
        if recent >= max as usize {
            return RateLimitDecision::deny(format!(
                "Hourly limit reached: {recent} requests in the last hour (limit {max})"
            ));
        }

        if let Some(last) = last_ai_request(entries) {
            let elapsed_ms = (now - last.timestamp).num_milliseconds();
            let cooldown_ms = i64::try_from(self.policy.cooldown_ms).unwrap_or(i64::MAX);
            if elapsed_ms < cooldown_ms {
                let remaining_ms = cooldown_ms.saturating_sub(elapsed_ms);
                let wait_secs = (remaining_ms + 999) / 1000;
                return RateLimitDecision::deny(format!(
                    "Cooldown active: wait {wait_secs} more second(s)"
                ));
            }
        }

        RateLimitDecision::allow()
    }
}

/// Number of AI requests with a timestamp strictly inside the last hour.
pub fn hourly_usage(entries: &[AuditEntry], now: DateTime<Utc>) -> usize {
    let since = now - hourly_window();
    entries
        .iter()
        .filter(|e| e.action == AuditAction::AiTranslate && e.timestamp > since)
        .count()
}

/// Most recent AI request by timestamp. On equal timestamps the entry
/// logged last wins.
pub fn last_ai_request(entries: &[AuditEntry]) -> Option<&AuditEntry> {
    entries
        .iter()
        .filter(|e| e.action == AuditAction::AiTranslate)
        .max_by_key(|e| e.timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_entry::AuditSource;

    fn ai_at(timestamp: DateTime<Utc>) -> AuditEntry {
        AuditEntry::ai_usage(vec!["k".into()], "fr", true, None, None, timestamp)
    }

    fn policy(max_per_hour: u32, cooldown_ms: u64) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests_per_hour: max_per_hour,
            max_batch_size: 50,
            cooldown_ms,
        }
    }

    #[test]
    fn empty_log_is_allowed() {
        let limiter = RateLimiter::new(policy(3, 5000));
        assert_eq!(limiter.evaluate(&[], Utc::now()), RateLimitDecision::allow());
    }

    #[test]
    fn hourly_cap_denies_at_limit() {
        let now = Utc::now();
        let entries: Vec<_> = (1..=3).map(|m| ai_at(now - Duration::minutes(m * 10))).collect();

        let decision = RateLimiter::new(policy(3, 0)).evaluate(&entries, now);
        assert!(!decision.allowed);
        let reason = decision.reason.unwrap();
        assert!(reason.contains("3 requests"), "{reason}");
        assert!(reason.contains("limit 3"), "{reason}");
    }

    #[test]
    fn hourly_cap_allows_below_limit() {
        let now = Utc::now();
        let entries: Vec<_> = (1..=2).map(|m| ai_at(now - Duration::minutes(m * 10))).collect();

        let decision = RateLimiter::new(policy(3, 0)).evaluate(&entries, now);
        assert!(decision.allowed);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let now = Utc::now();
        let entries = vec![
            ai_at(now - Duration::hours(1)),
            ai_at(now - Duration::hours(1) + Duration::milliseconds(1)),
        ];
        assert_eq!(hourly_usage(&entries, now), 1);
    }

    #[test]
    fn only_ai_requests_count() {
        let now = Utc::now();
        let mut manual = ai_at(now - Duration::minutes(1));
        manual.action = AuditAction::ManualEdit;
        manual.source = AuditSource::Manual;
        let entries = vec![manual.clone(), manual.clone(), manual];

        assert_eq!(hourly_usage(&entries, now), 0);
        assert!(RateLimiter::new(policy(1, 60_000)).evaluate(&entries, now).allowed);
    }

    #[test]
    fn cooldown_denies_with_remaining_seconds() {
        let now = Utc::now();
        let entries = vec![ai_at(now - Duration::milliseconds(2000))];

        let decision = RateLimiter::new(policy(100, 5000)).evaluate(&entries, now);
        assert!(!decision.allowed);
        let reason = decision.reason.unwrap();
        assert!(reason.contains("wait 3 more second"), "{reason}");
    }

    #[test]
    fn cooldown_rounds_partial_seconds_up() {
        let now = Utc::now();
        let entries = vec![ai_at(now - Duration::milliseconds(3500))];

        let decision = RateLimiter::new(policy(100, 5000)).evaluate(&entries, now);
        assert!(decision.reason.unwrap().contains("wait 2 more second"));
    }

    #[test]
    fn cooldown_elapsed_is_allowed() {
        let now = Utc::now();
        let entries = vec![ai_at(now - Duration::milliseconds(6000))];

        let decision = RateLimiter::new(policy(100, 5000)).evaluate(&entries, now);
        assert!(decision.allowed);
    }

    #[test]
    fn hourly_cap_reported_before_cooldown() {
        let now = Utc::now();
        let entries = vec![ai_at(now - Duration::milliseconds(100))];

        let decision = RateLimiter::new(policy(1, 5000)).evaluate(&entries, now);
        assert!(decision.reason.unwrap().starts_with("Hourly limit reached"));
    }

    #[test]
    fn cooldown_uses_latest_timestamp_not_log_order() {
        let now = Utc::now();
        let entries = vec![
            ai_at(now - Duration::milliseconds(1000)),
            ai_at(now - Duration::minutes(30)),
        ];

        let decision = RateLimiter::new(policy(100, 5000)).evaluate(&entries, now);
        assert!(decision.reason.unwrap().contains("wait 4 more second"));
    }

    #[test]
    fn equal_timestamps_pick_last_logged() {
        let ts = Utc::now();
        let first = ai_at(ts);
        let second = ai_at(ts);
        let entries = vec![first, second.clone()];

        assert_eq!(last_ai_request(&entries).unwrap().id, second.id);
    }
}
