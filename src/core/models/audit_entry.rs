use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actions that get recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AiTranslate,
    ManualEdit,
    BulkUpdate,
}

impl AuditAction {
    /// Wire name, as written to `audit.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AiTranslate => "ai_translate",
            AuditAction::ManualEdit => "manual_edit",
            AuditAction::BulkUpdate => "bulk_update",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ai_translate" => Ok(AuditAction::AiTranslate),
            "manual_edit" => Ok(AuditAction::ManualEdit),
            "bulk_update" => Ok(AuditAction::BulkUpdate),
            other => Err(format!(
                "unknown action '{other}' (expected ai_translate, manual_edit or bulk_update)"
            )),
        }
    }
}

/// Where the change recorded by an audit entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSource {
    Ai,
    Manual,
    Import,
}

/// A single entry in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub action: AuditAction,
    pub subject_keys: Vec<String>,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub source: AuditSource,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Build an AI usage entry stamped with `timestamp`.
    ///
    /// `error` is dropped when `success` is true.
    pub fn ai_usage(
        subject_keys: Vec<String>,
        locale: &str,
        success: bool,
        user_id: Option<String>,
        error: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: AuditAction::AiTranslate,
            subject_keys,
            locale: locale.to_string(),
            user_id,
            timestamp,
            source: AuditSource::Ai,
            success,
            error: if success { None } else { error },
        }
    }
}
