use colored::Colorize;

use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::{LedgerError, Result};
use crate::core::models::audit_entry::{AuditAction, AuditEntry};

/// Execute the `keyledger audit` command.
///
/// Displays up to `limit` entries, newest first, optionally for one action.
pub fn execute(ledger: &FileLedger, limit: usize, action: Option<&str>) -> Result<()> {
    let action = action
        .map(|a| a.parse::<AuditAction>())
        .transpose()
        .map_err(|detail| LedgerError::InvalidConfig { detail })?;

    let entries = match action {
        Some(action) => ledger.get_audit_log_for(action, limit),
        None => ledger.get_audit_log(limit),
    };

    if entries.is_empty() {
        output::header("keyledger audit");
        output::warning("No audit entries found");
        if action.is_some() {
            println!("  Try removing --action to see all entries.");
        }
        return Ok(());
    }

    output::header(&format!("keyledger audit ({} entries)", entries.len()));
    println!();

    for entry in &entries {
        print_entry(entry);
    }

    Ok(())
}

/// Print a single audit entry as a formatted row.
fn print_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let status = if entry.success {
        "ok".green().to_string()
    } else {
        "failed".red().to_string()
    };
    let keys = if entry.subject_keys.is_empty() {
        "—".dimmed().to_string()
    } else {
        entry.subject_keys.join(", ")
    };
    let detail = match (&entry.user_id, &entry.error) {
        (_, Some(error)) => error.clone(),
        (Some(user), None) => format!("by {user}"),
        (None, None) => String::new(),
    };

    println!(
        "  {} {} {:<12} {:<6} {:<6} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_action(entry.action),
        entry.locale,
        status,
        keys,
        detail.dimmed(),
    );
}

/// Format an AuditAction as a colored string.
fn format_action(action: AuditAction) -> String {
    match action {
        AuditAction::AiTranslate => action.as_str().cyan().to_string(),
        AuditAction::ManualEdit => action.as_str().yellow().to_string(),
        AuditAction::BulkUpdate => action.as_str().blue().to_string(),
    }
}
