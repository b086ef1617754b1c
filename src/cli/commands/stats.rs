use colored::Colorize;

use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::key_format;

/// Execute the `keyledger stats` command.
pub fn execute(ledger: &FileLedger) -> Result<()> {
    let settings = ledger.get_settings();
    let stats = ledger.get_usage_stats();

    let key_status = match ledger.try_get_secret() {
        Ok(Some(key)) => key_format::mask(&key),
        Ok(None) => "not set".dimmed().to_string(),
        Err(e) => {
            tracing::error!("{e}");
            "unreadable (wrong encryption key?)".red().to_string()
        }
    };
    let last_used = stats
        .last_used_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    output::header("keyledger stats");
    output::field("Model", &settings.model);
    output::field("API key", &key_status);
    output::field("Total requests", &stats.total_translations.to_string());
    output::field("Last used", &last_used);
    output::field(
        "Last hour",
        &format!(
            "{} / {}",
            stats.hourly_usage, settings.rate_limit.max_requests_per_hour
        ),
    );

    if stats.recent_errors.is_empty() {
        output::success("No recent errors");
        return Ok(());
    }

    output::header(&format!("Recent errors ({})", stats.recent_errors.len()));
    for entry in &stats.recent_errors {
        println!(
            "  {} {} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            entry.locale,
            entry.subject_keys.join(", "),
            entry.error.as_deref().unwrap_or("unknown error").red(),
        );
    }
    Ok(())
}
