use crate::cli::SettingsArgs;
use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::settings::{LedgerSettings, RateLimitPolicy, SettingsPatch};

/// Execute the `keyledger settings` command.
///
/// Without flags, prints the current settings. Rate-limit flags come as a
/// group because the policy is replaced as a whole.
pub fn execute(ledger: &FileLedger, args: &SettingsArgs) -> Result<()> {
    let patch = SettingsPatch {
        model: args.model.clone(),
        rate_limit: match (args.max_per_hour, args.max_batch, args.cooldown_ms) {
            (Some(max_requests_per_hour), Some(max_batch_size), Some(cooldown_ms)) => {
                Some(RateLimitPolicy {
                    max_requests_per_hour,
                    max_batch_size,
                    cooldown_ms,
                })
            }
            _ => None,
        },
    };

    if patch.is_empty() {
        print_settings(&ledger.get_settings());
        return Ok(());
    }

    let settings = ledger.update_settings(patch)?;
    output::success("Settings updated");
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &LedgerSettings) {
    output::header("keyledger settings");
    output::field("Model", &settings.model);
    output::field(
        "API key",
        if settings.encrypted_secret.is_some() {
            "stored (encrypted)"
        } else {
            "not set"
        },
    );
    output::field(
        "Per hour",
        &settings.rate_limit.max_requests_per_hour.to_string(),
    );
    output::field("Batch size", &settings.rate_limit.max_batch_size.to_string());
    output::field(
        "Cooldown",
        &format!("{} ms", settings.rate_limit.cooldown_ms),
    );
}
