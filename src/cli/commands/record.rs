use crate::cli::RecordArgs;
use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `keyledger record` command.
///
/// Successful events must respect the configured batch size; failures are
/// always recorded.
pub fn execute(ledger: &FileLedger, args: &RecordArgs) -> Result<()> {
    let keys: Vec<String> = args
        .keys
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    if !args.failed {
        ledger.validate_batch(keys.len())?;
    }

    let count = keys.len();
    ledger.log_event(
        keys,
        &args.locale,
        !args.failed,
        args.user.clone(),
        args.error.clone(),
    )?;

    if args.failed {
        output::warning(&format!(
            "Recorded failed request for {count} key(s) ({})",
            args.locale
        ));
    } else {
        output::success(&format!("Recorded request for {count} key(s) ({})", args.locale));
    }
    Ok(())
}
