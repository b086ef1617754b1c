use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::key_format;

/// Execute the `keyledger set-key` command.
pub fn execute(ledger: &FileLedger, value: &str) -> Result<()> {
    ledger.set_secret(value.trim())?;

    output::success(&format!(
        "API key stored encrypted ({})",
        key_format::mask(value.trim())
    ));
    println!("  Run 'keyledger test' to check it with the provider.");
    Ok(())
}
