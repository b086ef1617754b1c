use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::{LedgerError, Result};

/// Execute the `keyledger test` command.
///
/// Fails (exit code 1) unless the provider accepts the stored key.
pub fn execute(ledger: &FileLedger) -> Result<()> {
    let Some(secret) = ledger.get_secret() else {
        output::warning("No usable API key stored. Run 'keyledger set-key <value>' first.");
        return Err(LedgerError::VerificationFailed);
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LedgerError::Transport {
            reason: format!("Failed to create async runtime: {e}"),
        })?;

    let sp = output::spinner("Verifying API key...");
    let valid = rt.block_on(ledger.verify_secret(&secret));
    output::finish_spinner(sp);

    if !valid {
        return Err(LedgerError::VerificationFailed);
    }
    output::success("API key is valid");
    Ok(())
}
