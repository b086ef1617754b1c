use crate::cli::context::FileLedger;
use crate::cli::output;
use crate::core::errors::{LedgerError, Result};

/// Execute the `keyledger check` command.
///
/// Exits with an error when the rate limit would deny another AI request.
pub fn execute(ledger: &FileLedger) -> Result<()> {
    let decision = ledger.check_rate_limit();

    if !decision.allowed {
        return Err(LedgerError::RateLimited {
            reason: decision.reason.unwrap_or_default(),
        });
    }

    output::success("Rate limit OK: another AI request is allowed");
    Ok(())
}
