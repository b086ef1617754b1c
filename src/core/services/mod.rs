pub mod key_format;
pub mod ledger;
pub mod rate_limiter;
