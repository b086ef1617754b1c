pub mod commands;
pub mod context;
pub mod output;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};

use crate::adapters::verifier::http_verifier::DEFAULT_VERIFY_URL;
use crate::core::services::ledger::DEFAULT_AUDIT_LIMIT;

/// Encrypted API key storage with usage auditing and rate limiting.
#[derive(Parser, Debug)]
#[command(name = "keyledger", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding settings.json and audit.json
    #[arg(long, global = true, env = "KEYLEDGER_DIR", default_value = ".keyledger")]
    pub data_dir: String,

    /// Key used to encrypt the stored API key
    #[arg(long, global = true, env = "KEYLEDGER_ENCRYPTION_KEY", hide_env_values = true)]
    pub encryption_key: Option<String>,

    /// Endpoint used to verify the stored API key
    #[arg(long, global = true, env = "KEYLEDGER_VERIFY_URL", default_value = DEFAULT_VERIFY_URL)]
    pub verify_url: String,

    /// Development mode: generate an encryption key if none is configured
    #[arg(long, global = true, env = "KEYLEDGER_DEV", value_parser = BoolishValueParser::new())]
    pub dev: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt and store an API key
    SetKey {
        /// API key (sk-...)
        value: String,
    },

    /// Verify the stored API key against the provider
    Test,

    /// Show usage statistics
    Stats,

    /// Show the audit log, newest first
    Audit {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = DEFAULT_AUDIT_LIMIT)]
        limit: usize,
        /// Only show one action (ai_translate, manual_edit, bulk_update)
        #[arg(long)]
        action: Option<String>,
    },

    /// Check whether another AI request is allowed right now
    Check,

    /// Record one AI usage event
    Record(RecordArgs),

    /// Show or update settings
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Affected keys, comma separated
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<String>,
    /// Target locale
    #[arg(long)]
    pub locale: String,
    /// User the request was made for
    #[arg(long)]
    pub user: Option<String>,
    /// Mark the event as failed
    #[arg(long)]
    pub failed: bool,
    /// Error message for a failed event
    #[arg(long, requires = "failed")]
    pub error: Option<String>,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,
    /// Maximum AI requests per hour (requires --max-batch and --cooldown-ms)
    #[arg(long, requires_all = ["max_batch", "cooldown_ms"])]
    pub max_per_hour: Option<u32>,
    /// Maximum keys per request
    #[arg(long, requires_all = ["max_per_hour", "cooldown_ms"])]
    pub max_batch: Option<u32>,
    /// Minimum delay between AI requests, in milliseconds
    #[arg(long, requires_all = ["max_per_hour", "max_batch"])]
    pub cooldown_ms: Option<u64>,
}
