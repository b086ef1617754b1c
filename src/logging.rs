use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `keyledger=debug`.
pub const LOG_ENV: &str = "KEYLEDGER_LOG";

/// Install the stderr diagnostics subscriber.
///
/// `KEYLEDGER_LOG` takes precedence; otherwise the level is `warn`, or
/// `debug` for this crate with `--verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,keyledger=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
