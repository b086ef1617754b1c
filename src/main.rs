mod adapters;
mod cli;
mod config;
mod core;
mod logging;

use clap::Parser;

use cli::{Cli, Commands};
use config::app_config::AppConfig;
use crate::core::errors::Result;

fn main() {
    let args = Cli::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = AppConfig::from_cli(args)?;
    let ledger = cli::context::open_ledger(&config);

    match &args.command {
        Commands::SetKey { value } => cli::commands::set_key::execute(&ledger, value),
        Commands::Test => cli::commands::verify::execute(&ledger),
        Commands::Stats => cli::commands::stats::execute(&ledger),
        Commands::Audit { limit, action } => {
            cli::commands::audit::execute(&ledger, *limit, action.as_deref())
        }
        Commands::Check => cli::commands::check::execute(&ledger),
        Commands::Record(record) => cli::commands::record::execute(&ledger, record),
        Commands::Settings(settings) => cli::commands::settings::execute(&ledger, settings),
    }
}
