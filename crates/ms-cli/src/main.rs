use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ms_cli::commands::{assign, check};
use ms_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Assign {
            start_list,
            schedule,
            output,
            json,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");
            assign::run(start_list, schedule, output, *json, &config)?;
        }
        Some(Commands::Check { schedule }) => {
            let mut stdout = std::io::stdout();
            check::run(&mut stdout, schedule)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
