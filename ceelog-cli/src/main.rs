use anyhow::Result;
use clap::Parser;

use ceelog_cli::cli::{Cli, Commands};
use ceelog_cli::commands::{self, load_config};
use ceelog_cli::error::CliError;
use ceelog_cli::logging::init_tracing;
use ceelog_cli::output::OutputWriter;

fn main() {
    if let Err(e) = run() {
        eprintln!("ceelog: {e}");
        let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    ceelog_core::metrics::describe_all();
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Convert(args) => {
            let (mut config, source) = load_config(cli.config.as_deref())?;
            commands::convert::apply_overrides(&mut config, &args, cli.log_level.as_deref())?;
            init_tracing(&config.general)?;
            tracing::debug!(source = %source.describe(), "ceelog convert starting");

            commands::convert::execute(&args, &config)?;
        }
        Commands::Config(args) => {
            let mut quiet = ceelog_core::config::CeeConfig::default();
            quiet.general.log_level = cli.log_level.unwrap_or_else(|| "warn".to_owned());
            quiet
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
            init_tracing(&quiet.general)?;

            commands::config::execute(args, cli.config.as_deref(), &writer)?;
        }
    }

    Ok(())
}
