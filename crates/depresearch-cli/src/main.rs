//! CLI entry point - the composition root.
//!
//! Parses arguments, bootstraps the context once and dispatches to handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use depresearch_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = CliConfig::with_defaults()?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::Research { query, stream } => {
            handlers::research::execute(&ctx, &query, stream).await?;
        }
        Commands::Config { command } => handlers::config::execute(&ctx, command)?,
        Commands::Status => {
            handlers::status::execute(&ctx).await?;
        }
        Commands::Stop => {
            handlers::stop::execute(&ctx)?;
        }
        Commands::Paths => handlers::paths::execute(&ctx),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.into_command() else {
        // No command or query provided - show help
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {err}");
            let code = err
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
