mod cli;

use trackforged::{config, convert, preflight};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::process::ExitCode;

async fn run(cli: Cli) -> Result<()> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    cli.apply_to(&mut config)?;
    config::validate_config(&config)?;

    let paths = preflight::run(&cli.input, &cli.output, &config.tools)?;

    let verbose = cli.verbose;
    let task =
        tokio::task::spawn_blocking(move || convert::convert_tree(&paths, &config, verbose));

    tokio::select! {
        result = task => {
            let summary = result.context("Conversion task panicked")??;
            summary.log();
            println!("{}", summary);
            Ok(())
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for interrupt")?;
            println!("{}", "Keyboard Interruption!".red());
            // Encoders still running go down with the process group.
            std::process::exit(0);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "trackforged=debug,trackforged_av=debug,trackforged_common=debug".to_string()
        } else {
            "trackforged=info,trackforged_av=info,trackforged_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}", format!("Failed to start runtime: {e}").red());
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").red());
            ExitCode::FAILURE
        }
    }
}
