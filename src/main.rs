//! hellsharp - run H# programs
//!
//! Usage:
//!   hellsharp program.json    Run a program file
//!   hellsharp -e '<json>'     Run an inline program
//!   hellsharp demo [name]     List or run built-in demos

mod cli;
mod config;

use cli::{execute, parse_args, print_help, print_version, Settings};
use config::{load_config, Config};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; HELLSHARP_LOG wins over the config file
fn install_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("HELLSHARP_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'hellsharp --help'");
            return ExitCode::from(2);
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = load_config();
    install_tracing(&config);

    let source = match &cli.source {
        Some(source) => source,
        None => {
            print_help();
            return ExitCode::from(2);
        }
    };

    let settings = Settings::merge(&cli, &config);
    tracing::debug!(?settings, "starting");
    execute(source, &settings)
}
