use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use client_secrets::{ClientSecrets, ClientSecretsError, load_file};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "client-secrets",
    about = "Validate OAuth 2.0 client secrets files."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more files and print their client type.
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print a validated file as JSON with the client secret redacted.
    Show { path: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check { paths } => run_check(&paths),
        Command::Show { path } => match run_show(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_check(paths: &[PathBuf]) -> ExitCode {
    let mut failed = false;
    for path in paths {
        match load_file(path.as_path()) {
            Ok(secrets) => println!(
                "{}: {} (client_id={})",
                path.display(),
                secrets.client_type,
                secrets.info.client_id().unwrap_or_default()
            ),
            Err(err) => {
                failed = true;
                eprintln!("{}: {err}", path.display());
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_show(path: PathBuf) -> Result<(), ClientSecretsError> {
    let secrets = load_file(path)?;
    println!("{}", redacted_json(&secrets));
    Ok(())
}

fn redacted_json(secrets: &ClientSecrets) -> String {
    let mut entry = secrets.to_cache_entry();
    if let Some(Value::Object(info)) = entry.get_mut(secrets.client_type.as_str()) {
        if info.contains_key("client_secret") {
            info.insert(
                "client_secret".to_string(),
                Value::String("[REDACTED]".to_string()),
            );
        }
    }
    format!("{:#}", Value::Object(entry))
}
