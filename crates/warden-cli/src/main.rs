//! Warden CLI: Password hashing and bearer credential tooling.
//!
//! Subcommands: init, hash, issue, verify, login.

mod commands;
mod config;
mod users;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::WardenConfig;

/// Warden: Password and bearer credential authentication.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "warden.toml")]
    config: PathBuf,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Hash a password with the configured Argon2id parameters.
    Hash(commands::hash::HashArgs),
    /// Issue a credential for a user id and handle.
    Issue(commands::issue::IssueArgs),
    /// Verify a credential and print its principal.
    Verify(commands::verify::VerifyArgs),
    /// Log in against the configured user seed file.
    Login(commands::login::LoginArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init(args) = &cli.command {
        init_logging(cli.log_level.as_deref().unwrap_or("info"), "text");
        return commands::init::run(args, &cli.config);
    }

    let config = WardenConfig::load(&cli.config)?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level, &config.logging.format);
    tracing::debug!(path = %cli.config.display(), "configuration loaded");

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Hash(args) => commands::hash::run(args, &config).await,
        Commands::Issue(args) => commands::issue::run(args, &config),
        Commands::Verify(args) => commands::verify::run(args, &config),
        Commands::Login(args) => commands::login::run(args, &config).await,
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
