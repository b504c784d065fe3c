mod api;
mod cli;
mod host;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use focus_guard::config::{self, SharedConfig};
use focus_guard::journal::service::JournalService;
use focus_guard::store::parse_date;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "focus-guard",
    version,
    about = "Daily-journal backend for the Focus Guard extension"
)]
struct Cli {
    /// Config file (default: ~/.focus-guard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the local HTTP server
    Serve,
    /// Answer one native-messaging request on stdin/stdout.
    ///
    /// Browsers launch the binary without this subcommand; see `host::is_browser_launch`.
    Host {
        /// Caller origin and window arguments passed by the browser (ignored)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
        caller: Vec<String>,
    },
    /// Show the current streak and the last 7 days
    Streak {
        /// Day to report for (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show which unfinished tasks would carry into a new note
    Carryover {
        /// Day the new note would be for (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Check configuration and vault layout
    Doctor,
    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Change and persist settings
    Set {
        /// Vault directory (empty string clears it)
        #[arg(long)]
        vault: Option<String>,
        /// Enable or disable task carryover
        #[arg(long)]
        carryover: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = if host::is_browser_launch(&args) {
        Cli {
            config: None,
            command: Command::Host {
                caller: args[1..].to_vec(),
            },
        }
    } else {
        Cli::parse_from(&args)
    };

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let shared = SharedConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    // Log to stderr so stdout stays clean for native messaging.
    let filter = EnvFilter::try_new(&shared.snapshot().server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => {
            server::serve_http(shared).await?;
        }
        Command::Host { caller } => {
            tracing::debug!(?caller, "invoked as native host");
            tokio::task::spawn_blocking(move || host::run(shared))
                .await
                .context("native host task failed")??;
        }
        Command::Streak { date } => {
            let service = JournalService::with_system_clock(shared);
            let day = resolve_day(&service, date.as_deref())?;
            cli::streak::streak(&service, day)?;
        }
        Command::Carryover { date } => {
            let service = JournalService::with_system_clock(shared);
            let day = resolve_day(&service, date.as_deref())?;
            cli::carryover::carryover(&service, day)?;
        }
        Command::Doctor => {
            cli::doctor::doctor(&JournalService::with_system_clock(shared))?;
        }
        Command::Config { action } => {
            let service = JournalService::with_system_clock(shared);
            match action {
                ConfigAction::Show => cli::config::show(&service)?,
                ConfigAction::Set { vault, carryover } => {
                    cli::config::set(&service, vault, carryover)?;
                }
            }
        }
    }

    Ok(())
}


fn resolve_day(service: &JournalService, date: Option<&str>) -> Result<chrono::NaiveDate> {
    match date {
        Some(d) => Ok(parse_date(d)?),
        None => Ok(service.today()),
    }
}
