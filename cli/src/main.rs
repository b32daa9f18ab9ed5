//! `vesta`: command-line host for the Vesta staking and governance core.

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use commands::View;
use config::GenesisConfig;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use vesta_types::Timestamp;
use vesta_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "vesta", about = "Vesta staking and governance ledger")]
struct Cli {
    /// Log format: "human" or "json". Overrides the genesis file.
    #[arg(long, env = "VESTA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level filter, e.g. "info" or "debug,vesta_runtime=trace".
    /// Overrides the genesis file.
    #[arg(long, env = "VESTA_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a new state file from a genesis configuration.
    Init {
        /// Path to the TOML genesis file.
        #[arg(long, env = "VESTA_CONFIG")]
        config: PathBuf,

        /// Where to write the ledger state.
        #[arg(long, env = "VESTA_STATE")]
        state: PathBuf,

        /// Genesis time in milliseconds. Overrides the genesis file.
        #[arg(long)]
        now: Option<u64>,

        /// Overwrite an existing state file.
        #[arg(long)]
        force: bool,
    },
    /// Apply a JSON transaction bundle and print the emitted events.
    Submit {
        #[arg(long, env = "VESTA_STATE")]
        state: PathBuf,

        /// Path to the transaction JSON.
        #[arg(long)]
        tx: PathBuf,

        /// Block time in milliseconds. Defaults to the wall clock.
        #[arg(long)]
        now: Option<u64>,
    },
    /// Print part of the ledger state as JSON.
    Show {
        #[arg(long, env = "VESTA_STATE")]
        state: PathBuf,

        #[arg(value_enum, default_value = "params")]
        view: View,
    },
}

fn wall_clock() -> anyhow::Result<Timestamp> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_millis();
    Ok(Timestamp::new(u64::try_from(millis).context("system clock out of range")?))
}

fn now_or_wall_clock(now: Option<u64>) -> anyhow::Result<Timestamp> {
    match now {
        Some(ms) => Ok(Timestamp::new(ms)),
        None => wall_clock(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Init {
            config,
            state,
            now,
            force,
        } => {
            let genesis = GenesisConfig::from_toml_file(&config)?;
            init_logging(
                cli.log_format.unwrap_or(genesis.log_format),
                cli.log_level.as_deref().unwrap_or(&genesis.log_level),
            );
            tracing::info!(config = %config.display(), "loaded genesis config");
            let now = now_or_wall_clock(now.or(genesis.genesis_time_ms))?;
            commands::init(&genesis, &state, now, force, &mut stdout)
        }
        Command::Submit { state, tx, now } => {
            init_logging(
                cli.log_format.unwrap_or_default(),
                cli.log_level.as_deref().unwrap_or("info"),
            );
            commands::submit(&state, &tx, now_or_wall_clock(now)?, &mut stdout)
        }
        Command::Show { state, view } => {
            init_logging(
                cli.log_format.unwrap_or_default(),
                cli.log_level.as_deref().unwrap_or("warn"),
            );
            commands::show(&state, view, &mut stdout)
        }
    }
}
