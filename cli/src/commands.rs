//! Subcommand implementations. Each reads and writes the bincode state file.

use crate::config::GenesisConfig;
use anyhow::{bail, Context};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use vesta_runtime::{Ledger, Transaction};
use vesta_types::{GovernanceParameters, Timestamp};
use vesta_utils::format_duration;

/// What `show` prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    Stakes,
    Proposals,
    Admins,
    Params,
}

pub fn load_ledger(state: &Path) -> anyhow::Result<Ledger> {
    let bytes =
        std::fs::read(state).with_context(|| format!("reading state {}", state.display()))?;
    Ok(Ledger::load_state(&bytes)?)
}

/// Write through a sibling temp file so a crash never leaves a torn snapshot.
pub fn save_ledger(ledger: &Ledger, state: &Path) -> anyhow::Result<()> {
    let bytes = ledger.save_state()?;
    let tmp = state.with_extension("tmp");
    std::fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
    std::fs::rename(&tmp, state).with_context(|| format!("replacing {}", state.display()))?;
    Ok(())
}

pub fn init(
    config: &GenesisConfig,
    state: &Path,
    now: Timestamp,
    force: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if state.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", state.display());
    }
    let genesis = Ledger::genesis(config.params.clone(), &config.super_admins, now)?;
    save_ledger(&genesis.value, state)?;
    for event in &genesis.events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    tracing::info!(
        state = %state.display(),
        timelock = %timelock_summary(&config.params),
        "initialised ledger"
    );
    Ok(())
}

/// Apply a transaction file and persist the result. Prints one JSON line per event.
/// A rejected transaction leaves the state file untouched.
pub fn submit(state: &Path, tx: &Path, now: Timestamp, out: &mut impl Write) -> anyhow::Result<()> {
    let mut ledger = load_ledger(state)?;
    let raw = std::fs::read_to_string(tx).with_context(|| format!("reading {}", tx.display()))?;
    let tx: Transaction =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", tx.display()))?;

    let receipt = ledger.submit(&tx, now)?;
    save_ledger(&ledger, state)?;
    for event in &receipt.events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    Ok(())
}

pub fn show(state: &Path, view: View, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = load_ledger(state)?;
    match view {
        View::Stakes => print_json(out, &ledger.pool().stakes().collect::<Vec<_>>()),
        View::Proposals => print_json(out, &ledger.proposals().list(None)),
        View::Admins => print_json(out, &ledger.admins().list().collect::<Vec<_>>()),
        View::Params => print_json(out, ledger.params()),
    }
}

/// Voting window and execution delay in human-readable form.
fn timelock_summary(params: &GovernanceParameters) -> String {
    format!(
        "vote {} then wait {}",
        format_duration(params.voting_period_ms),
        format_duration(params.execution_delay_ms)
    )
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
