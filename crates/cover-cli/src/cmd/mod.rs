//! Subcommand implementations for `cvr`.

pub mod add;
pub mod check;
pub mod clear;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod remind;
pub mod show;
pub mod update;

use crate::notify::TerminalNotify;
use anyhow::{Context as _, Result};
use cover_core::clock::Clock;
use cover_core::config::Config;
use cover_core::remind::run_check;
use cover_core::store::{SqliteStore, WarrantyStore};
use std::path::Path;

/// Open the store at the resolved database path.
pub fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path).context("open warranty store")
}

/// Run the reminder check immediately, as the app does after every
/// save/import/toggle. Reminders land on stderr so stdout stays clean for
/// the command's own output.
pub fn immediate_check(
    store: &SqliteStore,
    config: &Config,
    clock: &dyn Clock,
) -> Result<usize> {
    let items = store.all().context("read warranties for reminder check")?;
    Ok(run_check(
        &items,
        clock.today(),
        &config.reminders.thresholds,
        config.list.expiring_soon_days,
        &mut TerminalNotify,
    ))
}
