//! `cvr remind` — turn reminders on or off for one warranty.

use crate::cmd::{immediate_check, open_store};
use crate::output::{OutputMode, fail_with, render_success};
use clap::Args;
use cover_core::clock::SystemClock;
use cover_core::config::Config;
use cover_core::ops;
use std::path::Path;

#[derive(Args, Debug)]
pub struct RemindArgs {
    /// Warranty id (see `cvr list`).
    pub id: i64,

    /// Enable reminders for this warranty.
    #[arg(long, conflicts_with = "off")]
    pub on: bool,

    /// Disable reminders for this warranty.
    #[arg(long)]
    pub off: bool,
}

pub fn run_remind(
    args: &RemindArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    let enabled = !args.off;
    let item = match ops::toggle_reminder(&mut store, args.id, enabled) {
        Ok(item) => item,
        Err(error) => return Err(fail_with(output, &error)),
    };

    let state = if enabled { "on" } else { "off" };
    render_success(
        output,
        &format!("Reminders {state} for '{}' (id {})", item.name, item.id),
    )?;

    if enabled {
        immediate_check(&store, config, &SystemClock)?;
    }
    Ok(())
}
