//! `cvr list` — the filtered, searched, soonest-expiring-first list.
//!
//! Runs the same pipeline the app's list screen runs: live store feed →
//! snapshot aggregation → filter/search composition.

use crate::cmd::open_store;
use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::Args;
use cover_core::clock::{Clock, SystemClock};
use cover_core::config::Config;
use cover_core::list::ListSession;
use cover_core::model::WarrantyFilter;
use cover_core::observe::aggregate_with_window;
use cover_core::store::WarrantyStore;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status: all, active, expiring-soon, expired.
    #[arg(short, long, default_value = "all")]
    pub filter: WarrantyFilter,

    /// Case-insensitive search over name, category, and store.
    #[arg(short, long, default_value = "")]
    pub query: String,
}

pub fn run_list(
    args: &ListArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    let feed = store.subscribe()?;
    let items = feed.recv().context("warranty feed closed")?;

    let today = SystemClock.today();
    let snapshots = aggregate_with_window(&items, today, config.list.expiring_soon_days);
    let total = snapshots.len();

    let mut session = ListSession::new();
    session.on_snapshots(snapshots);
    session.set_filter(args.filter);
    session.set_query(&args.query);
    let state = session.state();

    render(output, &state, |state, w| {
        if state.items.is_empty() {
            return writeln!(w, "No warranties found");
        }
        writeln!(w, "{:>4}  {:<13}  {:>5}  NAME", "ID", "STATUS", "DAYS")?;
        for snapshot in &state.items {
            let days = snapshot
                .days_remaining
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            writeln!(
                w,
                "{:>4}  {:<13}  {:>5}  {}",
                snapshot.item.id,
                snapshot.status.to_string(),
                days,
                snapshot.item.name,
            )?;
        }
        writeln!(w, "{} of {total} warranties", state.items.len())
    })
}
