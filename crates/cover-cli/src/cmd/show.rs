//! `cvr show` — full details for one warranty.

use crate::cmd::open_store;
use crate::output::{OutputMode, fail_with, pretty_kv, render};
use clap::Args;
use cover_core::clock::{Clock, SystemClock};
use cover_core::config::Config;
use cover_core::observe::WarrantySnapshot;
use cover_core::ops;
use cover_core::status::compute_with_window;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Warranty id (see `cvr list`).
    pub id: i64,
}

pub fn run_show(
    args: &ShowArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    let store = open_store(db_path)?;
    let item = match ops::get(&store, args.id) {
        Ok(item) => item,
        Err(error) => return Err(fail_with(output, &error)),
    };

    let computed = compute_with_window(&item, SystemClock.today(), config.list.expiring_soon_days);
    let snapshot = WarrantySnapshot {
        item,
        days_remaining: computed.days_remaining,
        status: computed.status,
    };

    render(output, &snapshot, |snapshot, w| {
        let item = &snapshot.item;
        pretty_kv(w, "id", item.id.to_string())?;
        pretty_kv(w, "name", &item.name)?;
        if let Some(category) = &item.category {
            pretty_kv(w, "category", category)?;
        }
        if let Some(store_name) = &item.store {
            pretty_kv(w, "store", store_name)?;
        }
        if let Some(price) = item.price {
            pretty_kv(w, "price", format!("{price:.2}"))?;
        }
        pretty_kv(w, "purchased", item.purchase_date.to_string())?;
        if let Some(expires) = item.resolved_expiration() {
            pretty_kv(w, "expires", expires.to_string())?;
        }
        if let Some(months) = item.duration_months {
            pretty_kv(w, "duration", format!("{months} months"))?;
        }
        pretty_kv(w, "status", snapshot.status.to_string())?;
        if let Some(days) = snapshot.days_remaining {
            pretty_kv(w, "days left", days.to_string())?;
        }
        pretty_kv(
            w,
            "reminders",
            if item.reminder_enabled { "on" } else { "off" },
        )
    })
}
