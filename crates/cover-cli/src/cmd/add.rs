//! `cvr add` — record a new warranty.

use crate::cmd::{immediate_check, open_store};
use crate::output::{OutputMode, fail_with, render};
use chrono::NaiveDate;
use clap::Args;
use cover_core::clock::SystemClock;
use cover_core::config::Config;
use cover_core::model::WarrantyItem;
use cover_core::ops;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name of the purchase.
    #[arg(short, long)]
    pub name: String,

    /// Free-text category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Purchase price.
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Store the item was bought from.
    #[arg(short, long)]
    pub store: Option<String>,

    /// Purchase date (YYYY-MM-DD).
    #[arg(long)]
    pub purchased: NaiveDate,

    /// Explicit warranty expiration date (YYYY-MM-DD).
    #[arg(long)]
    pub expires: Option<NaiveDate>,

    /// Warranty duration in months from the purchase date.
    #[arg(short, long)]
    pub months: Option<u32>,

    /// Create the item with reminders disabled.
    #[arg(long)]
    pub no_reminder: bool,
}

pub fn run_add(
    args: &AddArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    let mut item = WarrantyItem::new(args.name.trim(), args.purchased);
    item.category = args.category.clone();
    item.price = args.price;
    item.store = args.store.clone();
    item.expiration_date = args.expires;
    item.duration_months = args.months;
    item.reminder_enabled = !args.no_reminder;

    let mut store = open_store(db_path)?;
    let id = match ops::save(&mut store, &item) {
        Ok(id) => id,
        Err(error) => return Err(fail_with(output, &error)),
    };

    render(
        output,
        &serde_json::json!({ "ok": true, "id": id }),
        |_, w| writeln!(w, "✓ Saved '{}' (id {id})", item.name),
    )?;

    immediate_check(&store, config, &SystemClock)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_defaults() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AddArgs,
        }
        let w = Wrapper::parse_from([
            "test",
            "--name",
            "Laptop",
            "--purchased",
            "2024-01-01",
            "--months",
            "24",
        ]);
        assert_eq!(w.args.name, "Laptop");
        assert_eq!(w.args.months, Some(24));
        assert!(w.args.expires.is_none());
        assert!(!w.args.no_reminder);
    }

    #[test]
    fn add_args_reject_bad_dates() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AddArgs,
        }
        let result =
            Wrapper::try_parse_from(["test", "--name", "x", "--purchased", "01/02/2024"]);
        assert!(result.is_err());
    }
}
