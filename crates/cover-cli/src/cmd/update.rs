//! `cvr update` — edit fields of an existing warranty.

use crate::cmd::{immediate_check, open_store};
use crate::output::{OutputMode, fail_with, render_success};
use chrono::NaiveDate;
use clap::Args;
use cover_core::clock::SystemClock;
use cover_core::config::Config;
use cover_core::ops;
use std::path::Path;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Warranty id (see `cvr list`).
    pub id: i64,

    /// New display name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// New category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// New purchase price.
    #[arg(short, long)]
    pub price: Option<f64>,

    /// New store name.
    #[arg(short, long)]
    pub store: Option<String>,

    /// New purchase date (YYYY-MM-DD).
    #[arg(long)]
    pub purchased: Option<NaiveDate>,

    /// New explicit expiration date (YYYY-MM-DD).
    #[arg(long)]
    pub expires: Option<NaiveDate>,

    /// New warranty duration in months.
    #[arg(short, long)]
    pub months: Option<u32>,
}

pub fn run_update(
    args: &UpdateArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    let mut item = match ops::get(&store, args.id) {
        Ok(item) => item,
        Err(error) => return Err(fail_with(output, &error)),
    };

    if let Some(name) = &args.name {
        item.name = name.trim().to_string();
    }
    if let Some(category) = &args.category {
        item.category = Some(category.clone());
    }
    if let Some(price) = args.price {
        item.price = Some(price);
    }
    if let Some(store_name) = &args.store {
        item.store = Some(store_name.clone());
    }
    if let Some(purchased) = args.purchased {
        item.purchase_date = purchased;
    }
    if let Some(expires) = args.expires {
        item.expiration_date = Some(expires);
    }
    if let Some(months) = args.months {
        item.duration_months = Some(months);
    }

    if let Err(error) = ops::save(&mut store, &item) {
        return Err(fail_with(output, &error));
    }

    render_success(output, &format!("Updated '{}' (id {})", item.name, item.id))?;
    immediate_check(&store, config, &SystemClock)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_args_all_optional_but_id() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: UpdateArgs,
        }
        let w = Wrapper::parse_from(["test", "7", "--price", "199.99"]);
        assert_eq!(w.args.id, 7);
        assert_eq!(w.args.price, Some(199.99));
        assert!(w.args.name.is_none());
    }
}
