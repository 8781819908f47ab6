//! `cvr rm` — delete a warranty.

use crate::cmd::open_store;
use crate::output::{OutputMode, render_success};
use clap::Args;
use cover_core::ops;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Warranty id (see `cvr list`).
    pub id: i64,
}

pub fn run_delete(args: &DeleteArgs, output: OutputMode, db_path: &Path) -> anyhow::Result<()> {
    let mut store = open_store(db_path)?;
    // Deleting a missing id is a silent no-op, same as deleting an item
    // that another process already removed.
    ops::delete(&mut store, args.id)?;
    render_success(output, &format!("Deleted warranty {}", args.id))
}
