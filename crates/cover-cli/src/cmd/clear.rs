//! `cvr clear` — remove every warranty.

use crate::cmd::open_store;
use crate::output::{CliError, OutputMode, render_error, render_success};
use clap::Args;
use cover_core::ops;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm the wipe. Without this flag nothing is deleted.
    #[arg(long)]
    pub yes: bool,
}

pub fn run_clear(args: &ClearArgs, output: OutputMode, db_path: &Path) -> anyhow::Result<()> {
    if !args.yes {
        let error = CliError {
            message: "refusing to delete all warranties without --yes".to_string(),
            suggestion: Some("re-run with --yes to confirm".to_string()),
            error_code: None,
        };
        render_error(output, &error)?;
        anyhow::bail!("{}", error.message);
    }

    let mut store = open_store(db_path)?;
    ops::clear(&mut store)?;
    render_success(output, "Deleted all warranties")
}
