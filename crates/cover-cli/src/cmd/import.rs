//! `cvr import` — restore warranties from a backup document.

use crate::cmd::{immediate_check, open_store};
use crate::output::{OutputMode, fail_with, render};
use anyhow::Context as _;
use clap::Args;
use cover_core::clock::SystemClock;
use cover_core::config::Config;
use cover_core::ops::{self, ImportMode};
use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the backup file.
    pub path: PathBuf,

    /// Replace the existing collection instead of merging into it.
    #[arg(long)]
    pub replace: bool,
}

pub fn run_import(
    args: &ImportArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    let document = std::fs::read_to_string(&args.path)
        .with_context(|| format!("read backup from {}", args.path.display()))?;

    let mode = if args.replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let mut store = open_store(db_path)?;
    let count = match ops::import(&mut store, &document, mode) {
        Ok(count) => count,
        Err(error) => return Err(fail_with(output, &error)),
    };

    render(
        output,
        &serde_json::json!({ "ok": true, "imported": count }),
        |_, w| {
            writeln!(
                w,
                "✓ Imported {count} {}",
                if count == 1 { "warranty" } else { "warranties" }
            )
        },
    )?;

    immediate_check(&store, config, &SystemClock)?;
    Ok(())
}
