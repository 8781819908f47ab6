//! `cvr export` — write the collection out as a backup document.

use crate::cmd::open_store;
use crate::output::{OutputMode, fail_with, render_success};
use anyhow::Context as _;
use clap::Args;
use cover_core::ops;
use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write the backup to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run_export(args: &ExportArgs, output: OutputMode, db_path: &Path) -> anyhow::Result<()> {
    let store = open_store(db_path)?;
    let document = match ops::export(&store) {
        Ok(document) => document,
        Err(error) => return Err(fail_with(output, &error)),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("write backup to {}", path.display()))?;
            render_success(output, &format!("Exported backup to {}", path.display()))
        }
        None => {
            // The document is already JSON, so it is the command output in
            // both modes.
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{document}")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_args_default_to_stdout() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ExportArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.output.is_none());
        let w = Wrapper::parse_from(["test", "--output", "backup.json"]);
        assert_eq!(w.args.output, Some(PathBuf::from("backup.json")));
    }
}
