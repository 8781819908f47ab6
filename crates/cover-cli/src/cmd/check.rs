//! `cvr check` — run the reminder check now.

use crate::cmd::open_store;
use crate::notify::{CollectNotify, TerminalNotify};
use crate::output::{OutputMode, render};
use anyhow::Context as _;
use clap::Args;
use cover_core::clock::{Clock, SystemClock};
use cover_core::config::Config;
use cover_core::remind::{next_daily_delay, run_check};
use cover_core::store::WarrantyStore;
use std::io::Write as _;
use std::path::Path;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Show how long until the next scheduled daily check instead of
    /// checking now.
    #[arg(long)]
    pub next: bool,
}

pub fn run_check_cmd(
    args: &CheckArgs,
    output: OutputMode,
    config: &Config,
    db_path: &Path,
) -> anyhow::Result<()> {
    if args.next {
        let at = config.daily_time()?;
        let delay = next_daily_delay(SystemClock.now(), at);
        let seconds = delay.as_secs();
        return render(
            output,
            &serde_json::json!({
                "daily_at": config.reminders.daily_at,
                "seconds_until_next": seconds,
            }),
            |_, w| {
                writeln!(
                    w,
                    "Next daily check at {} (in {}h{:02}m)",
                    config.reminders.daily_at,
                    seconds / 3600,
                    (seconds % 3600) / 60,
                )
            },
        );
    }

    let store = open_store(db_path)?;
    let items = store.all().context("read warranties for reminder check")?;
    let today = SystemClock.today();
    let thresholds = &config.reminders.thresholds;
    let window = config.list.expiring_soon_days;

    if output.is_json() {
        let mut collector = CollectNotify::default();
        let delivered = run_check(&items, today, thresholds, window, &mut collector);
        render(
            output,
            &serde_json::json!({
                "delivered": delivered,
                "reminders": collector.delivered,
            }),
            |_, _| Ok(()),
        )
    } else {
        let delivered = run_check(&items, today, thresholds, window, &mut TerminalNotify);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if delivered == 0 {
            writeln!(out, "Nothing due.")?;
        } else {
            writeln!(
                out,
                "{delivered} {} due",
                if delivered == 1 { "reminder" } else { "reminders" }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_args_default_to_run_now() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CheckArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(!w.args.next);
        let w = Wrapper::parse_from(["test", "--next"]);
        assert!(w.args.next);
    }
}
