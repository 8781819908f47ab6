//! Terminal-backed reminder dispatch.
//!
//! The host platform would post local notifications keyed by item id; the
//! CLI renders the same requests as terminal lines (to stderr, so command
//! output on stdout stays machine-parseable) or collects them for JSON
//! output.

use cover_core::remind::{Notify, Reminder};
use std::io::Write;

/// Writes one line per reminder to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotify;

impl Notify for TerminalNotify {
    fn notify(&mut self, reminder: &Reminder) -> anyhow::Result<()> {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        writeln!(out, "⏰ {} (id {})", reminder.message(), reminder.item_id)?;
        Ok(())
    }
}

/// Collects reminders for structured output instead of printing them.
#[derive(Debug, Default)]
pub struct CollectNotify {
    pub delivered: Vec<Reminder>,
}

impl Notify for CollectNotify {
    fn notify(&mut self, reminder: &Reminder) -> anyhow::Result<()> {
        self.delivered.push(reminder.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CollectNotify;
    use cover_core::remind::{Notify, Reminder};

    #[test]
    fn collector_keeps_dispatch_order() {
        let mut collector = CollectNotify::default();
        for id in [3, 1, 2] {
            collector
                .notify(&Reminder {
                    item_id: id,
                    name: format!("item-{id}"),
                    days_remaining: 7,
                })
                .unwrap();
        }
        let ids: Vec<i64> = collector.delivered.iter().map(|r| r.item_id).collect();
        assert_eq!(ids, [3, 1, 2]);
    }
}
