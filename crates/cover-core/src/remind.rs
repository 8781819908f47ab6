//! Reminder policy and daily-check scheduling math.
//!
//! The policy is stateless per run: every scheduled or on-demand check
//! re-evaluates the full collection against "today". Re-running on the same
//! day re-emits the same reminders — the dispatch layer de-duplicates by
//! item id (the id doubles as the notification key), so the policy carries
//! no suppression state of its own.

use crate::model::{WarrantyItem, WarrantyStatus};
use crate::status;
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Days-remaining values that trigger a reminder.
pub const DEFAULT_THRESHOLDS: [i64; 4] = [30, 14, 7, 1];

/// Local wall-clock time of the daily check.
#[must_use]
pub fn default_daily_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

/// A notification request for one item. The item id is the dispatch layer's
/// de-duplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub item_id: i64,
    pub name: String,
    pub days_remaining: i64,
}

impl Reminder {
    /// Human-readable body: "expires today" / "expires in N day(s)".
    #[must_use]
    pub fn message(&self) -> String {
        match self.days_remaining {
            0 => format!("{} warranty expires today", self.name),
            1 => format!("{} warranty expires in 1 day", self.name),
            days => format!("{} warranty expires in {days} days", self.name),
        }
    }
}

/// Decide which reminder-enabled items warrant a notification on this run.
///
/// An item triggers when its days-remaining sits in the threshold set,
/// is non-negative, and the item is not expired; or when it is exactly
/// expired with zero days remaining (the day it expires).
#[must_use]
pub fn due(
    items: &[WarrantyItem],
    today: chrono::NaiveDate,
    thresholds: &[i64],
    soon_days: i64,
) -> Vec<Reminder> {
    items
        .iter()
        .filter(|item| item.reminder_enabled)
        .filter_map(|item| {
            let computed = status::compute_with_window(item, today, soon_days);
            let days = computed.days_remaining?;

            let at_threshold = thresholds.contains(&days)
                && days >= 0
                && computed.status != WarrantyStatus::Expired;
            let expires_today = computed.status == WarrantyStatus::Expired && days == 0;

            (at_threshold || expires_today).then(|| Reminder {
                item_id: item.id,
                name: item.name.clone(),
                days_remaining: days,
            })
        })
        .collect()
}

/// Dispatch target for reminders. The CLI renders to the terminal; a host
/// platform would post local notifications.
pub trait Notify {
    /// Deliver one reminder.
    ///
    /// # Errors
    ///
    /// Returns an error when delivery fails; the check loop logs it and
    /// moves on to the next item.
    fn notify(&mut self, reminder: &Reminder) -> anyhow::Result<()>;
}

/// Run the reminder check now: evaluate the policy and dispatch each due
/// reminder. Failure isolation is per item — one failed dispatch never
/// stops the rest — and nothing is retried. Returns the number delivered.
pub fn run_check(
    items: &[WarrantyItem],
    today: chrono::NaiveDate,
    thresholds: &[i64],
    soon_days: i64,
    notifier: &mut dyn Notify,
) -> usize {
    let reminders = due(items, today, thresholds, soon_days);
    debug!(due = reminders.len(), "reminder check");

    let mut delivered = 0;
    for reminder in &reminders {
        match notifier.notify(reminder) {
            Ok(()) => delivered += 1,
            Err(error) => {
                warn!(item_id = reminder.item_id, %error, "reminder dispatch failed");
            }
        }
    }
    delivered
}

/// Delay until the next occurrence of `at` (local wall-clock) after `now`.
///
/// Pure: re-running it never registers anything, so daily setup stays
/// idempotent for whichever scheduler the environment provides.
#[must_use]
pub fn next_daily_delay(now: NaiveDateTime, at: NaiveTime) -> Duration {
    let mut target = now.date().and_time(at);
    if target <= now {
        target += chrono::Duration::days(1);
    }
    (target - now).to_std().unwrap_or(Duration::ZERO)
}
