//! Snapshot aggregation over the live item collection.
//!
//! Each store emission is transformed in full: every item is recomputed
//! against the caller's "today" and the results are sorted soonest-expiring
//! first. Nothing is cached across emissions — "today" itself may have
//! moved between two of them.

use crate::model::{WarrantyItem, WarrantyStatus};
use crate::status::{self, DEFAULT_EXPIRING_SOON_DAYS};
use chrono::NaiveDate;
use serde::Serialize;

/// One item paired with its computed state. Lifetime: a single aggregation
/// pass; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarrantySnapshot {
    pub item: WarrantyItem,
    pub days_remaining: Option<i64>,
    pub status: WarrantyStatus,
}

/// Aggregate with the default expiring-soon window.
#[must_use]
pub fn aggregate(items: &[WarrantyItem], today: NaiveDate) -> Vec<WarrantySnapshot> {
    aggregate_with_window(items, today, DEFAULT_EXPIRING_SOON_DAYS)
}

/// Compute a snapshot for every item and order the result ascending by
/// days-remaining, items without a resolved expiration last. The sort is
/// stable, so ties keep the incoming collection order.
#[must_use]
pub fn aggregate_with_window(
    items: &[WarrantyItem],
    today: NaiveDate,
    soon_days: i64,
) -> Vec<WarrantySnapshot> {
    let mut snapshots: Vec<WarrantySnapshot> = items
        .iter()
        .map(|item| {
            let computed = status::compute_with_window(item, today, soon_days);
            WarrantySnapshot {
                item: item.clone(),
                days_remaining: computed.days_remaining,
                status: computed.status,
            }
        })
        .collect();

    snapshots.sort_by_key(|snapshot| snapshot.days_remaining.unwrap_or(i64::MAX));
    snapshots
}
