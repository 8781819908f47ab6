//! Warranty status calculator.
//!
//! Pure function of the item and an injected "today" — callers supply the
//! date (through a [`Clock`](crate::clock::Clock) at the edges), so results
//! are deterministic and freely testable.

use crate::model::{WarrantyItem, WarrantyStatus};
use chrono::NaiveDate;

/// Items within this many days of expiring count as expiring soon.
pub const DEFAULT_EXPIRING_SOON_DAYS: i64 = 30;

/// Result of one status computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Computed {
    /// Whole days until the resolved expiration, negative once past.
    /// `None` when the item has no resolved expiration.
    pub days_remaining: Option<i64>,
    pub status: WarrantyStatus,
}

/// Compute days-remaining and status with the default 30-day window.
#[must_use]
pub fn compute(item: &WarrantyItem, today: NaiveDate) -> Computed {
    compute_with_window(item, today, DEFAULT_EXPIRING_SOON_DAYS)
}

/// Compute days-remaining and status against an explicit expiring-soon
/// window.
///
/// Decision order: no resolved expiration is always `Active`; negative days
/// is `Expired`; `0..=soon_days` is `ExpiringSoon` (both boundaries
/// inclusive); anything further out is `Active`.
#[must_use]
pub fn compute_with_window(item: &WarrantyItem, today: NaiveDate, soon_days: i64) -> Computed {
    let expiration = item.resolved_expiration();
    let days_remaining = expiration.map(|exp| (exp - today).num_days());

    let status = match days_remaining {
        None => WarrantyStatus::Active,
        Some(days) if days < 0 => WarrantyStatus::Expired,
        Some(days) if days <= soon_days => WarrantyStatus::ExpiringSoon,
        Some(_) => WarrantyStatus::Active,
    };

    Computed {
        days_remaining,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::{Computed, compute};
    use crate::model::{WarrantyItem, WarrantyStatus};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 8, 1)
    }

    fn item_expiring(expiration: NaiveDate) -> WarrantyItem {
        let mut item = WarrantyItem::new("Laptop", date(2024, 1, 1));
        item.expiration_date = Some(expiration);
        item
    }

    #[test]
    fn active_when_expiration_beyond_window() {
        // 2024-08-01 to 2024-10-01: 31 days of August + 30 of September.
        let result = compute(&item_expiring(date(2024, 10, 1)), today());
        assert_eq!(
            result,
            Computed {
                days_remaining: Some(61),
                status: WarrantyStatus::Active,
            }
        );
    }

    #[test]
    fn expiring_soon_within_window() {
        let result = compute(&item_expiring(date(2024, 8, 15)), today());
        assert_eq!(result.days_remaining, Some(14));
        assert_eq!(result.status, WarrantyStatus::ExpiringSoon);
    }

    #[test]
    fn expired_when_date_passed() {
        let result = compute(&item_expiring(date(2024, 7, 1)), today());
        assert_eq!(result.days_remaining, Some(-31));
        assert_eq!(result.status, WarrantyStatus::Expired);
    }

    #[test]
    fn duration_fallback_when_no_explicit_date() {
        let mut item = WarrantyItem::new("Phone", date(2024, 1, 15));
        item.duration_months = Some(12);
        let result = compute(&item, today());
        assert_eq!(result.days_remaining, Some(167));
        assert_eq!(result.status, WarrantyStatus::Active);
    }

    #[test]
    fn no_expiration_is_always_active() {
        let item = WarrantyItem::new("Gift card", date(2024, 1, 1));
        let result = compute(&item, today());
        assert_eq!(result.days_remaining, None);
        assert_eq!(result.status, WarrantyStatus::Active);
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        assert_eq!(
            compute(&item_expiring(date(2024, 8, 31)), today()).status,
            WarrantyStatus::ExpiringSoon,
            "exactly 30 days out"
        );
        assert_eq!(
            compute(&item_expiring(today()), today()).status,
            WarrantyStatus::ExpiringSoon,
            "expires today"
        );
        assert_eq!(
            compute(&item_expiring(date(2024, 9, 1)), today()).status,
            WarrantyStatus::Active,
            "31 days out"
        );
        assert_eq!(
            compute(&item_expiring(date(2024, 7, 31)), today()).status,
            WarrantyStatus::Expired,
            "one day past"
        );
    }

    proptest! {
        // Status bands are a total, monotonic partition of days_remaining.
        #[test]
        fn status_bands_are_monotonic(offset in -4000_i64..4000) {
            let expiration = today() + chrono::Duration::days(offset);
            let result = compute(&item_expiring(expiration), today());
            prop_assert_eq!(result.days_remaining, Some(offset));
            let expected = if offset < 0 {
                WarrantyStatus::Expired
            } else if offset <= 30 {
                WarrantyStatus::ExpiringSoon
            } else {
                WarrantyStatus::Active
            };
            prop_assert_eq!(result.status, expected);
        }
    }
}
