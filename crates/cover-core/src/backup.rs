//! JSON backup codec.
//!
//! The wire format is a pretty-printed JSON array with camelCase field
//! names and ISO-8601 (`YYYY-MM-DD`) dates — the shape existing backup
//! files already use. Export omits absent optionals instead of writing
//! nulls; import tolerates unknown fields but fails on a missing `name` or
//! `purchaseDate` or an unparseable date, importing nothing in that case.
//!
//! Imported items always come back with `id = 0`: identity is reassigned on
//! insert, so an import can never collide with existing records. Merge vs.
//! replace is the caller's concern ([`ops::import`](crate::ops::import)).

use crate::error::Error;
use crate::model::WarrantyItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackupRecord {
    #[serde(default)]
    id: i64,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    store: Option<String>,
    purchase_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_months: Option<i64>,
    #[serde(default = "default_true")]
    reminder_enabled: bool,
}

const fn default_true() -> bool {
    true
}

impl From<&WarrantyItem> for BackupRecord {
    fn from(item: &WarrantyItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            store: item.store.clone(),
            purchase_date: item.purchase_date,
            expiration_date: item.expiration_date,
            duration_months: item.duration_months.map(i64::from),
            reminder_enabled: item.reminder_enabled,
        }
    }
}

impl From<BackupRecord> for WarrantyItem {
    fn from(record: BackupRecord) -> Self {
        Self {
            // Fresh identity on import; the store assigns a real id.
            id: 0,
            name: record.name,
            category: record.category,
            price: record.price,
            store: record.store,
            purchase_date: record.purchase_date,
            expiration_date: record.expiration_date,
            // Non-positive durations are meaningless; treat as absent.
            duration_months: record
                .duration_months
                .and_then(|months| u32::try_from(months).ok())
                .filter(|months| *months > 0),
            reminder_enabled: record.reminder_enabled,
        }
    }
}

/// Serialize the full collection to a human-readable JSON document.
///
/// # Errors
///
/// [`Error::BackupEncode`] if JSON serialization fails.
pub fn export_json(items: &[WarrantyItem]) -> Result<String, Error> {
    let records: Vec<BackupRecord> = items.iter().map(BackupRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(Error::BackupEncode)
}

/// Parse a backup document back into items, each with `id = 0`.
///
/// # Errors
///
/// [`Error::BadBackup`] when the document is not a JSON array of records
/// with the required fields.
pub fn import_json(document: &str) -> Result<Vec<WarrantyItem>, Error> {
    let records: Vec<BackupRecord> =
        serde_json::from_str(document).map_err(|source| Error::BadBackup {
            reason: source.to_string(),
        })?;
    Ok(records.into_iter().map(WarrantyItem::from).collect())
}
