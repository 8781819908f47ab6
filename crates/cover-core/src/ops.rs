//! Operations over the store: one function per user-facing action.
//!
//! Validation always happens before any write, and a failed operation
//! leaves the store exactly as it was. After save/import/toggle the caller
//! is expected to trigger an immediate reminder check
//! ([`remind::run_check`](crate::remind::run_check)).

use crate::backup;
use crate::error::Error;
use crate::model::WarrantyItem;
use crate::store::WarrantyStore;
use tracing::info;

/// How imported items combine with the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Imported items are added alongside existing ones.
    #[default]
    Merge,
    /// The existing collection is cleared first.
    Replace,
}

/// Validate and persist an item, returning its (possibly new) id.
///
/// # Errors
///
/// Validation errors ([`Error::BlankName`], [`Error::NoExpiration`],
/// [`Error::NegativePrice`]) reject the save before anything is written;
/// [`Error::Store`] if the write itself fails.
pub fn save(store: &mut dyn WarrantyStore, item: &WarrantyItem) -> Result<i64, Error> {
    item.validate()?;
    let id = store.upsert(item)?;
    info!(id, name = %item.name, "warranty saved");
    Ok(id)
}

/// Look up one item.
///
/// # Errors
///
/// [`Error::NotFound`] when no item has that id; [`Error::Store`] on a
/// failed read.
pub fn get(store: &dyn WarrantyStore, id: i64) -> Result<WarrantyItem, Error> {
    store.find_by_id(id)?.ok_or(Error::NotFound { id })
}

/// Flip an item's reminder flag.
///
/// # Errors
///
/// [`Error::NotFound`] when no item has that id; [`Error::Store`] on a
/// failed read or write.
pub fn toggle_reminder(
    store: &mut dyn WarrantyStore,
    id: i64,
    enabled: bool,
) -> Result<WarrantyItem, Error> {
    let mut item = get(store, id)?;
    item.reminder_enabled = enabled;
    store.upsert(&item)?;
    info!(id, enabled, "reminder toggled");
    Ok(item)
}

/// Delete by id. Deleting an id that does not exist is a no-op.
///
/// # Errors
///
/// [`Error::Store`] when the delete fails.
pub fn delete(store: &mut dyn WarrantyStore, id: i64) -> Result<(), Error> {
    store.delete(id)
}

/// Remove every record.
///
/// # Errors
///
/// [`Error::Store`] when the delete fails.
pub fn clear(store: &mut dyn WarrantyStore) -> Result<(), Error> {
    store.clear()
}

/// Export the full collection as a backup document.
///
/// # Errors
///
/// [`Error::Store`] on a failed read, [`Error::BackupEncode`] if
/// serialization fails.
pub fn export(store: &dyn WarrantyStore) -> Result<String, Error> {
    let items = store.all()?;
    backup::export_json(&items)
}

/// Import a backup document, returning how many items were added.
///
/// The document is parsed in full before anything is touched: a malformed
/// backup imports nothing and, in `Replace` mode, clears nothing. Imported
/// items get fresh ids.
///
/// # Errors
///
/// [`Error::BadBackup`] when the document does not parse; [`Error::Store`]
/// when the clear or insert fails.
pub fn import(
    store: &mut dyn WarrantyStore,
    document: &str,
    mode: ImportMode,
) -> Result<usize, Error> {
    let items = backup::import_json(document)?;
    if mode == ImportMode::Replace {
        store.clear()?;
    }
    store.upsert_many(&items)?;
    info!(count = items.len(), ?mode, "backup imported");
    Ok(items.len())
}
