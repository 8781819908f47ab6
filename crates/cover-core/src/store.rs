//! The warranty store: durable records plus a live full-collection feed.
//!
//! `subscribe` is the "observe" half of the repository contract: the
//! receiver gets the current collection immediately, then a fresh copy
//! after every committed mutation, in mutation order. Emission order of
//! items within a collection is unspecified — the aggregator imposes the
//! presentation order.

use crate::db;
use crate::error::Error;
use crate::model::WarrantyItem;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params, types::Type};
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender, channel};
use tracing::debug;

/// Storage interface consumed by the operations layer.
pub trait WarrantyStore {
    /// Point-in-time read of the full collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the underlying read fails.
    fn all(&self) -> Result<Vec<WarrantyItem>, Error>;

    /// Live feed of the full collection. Emits the current items
    /// immediately, then after every mutation until the receiver is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the initial read fails.
    fn subscribe(&mut self) -> Result<Receiver<Vec<WarrantyItem>>, Error>;

    /// # Errors
    ///
    /// Returns [`Error::Store`] when the lookup fails.
    fn find_by_id(&self, id: i64) -> Result<Option<WarrantyItem>, Error>;

    /// Insert (`id == 0`) or replace (`id != 0`) one item, returning its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the write fails; prior data is
    /// untouched.
    fn upsert(&mut self, item: &WarrantyItem) -> Result<i64, Error>;

    /// Upsert a batch atomically: either every item lands or none do.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the transaction fails.
    fn upsert_many(&mut self, items: &[WarrantyItem]) -> Result<(), Error>;

    /// Delete by id; deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the delete fails.
    fn delete(&mut self, id: i64) -> Result<(), Error>;

    /// Remove every record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the delete fails.
    fn clear(&mut self) -> Result<(), Error>;
}

// ---------------------------------------------------------------------------
// SQLite implementation
// ---------------------------------------------------------------------------

/// Rusqlite-backed store. Mutations notify every live subscriber with a
/// fresh read of the collection.
pub struct SqliteStore {
    conn: Connection,
    watchers: Vec<Sender<Vec<WarrantyItem>>>,
}

impl SqliteStore {
    /// Open (creating and migrating as needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or migrated.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = db::open_store_db(path)?;
        Ok(Self {
            conn,
            watchers: Vec::new(),
        })
    }

    /// In-memory store with the full schema; used by tests.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema cannot be applied.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self {
            conn,
            watchers: Vec::new(),
        })
    }

    fn emit(&mut self) -> Result<(), Error> {
        if self.watchers.is_empty() {
            return Ok(());
        }
        let items = read_all(&self.conn)?;
        self.watchers
            .retain(|watcher| watcher.send(items.clone()).is_ok());
        debug!(subscribers = self.watchers.len(), "store change emitted");
        Ok(())
    }
}

impl WarrantyStore for SqliteStore {
    fn all(&self) -> Result<Vec<WarrantyItem>, Error> {
        read_all(&self.conn)
    }

    fn subscribe(&mut self) -> Result<Receiver<Vec<WarrantyItem>>, Error> {
        let (sender, receiver) = channel();
        let current = read_all(&self.conn)?;
        // The receiver cannot be dropped yet; ignore the impossible error.
        let _ = sender.send(current);
        self.watchers.push(sender);
        Ok(receiver)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<WarrantyItem>, Error> {
        let item = self
            .conn
            .query_row(
                "SELECT id, name, category, price, store, purchase_date,
                        expiration_date, duration_months, reminder_enabled
                 FROM warranties WHERE id = ?1",
                params![id],
                item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn upsert(&mut self, item: &WarrantyItem) -> Result<i64, Error> {
        let id = write_item(&self.conn, item)?;
        self.emit()?;
        Ok(id)
    }

    fn upsert_many(&mut self, items: &[WarrantyItem]) -> Result<(), Error> {
        let tx = self.conn.transaction()?;
        for item in items {
            write_item(&tx, item)?;
        }
        tx.commit()?;
        self.emit()
    }

    fn delete(&mut self, id: i64) -> Result<(), Error> {
        self.conn
            .execute("DELETE FROM warranties WHERE id = ?1", params![id])?;
        self.emit()
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.conn.execute("DELETE FROM warranties", [])?;
        self.emit()
    }
}

/// Read the full collection in the canonical persistent order: dated items
/// chronologically, undated items last.
fn read_all(conn: &Connection) -> Result<Vec<WarrantyItem>, Error> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, price, store, purchase_date,
                expiration_date, duration_months, reminder_enabled
         FROM warranties
         ORDER BY expiration_date IS NULL, expiration_date ASC, id ASC",
    )?;
    let items = stmt
        .query_map([], item_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<WarrantyItem> {
    let purchase_raw: String = row.get(5)?;
    let expiration_raw: Option<String> = row.get(6)?;
    let duration: Option<i64> = row.get(7)?;

    Ok(WarrantyItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
        store: row.get(4)?,
        purchase_date: parse_date(5, &purchase_raw)?,
        expiration_date: expiration_raw
            .as_deref()
            .map(|raw| parse_date(6, raw))
            .transpose()?,
        duration_months: duration
            .map(|months| {
                u32::try_from(months).map_err(|error| {
                    rusqlite::Error::FromSqlConversionFailure(7, Type::Integer, Box::new(error))
                })
            })
            .transpose()?,
        reminder_enabled: row.get(8)?,
    })
}

fn parse_date(column: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
    })
}

fn write_item(conn: &Connection, item: &WarrantyItem) -> rusqlite::Result<i64> {
    let purchase = item.purchase_date.to_string();
    let expiration = item.expiration_date.map(|date| date.to_string());
    // A zero duration counts as absent everywhere else; persist it that way
    // so the schema's positive-duration constraint holds.
    let duration = item
        .duration_months
        .filter(|months| *months > 0)
        .map(i64::from);

    if item.id == 0 {
        conn.execute(
            "INSERT INTO warranties
                 (name, category, price, store, purchase_date,
                  expiration_date, duration_months, reminder_enabled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.name,
                item.category,
                item.price,
                item.store,
                purchase,
                expiration,
                duration,
                item.reminder_enabled,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    } else {
        conn.execute(
            "INSERT OR REPLACE INTO warranties
                 (id, name, category, price, store, purchase_date,
                  expiration_date, duration_months, reminder_enabled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.name,
                item.category,
                item.price,
                item.store,
                purchase,
                expiration,
                duration,
                item.reminder_enabled,
            ],
        )?;
        Ok(item.id)
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Vec-backed store with the same emission contract; used by aggregator and
/// composer tests and anywhere a database is overkill.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<WarrantyItem>,
    next_id: i64,
    watchers: Vec<Sender<Vec<WarrantyItem>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            watchers: Vec::new(),
        }
    }

    fn emit(&mut self) {
        let items = self.items.clone();
        self.watchers
            .retain(|watcher| watcher.send(items.clone()).is_ok());
    }

    fn insert_or_replace(&mut self, item: &WarrantyItem) -> i64 {
        let mut stored = item.clone();
        stored.duration_months = stored.duration_months.filter(|months| *months > 0);
        if stored.id == 0 {
            stored.id = self.next_id;
            self.next_id += 1;
        } else if let Some(existing) = self.items.iter_mut().find(|i| i.id == stored.id) {
            *existing = stored;
            return item.id;
        } else {
            self.next_id = self.next_id.max(stored.id + 1);
        }
        let id = stored.id;
        self.items.push(stored);
        id
    }
}

impl WarrantyStore for MemoryStore {
    fn all(&self) -> Result<Vec<WarrantyItem>, Error> {
        Ok(self.items.clone())
    }

    fn subscribe(&mut self) -> Result<Receiver<Vec<WarrantyItem>>, Error> {
        let (sender, receiver) = channel();
        let _ = sender.send(self.items.clone());
        self.watchers.push(sender);
        Ok(receiver)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<WarrantyItem>, Error> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }

    fn upsert(&mut self, item: &WarrantyItem) -> Result<i64, Error> {
        let id = self.insert_or_replace(item);
        self.emit();
        Ok(id)
    }

    fn upsert_many(&mut self, items: &[WarrantyItem]) -> Result<(), Error> {
        for item in items {
            self.insert_or_replace(item);
        }
        self.emit();
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), Error> {
        self.items.retain(|item| item.id != id);
        self.emit();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.items.clear();
        self.emit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, SqliteStore, WarrantyStore};
    use crate::model::WarrantyItem;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated_item(name: &str, expiration: NaiveDate) -> WarrantyItem {
        let mut item = WarrantyItem::new(name, date(2024, 1, 1));
        item.expiration_date = Some(expiration);
        item
    }

    fn stores() -> Vec<Box<dyn WarrantyStore>> {
        vec![
            Box::new(SqliteStore::open_in_memory().expect("open sqlite store")),
            Box::new(MemoryStore::new()),
        ]
    }

    #[test]
    fn upsert_assigns_ids_and_roundtrips() {
        for mut store in stores() {
            let mut item = dated_item("Laptop", date(2026, 1, 1));
            item.category = Some("Electronics".into());
            item.price = Some(999.5);

            let id = store.upsert(&item).expect("insert");
            assert!(id > 0);

            let found = store.find_by_id(id).expect("lookup").expect("present");
            assert_eq!(found.name, "Laptop");
            assert_eq!(found.category.as_deref(), Some("Electronics"));
            assert_eq!(found.expiration_date, Some(date(2026, 1, 1)));
            assert_eq!(found.id, id);
        }
    }

    #[test]
    fn upsert_with_existing_id_replaces() {
        for mut store in stores() {
            let id = store
                .upsert(&dated_item("Laptop", date(2026, 1, 1)))
                .expect("insert");

            let mut updated = dated_item("Laptop Pro", date(2027, 1, 1));
            updated.id = id;
            assert_eq!(store.upsert(&updated).expect("replace"), id);

            assert_eq!(store.all().expect("read").len(), 1);
            let found = store.find_by_id(id).expect("lookup").expect("present");
            assert_eq!(found.name, "Laptop Pro");
        }
    }

    #[test]
    fn duration_only_items_persist() {
        for mut store in stores() {
            let mut item = WarrantyItem::new("Kettle", date(2024, 5, 20));
            item.duration_months = Some(24);
            let id = store.upsert(&item).expect("insert");

            let found = store.find_by_id(id).expect("lookup").expect("present");
            assert_eq!(found.expiration_date, None);
            assert_eq!(found.duration_months, Some(24));
        }
    }

    #[test]
    fn zero_duration_persists_as_absent() {
        for mut store in stores() {
            // Valid per the date-wins rule: explicit expiration, duration 0.
            let mut item = dated_item("Fridge", date(2026, 1, 1));
            item.duration_months = Some(0);

            let id = store.upsert(&item).expect("insert with zero duration");
            let found = store.find_by_id(id).expect("lookup").expect("present");
            assert_eq!(found.duration_months, None);
            assert_eq!(found.expiration_date, Some(date(2026, 1, 1)));
        }
    }

    #[test]
    fn delete_and_clear() {
        for mut store in stores() {
            let id = store
                .upsert(&dated_item("A", date(2025, 1, 1)))
                .expect("insert");
            store
                .upsert(&dated_item("B", date(2025, 2, 1)))
                .expect("insert");

            store.delete(id).expect("delete");
            assert_eq!(store.all().expect("read").len(), 1);
            assert!(store.find_by_id(id).expect("lookup").is_none());

            // Deleting a missing id is a no-op.
            store.delete(9999).expect("delete missing");

            store.clear().expect("clear");
            assert!(store.all().expect("read").is_empty());
        }
    }

    #[test]
    fn sqlite_reads_come_back_dated_first() {
        let mut store = SqliteStore::open_in_memory().expect("open");
        let mut undated = WarrantyItem::new("Undated", date(2024, 1, 1));
        undated.duration_months = Some(1);
        undated.expiration_date = None;
        store.upsert(&undated).expect("insert");
        store
            .upsert(&dated_item("Late", date(2026, 1, 1)))
            .expect("insert");
        store
            .upsert(&dated_item("Early", date(2025, 1, 1)))
            .expect("insert");

        let names: Vec<String> = store
            .all()
            .expect("read")
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, ["Early", "Late", "Undated"]);
    }

    #[test]
    fn subscription_emits_immediately_then_per_mutation() {
        for mut store in stores() {
            let rx = store.subscribe().expect("subscribe");
            assert!(rx.recv().expect("initial emission").is_empty());

            let id = store
                .upsert(&dated_item("A", date(2025, 1, 1)))
                .expect("insert");
            let after_insert = rx.recv().expect("emission after insert");
            assert_eq!(after_insert.len(), 1);

            store.delete(id).expect("delete");
            let after_delete = rx.recv().expect("emission after delete");
            assert!(after_delete.is_empty());

            // Nothing else queued.
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn batch_upsert_emits_once() {
        for mut store in stores() {
            let rx = store.subscribe().expect("subscribe");
            let _ = rx.recv().expect("initial emission");

            store
                .upsert_many(&[
                    dated_item("A", date(2025, 1, 1)),
                    dated_item("B", date(2025, 2, 1)),
                ])
                .expect("batch insert");

            assert_eq!(rx.recv().expect("batch emission").len(), 2);
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        for mut store in stores() {
            let rx = store.subscribe().expect("subscribe");
            drop(rx);
            // Mutating after the receiver is gone must not fail.
            store
                .upsert(&dated_item("A", date(2025, 1, 1)))
                .expect("insert after unsubscribe");
        }
    }
}
