//! Canonical SQLite schema for the warranty store.
//!
//! A single `warranties` table holds the durable records; everything else
//! (snapshots, list state) is recomputed on read. Dates are TEXT in
//! ISO-8601 so the expiration index sorts chronologically.

/// Migration v1: the warranties table plus its read-path index.
pub const MIGRATION_V1_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS warranties (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    category TEXT,
    price REAL CHECK (price IS NULL OR price >= 0),
    store TEXT,
    purchase_date TEXT NOT NULL,
    expiration_date TEXT,
    duration_months INTEGER CHECK (duration_months IS NULL OR duration_months > 0),
    reminder_enabled INTEGER NOT NULL DEFAULT 1 CHECK (reminder_enabled IN (0, 1)),
    CHECK (expiration_date IS NOT NULL OR duration_months IS NOT NULL)
);

CREATE INDEX IF NOT EXISTS idx_warranties_expiration
    ON warranties(expiration_date);
"#;
