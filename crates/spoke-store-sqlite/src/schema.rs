//! SQL schema for the Spoke SQLite store.
//!
//! Executed at connection startup. `PRAGMA user_version` tells a fresh file
//! (version 0) apart from an initialised one; the default vocabulary is only
//! written into a fresh file.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS stock_items (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT    NOT NULL,
    item_type         TEXT    NOT NULL,
    supplier          TEXT    NOT NULL,
    size              TEXT    NOT NULL,
    color             TEXT,
    packaging         TEXT    NOT NULL,
    units_per_package INTEGER NOT NULL CHECK (units_per_package > 0),
    location          TEXT    NOT NULL,
    arrival_date      TEXT    NOT NULL,   -- 'YYYY-MM-DD' | 'unknown'
    status            TEXT    NOT NULL,   -- 'not-assembled' | 'assembled' | 'sold'
    created_at        TEXT    NOT NULL,   -- RFC 3339 UTC
    updated_at        TEXT    NOT NULL
);

-- Assembly and sale records are append-only.
CREATE TABLE IF NOT EXISTS assemblies (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_item_id  INTEGER NOT NULL REFERENCES stock_items(id),
    staff_name     TEXT    NOT NULL,
    assembly_date  TEXT    NOT NULL,      -- 'YYYY-MM-DD'
    created_at     TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS sales (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_item_id  INTEGER NOT NULL REFERENCES stock_items(id),
    sale_date      TEXT    NOT NULL,
    created_at     TEXT    NOT NULL
);

-- No UNIQUE (category, value): duplicates are filtered by the workflow.
CREATE TABLE IF NOT EXISTS master_tags (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    category   TEXT NOT NULL,
    value      TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS stock_status_idx     ON stock_items(status);
CREATE INDEX IF NOT EXISTS stock_type_idx       ON stock_items(item_type);
CREATE INDEX IF NOT EXISTS stock_supplier_idx   ON stock_items(supplier);
CREATE INDEX IF NOT EXISTS stock_name_idx       ON stock_items(name);
CREATE INDEX IF NOT EXISTS assemblies_stock_idx ON assemblies(stock_item_id);
CREATE INDEX IF NOT EXISTS sales_stock_idx      ON sales(stock_item_id);
CREATE INDEX IF NOT EXISTS tags_category_idx    ON master_tags(category);
";
