//! [`SqliteStore`] — the SQLite implementation of [`InventoryStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use spoke_core::{
  id::{AssemblyId, SaleId, StockItemId, TagId},
  lifecycle::{AssemblyRecord, NewAssembly, NewSale, SaleRecord, StockStatus},
  stock::{NewStockItem, StockItem},
  store::{InventoryStore, StockFilter},
  tag::{DEFAULT_TAGS, MasterTag, TagCategory},
};

use crate::{
  Result,
  encode::{
    RawAssembly, RawSale, RawStockItem, RawTag, STOCK_COLUMNS, encode_date,
    encode_dt,
  },
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inventory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Create the tables and, on a fresh file, write the default vocabulary.
  async fn init_schema(&self) -> Result<()> {
    let now = encode_dt(Utc::now());

    let seeded = self
      .conn
      .call(move |conn| {
        let version: i64 =
          conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        conn.execute_batch(SCHEMA)?;
        if version != 0 {
          return Ok(false);
        }

        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO master_tags (category, value, created_at) VALUES (?1, ?2, ?3)",
          )?;
          for (category, value) in DEFAULT_TAGS {
            stmt.execute(rusqlite::params![category.as_ref(), value, now])?;
          }
        }
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if seeded {
      tracing::info!(tags = DEFAULT_TAGS.len(), "initialised new store");
    }
    Ok(())
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  type Error = crate::Error;

  // ── Stock items ───────────────────────────────────────────────────────────

  async fn create_stock_item(
    &self,
    input: NewStockItem,
    at:    DateTime<Utc>,
  ) -> Result<StockItem> {
    let row = input.clone();
    let arrival_str = row.arrival_date.to_string();
    let status_str  = spoke_core::lifecycle::StockStatus::NotAssembled
      .as_ref()
      .to_owned();
    let at_str      = encode_dt(at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO stock_items (
             name, item_type, supplier, size, color, packaging,
             units_per_package, location, arrival_date, status,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
          rusqlite::params![
            row.name,
            row.item_type,
            row.supplier,
            row.size,
            row.color,
            row.packaging,
            row.units_per_package,
            row.location,
            arrival_str,
            status_str,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(input.into_item(StockItemId(id), at))
  }

  async fn get_stock_item(&self, id: StockItemId) -> Result<Option<StockItem>> {
    let raw: Option<RawStockItem> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {STOCK_COLUMNS} FROM stock_items WHERE id = ?1"),
              rusqlite::params![id.get()],
              RawStockItem::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStockItem::into_item).transpose()
  }

  async fn list_stock_items(&self, filter: &StockFilter) -> Result<Vec<StockItem>> {
    let status   = filter.status.map(|s| s.as_ref().to_owned());
    let kind     = filter.item_type.clone();
    let supplier = filter.supplier.clone();
    let name     = filter.name.clone();

    let raws: Vec<RawStockItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STOCK_COLUMNS} FROM stock_items
           WHERE (?1 IS NULL OR status    = ?1)
             AND (?2 IS NULL OR item_type = ?2)
             AND (?3 IS NULL OR supplier  = ?3)
             AND (?4 IS NULL OR name      = ?4)
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![status, kind, supplier, name],
            RawStockItem::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // SQLite's LIKE and lower() only fold ASCII, so free text is matched here
    // with the same Unicode folding the memory store uses.
    let mut items = Vec::with_capacity(raws.len());
    for raw in raws {
      let item = raw.into_item()?;
      if filter.matches(&item) {
        items.push(item);
      }
    }
    Ok(items)
  }

  async fn update_stock_item(
    &self,
    item:     StockItem,
    expected: StockStatus,
  ) -> Result<bool> {
    let expected_str = expected.as_ref().to_owned();
    let arrival_str = item.arrival_date.to_string();
    let status_str  = item.status.as_ref().to_owned();
    let created_str = encode_dt(item.created_at);
    let updated_str = encode_dt(item.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE stock_items SET
             name = ?2, item_type = ?3, supplier = ?4, size = ?5, color = ?6,
             packaging = ?7, units_per_package = ?8, location = ?9,
             arrival_date = ?10, status = ?11, created_at = ?12, updated_at = ?13
           WHERE id = ?1 AND status = ?14",
          rusqlite::params![
            item.id.get(),
            item.name,
            item.item_type,
            item.supplier,
            item.size,
            item.color,
            item.packaging,
            item.units_per_package,
            item.location,
            arrival_str,
            status_str,
            created_str,
            updated_str,
            expected_str,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn create_assembly(
    &self,
    input: NewAssembly,
    at:    DateTime<Utc>,
  ) -> Result<AssemblyRecord> {
    let stock_id   = input.stock_item_id.get();
    let staff_name = input.staff_name.clone();
    let date_str   = encode_date(input.assembly_date);
    let at_str     = encode_dt(at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assemblies (stock_item_id, staff_name, assembly_date, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![stock_id, staff_name, date_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(AssemblyRecord {
      id:            AssemblyId(id),
      stock_item_id: input.stock_item_id,
      staff_name:    input.staff_name,
      assembly_date: input.assembly_date,
      created_at:    at,
    })
  }

  async fn list_assemblies(&self) -> Result<Vec<AssemblyRecord>> {
    let raws: Vec<RawAssembly> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, stock_item_id, staff_name, assembly_date, created_at
           FROM assemblies ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], RawAssembly::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssembly::into_record).collect()
  }

  async fn create_sale(&self, input: NewSale, at: DateTime<Utc>) -> Result<SaleRecord> {
    let stock_id = input.stock_item_id.get();
    let sale_str = encode_dt(input.sale_date);
    let at_str   = encode_dt(at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sales (stock_item_id, sale_date, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![stock_id, sale_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(SaleRecord {
      id:            SaleId(id),
      stock_item_id: input.stock_item_id,
      sale_date:     input.sale_date,
      created_at:    at,
    })
  }

  async fn list_sales(&self) -> Result<Vec<SaleRecord>> {
    let raws: Vec<RawSale> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, stock_item_id, sale_date, created_at FROM sales ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], RawSale::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSale::into_record).collect()
  }

  // ── Master data ───────────────────────────────────────────────────────────

  async fn create_tag(
    &self,
    category: TagCategory,
    value:    String,
    at:       DateTime<Utc>,
  ) -> Result<MasterTag> {
    let category_str = category.as_ref().to_owned();
    let value_str    = value.clone();
    let at_str       = encode_dt(at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO master_tags (category, value, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![category_str, value_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(MasterTag { id: TagId(id), category, value, created_at: at })
  }

  async fn list_tags(&self, category: Option<TagCategory>) -> Result<Vec<MasterTag>> {
    let category_str = category.map(|c| c.as_ref().to_owned());

    let raws: Vec<RawTag> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, category, value, created_at FROM master_tags
           WHERE (?1 IS NULL OR category = ?1)
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![category_str], RawTag::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTag::into_tag).collect()
  }

  async fn delete_tag(&self, id: TagId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM master_tags WHERE id = ?1",
          rusqlite::params![id.get()],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
