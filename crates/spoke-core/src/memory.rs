//! [`MemoryStore`] — a flat-list [`InventoryStore`] that lives entirely in
//! process memory.
//!
//! Used for tests and for running the server without a database file. Nothing
//! survives a restart.

use std::{
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Utc};

use crate::{
  id::{AssemblyId, SaleId, StockItemId, TagId},
  lifecycle::{AssemblyRecord, NewAssembly, NewSale, SaleRecord, StockStatus},
  stock::{NewStockItem, StockItem},
  store::{InventoryStore, StockFilter},
  tag::{DEFAULT_TAGS, MasterTag, TagCategory},
};

/// One collection: records in insertion order plus the last id handed out.
/// Ids are never reused, even after a delete.
struct Collection<T> {
  last_id: i64,
  records: Vec<T>,
}

impl<T> Default for Collection<T> {
  fn default() -> Self { Self { last_id: 0, records: Vec::new() } }
}

impl<T> Collection<T> {
  fn push_with(&mut self, build: impl FnOnce(i64) -> T) -> &T {
    self.last_id += 1;
    self.records.push(build(self.last_id));
    // Just pushed, so the vector is non-empty.
    &self.records[self.records.len() - 1]
  }
}

#[derive(Default)]
struct Inner {
  stock:      Collection<StockItem>,
  assemblies: Collection<AssemblyRecord>,
  sales:      Collection<SaleRecord>,
  tags:       Collection<MasterTag>,
}

/// An in-memory store. Operations cannot fail.
#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  /// An empty store with no vocabulary.
  pub fn new() -> Self { Self::default() }

  /// A store pre-filled with [`DEFAULT_TAGS`], like a freshly created
  /// database.
  pub fn with_default_tags() -> Self {
    let store = Self::new();
    {
      let now = Utc::now();
      let mut inner = store.lock();
      for (category, value) in DEFAULT_TAGS {
        inner.tags.push_with(|id| MasterTag {
          id:         TagId(id),
          category:   *category,
          value:      (*value).to_owned(),
          created_at: now,
        });
      }
    }
    store
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    // A panic mid-operation leaves at worst a half-appended record; the data
    // is still usable.
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl InventoryStore for MemoryStore {
  type Error = Infallible;

  // ── Stock items ───────────────────────────────────────────────────────────

  async fn create_stock_item(
    &self,
    input: NewStockItem,
    at:    DateTime<Utc>,
  ) -> Result<StockItem, Infallible> {
    let mut inner = self.lock();
    Ok(
      inner
        .stock
        .push_with(|id| input.into_item(StockItemId(id), at))
        .clone(),
    )
  }

  async fn get_stock_item(
    &self,
    id: StockItemId,
  ) -> Result<Option<StockItem>, Infallible> {
    let inner = self.lock();
    Ok(inner.stock.records.iter().find(|i| i.id == id).cloned())
  }

  async fn list_stock_items(
    &self,
    filter: &StockFilter,
  ) -> Result<Vec<StockItem>, Infallible> {
    let inner = self.lock();
    Ok(
      inner
        .stock
        .records
        .iter()
        .filter(|i| filter.matches(i))
        .cloned()
        .collect(),
    )
  }

  async fn update_stock_item(
    &self,
    item:     StockItem,
    expected: StockStatus,
  ) -> Result<bool, Infallible> {
    let mut inner = self.lock();
    match inner
      .stock
      .records
      .iter_mut()
      .find(|i| i.id == item.id && i.status == expected)
    {
      Some(slot) => {
        *slot = item;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn create_assembly(
    &self,
    input: NewAssembly,
    at:    DateTime<Utc>,
  ) -> Result<AssemblyRecord, Infallible> {
    let mut inner = self.lock();
    Ok(
      inner
        .assemblies
        .push_with(|id| AssemblyRecord {
          id:            AssemblyId(id),
          stock_item_id: input.stock_item_id,
          staff_name:    input.staff_name,
          assembly_date: input.assembly_date,
          created_at:    at,
        })
        .clone(),
    )
  }

  async fn list_assemblies(&self) -> Result<Vec<AssemblyRecord>, Infallible> {
    Ok(self.lock().assemblies.records.clone())
  }

  async fn create_sale(
    &self,
    input: NewSale,
    at:    DateTime<Utc>,
  ) -> Result<SaleRecord, Infallible> {
    let mut inner = self.lock();
    Ok(
      inner
        .sales
        .push_with(|id| SaleRecord {
          id:            SaleId(id),
          stock_item_id: input.stock_item_id,
          sale_date:     input.sale_date,
          created_at:    at,
        })
        .clone(),
    )
  }

  async fn list_sales(&self) -> Result<Vec<SaleRecord>, Infallible> {
    Ok(self.lock().sales.records.clone())
  }

  // ── Master data ───────────────────────────────────────────────────────────

  async fn create_tag(
    &self,
    category: TagCategory,
    value:    String,
    at:       DateTime<Utc>,
  ) -> Result<MasterTag, Infallible> {
    let mut inner = self.lock();
    Ok(
      inner
        .tags
        .push_with(|id| MasterTag {
          id: TagId(id),
          category,
          value,
          created_at: at,
        })
        .clone(),
    )
  }

  async fn list_tags(
    &self,
    category: Option<TagCategory>,
  ) -> Result<Vec<MasterTag>, Infallible> {
    let inner = self.lock();
    Ok(
      inner
        .tags
        .records
        .iter()
        .filter(|t| category.is_none_or(|c| c == t.category))
        .cloned()
        .collect(),
    )
  }

  async fn delete_tag(&self, id: TagId) -> Result<bool, Infallible> {
    let mut inner = self.lock();
    let before = inner.tags.records.len();
    inner.tags.records.retain(|t| t.id != id);
    Ok(inner.tags.records.len() != before)
  }
}
