//! The `InventoryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends ([`crate::memory::MemoryStore`]
//! here, `spoke-store-sqlite` for on-disk use). The workflow depends on this
//! abstraction, never on a concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  id::{StockItemId, TagId},
  lifecycle::{AssemblyRecord, NewAssembly, NewSale, SaleRecord, StockStatus},
  stock::{NewStockItem, StockItem},
  tag::{MasterTag, TagCategory},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`InventoryStore::list_stock_items`]. All set fields must
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockFilter {
  pub status:    Option<StockStatus>,
  /// Exact match on the item type.
  pub item_type: Option<String>,
  /// Exact match on the supplier.
  pub supplier:  Option<String>,
  /// Exact match on the product name.
  pub name:      Option<String>,
  /// Case-insensitive substring over name, type, size, supplier and color.
  pub text:      Option<String>,
}

impl StockFilter {
  pub fn with_status(status: StockStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  /// Evaluate the filter against an in-memory record.
  pub fn matches(&self, item: &StockItem) -> bool {
    if self.status.is_some_and(|s| s != item.status) {
      return false;
    }
    if self.item_type.as_ref().is_some_and(|t| *t != item.item_type) {
      return false;
    }
    if self.supplier.as_ref().is_some_and(|s| *s != item.supplier) {
      return false;
    }
    if self.name.as_ref().is_some_and(|n| *n != item.name) {
      return false;
    }
    match self.text.as_deref().map(str::trim) {
      None | Some("") => true,
      Some(text) => {
        let needle = text.to_lowercase();
        [
          Some(item.name.as_str()),
          Some(item.item_type.as_str()),
          Some(item.size.as_str()),
          Some(item.supplier.as_str()),
          item.color.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
      }
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a record store backend.
///
/// Each collection hands out its own auto-incrementing ids. The store does no
/// cross-collection bookkeeping: keeping an item's status consistent with its
/// assembly and sale records is the workflow's job.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait InventoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Stock items ───────────────────────────────────────────────────────

  /// Persist a new item with status `NotAssembled` and both timestamps set to
  /// `at`.
  fn create_stock_item(
    &self,
    input: NewStockItem,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<StockItem, Self::Error>> + Send + '_;

  /// Retrieve an item by id. Returns `None` if not found.
  fn get_stock_item(
    &self,
    id: StockItemId,
  ) -> impl Future<Output = Result<Option<StockItem>, Self::Error>> + Send + '_;

  /// List items matching `filter`, in id order.
  fn list_stock_items<'a>(
    &'a self,
    filter: &'a StockFilter,
  ) -> impl Future<Output = Result<Vec<StockItem>, Self::Error>> + Send + 'a;

  /// Overwrite the stored record with the same id, but only while its stored
  /// status is still `expected`. Returns `false` if there was no such record
  /// or its status has moved on.
  fn update_stock_item(
    &self,
    item: StockItem,
    expected: StockStatus,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  fn create_assembly(
    &self,
    input: NewAssembly,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<AssemblyRecord, Self::Error>> + Send + '_;

  /// All assembly records, in id order.
  fn list_assemblies(
    &self,
  ) -> impl Future<Output = Result<Vec<AssemblyRecord>, Self::Error>> + Send + '_;

  fn create_sale(
    &self,
    input: NewSale,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<SaleRecord, Self::Error>> + Send + '_;

  /// All sale records, in id order.
  fn list_sales(
    &self,
  ) -> impl Future<Output = Result<Vec<SaleRecord>, Self::Error>> + Send + '_;

  // ── Master data ───────────────────────────────────────────────────────

  /// Persist a tag as given. No uniqueness is enforced.
  fn create_tag(
    &self,
    category: TagCategory,
    value: String,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<MasterTag, Self::Error>> + Send + '_;

  /// List tags in id order, optionally restricted to one category.
  fn list_tags(
    &self,
    category: Option<TagCategory>,
  ) -> impl Future<Output = Result<Vec<MasterTag>, Self::Error>> + Send + '_;

  /// Delete a tag. Returns `false` if there was no such tag.
  fn delete_tag(
    &self,
    id: TagId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
