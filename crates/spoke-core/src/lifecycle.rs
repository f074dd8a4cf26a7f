//! Stock status and the event records written on each transition.
//!
//! A stock item moves forward only: not-assembled → assembled → sold. Each
//! step writes exactly one event record (assembly or sale) alongside the
//! status change on the item itself.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  id::{AssemblyId, SaleId, StockItemId},
  stock::StockItem,
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a stock item sits in the assembly/sale pipeline.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StockStatus {
  NotAssembled,
  Assembled,
  Sold,
}

impl StockStatus {
  /// The only status this one may advance to, if any.
  pub fn next(self) -> Option<Self> {
    match self {
      Self::NotAssembled => Some(Self::Assembled),
      Self::Assembled => Some(Self::Sold),
      Self::Sold => None,
    }
  }

  pub fn can_advance_to(self, target: Self) -> bool {
    self.next() == Some(target)
  }
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Written once when an item is assembled. Never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyRecord {
  pub id:            AssemblyId,
  pub stock_item_id: StockItemId,
  pub staff_name:    String,
  pub assembly_date: NaiveDate,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::InventoryStore::create_assembly`].
#[derive(Debug, Clone)]
pub struct NewAssembly {
  pub stock_item_id: StockItemId,
  pub staff_name:    String,
  pub assembly_date: NaiveDate,
}

/// An assembly record joined with the stock item it refers to.
///
/// `item` is `None` only if the store has lost the referenced record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyEntry {
  pub record: AssemblyRecord,
  pub item:   Option<StockItem>,
}

// ─── Sale ────────────────────────────────────────────────────────────────────

/// Written once when an assembled item is sold. Never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
  pub id:            SaleId,
  pub stock_item_id: StockItemId,
  pub sale_date:     DateTime<Utc>,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::InventoryStore::create_sale`].
#[derive(Debug, Clone)]
pub struct NewSale {
  pub stock_item_id: StockItemId,
  pub sale_date:     DateTime<Utc>,
}
