//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Instants are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! enums by their wire names.

use chrono::{DateTime, NaiveDate, Utc};
use spoke_core::{
  id::{AssemblyId, SaleId, StockItemId, TagId},
  lifecycle::{AssemblyRecord, SaleRecord, StockStatus},
  stock::{ArrivalDate, StockItem},
  tag::{MasterTag, TagCategory},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(column: &'static str, s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::decode(column, s, e))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(column: &'static str, s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::decode(column, s, e))
}

pub fn decode_arrival(s: &str) -> Result<ArrivalDate> {
  s.parse().map_err(|e| Error::decode("arrival_date", s, e))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_status(s: &str) -> Result<StockStatus> {
  s.parse().map_err(|e| Error::decode("status", s, e))
}

pub fn decode_category(s: &str) -> Result<TagCategory> {
  s.parse().map_err(|e| Error::decode("category", s, e))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawStockItem::from_row`].
pub const STOCK_COLUMNS: &str = "id, name, item_type, supplier, size, color, \
   packaging, units_per_package, location, arrival_date, status, created_at, \
   updated_at";

/// Raw values read directly from a `stock_items` row.
pub struct RawStockItem {
  pub id:                i64,
  pub name:              String,
  pub item_type:         String,
  pub supplier:          String,
  pub size:              String,
  pub color:             Option<String>,
  pub packaging:         String,
  pub units_per_package: i64,
  pub location:          String,
  pub arrival_date:      String,
  pub status:            String,
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawStockItem {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                row.get(0)?,
      name:              row.get(1)?,
      item_type:         row.get(2)?,
      supplier:          row.get(3)?,
      size:              row.get(4)?,
      color:             row.get(5)?,
      packaging:         row.get(6)?,
      units_per_package: row.get(7)?,
      location:          row.get(8)?,
      arrival_date:      row.get(9)?,
      status:            row.get(10)?,
      created_at:        row.get(11)?,
      updated_at:        row.get(12)?,
    })
  }

  pub fn into_item(self) -> Result<StockItem> {
    let units_per_package = u32::try_from(self.units_per_package).map_err(|e| {
      Error::decode("units_per_package", self.units_per_package.to_string(), e)
    })?;

    Ok(StockItem {
      id: StockItemId(self.id),
      name: self.name,
      item_type: self.item_type,
      supplier: self.supplier,
      size: self.size,
      color: self.color,
      packaging: self.packaging,
      units_per_package,
      location: self.location,
      arrival_date: decode_arrival(&self.arrival_date)?,
      status: decode_status(&self.status)?,
      created_at: decode_dt("created_at", &self.created_at)?,
      updated_at: decode_dt("updated_at", &self.updated_at)?,
    })
  }
}

/// Raw values read directly from an `assemblies` row.
pub struct RawAssembly {
  pub id:            i64,
  pub stock_item_id: i64,
  pub staff_name:    String,
  pub assembly_date: String,
  pub created_at:    String,
}

impl RawAssembly {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      stock_item_id: row.get(1)?,
      staff_name:    row.get(2)?,
      assembly_date: row.get(3)?,
      created_at:    row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<AssemblyRecord> {
    Ok(AssemblyRecord {
      id:            AssemblyId(self.id),
      stock_item_id: StockItemId(self.stock_item_id),
      staff_name:    self.staff_name,
      assembly_date: decode_date("assembly_date", &self.assembly_date)?,
      created_at:    decode_dt("created_at", &self.created_at)?,
    })
  }
}

/// Raw values read directly from a `sales` row.
pub struct RawSale {
  pub id:            i64,
  pub stock_item_id: i64,
  pub sale_date:     String,
  pub created_at:    String,
}

impl RawSale {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      stock_item_id: row.get(1)?,
      sale_date:     row.get(2)?,
      created_at:    row.get(3)?,
    })
  }

  pub fn into_record(self) -> Result<SaleRecord> {
    Ok(SaleRecord {
      id:            SaleId(self.id),
      stock_item_id: StockItemId(self.stock_item_id),
      sale_date:     decode_dt("sale_date", &self.sale_date)?,
      created_at:    decode_dt("created_at", &self.created_at)?,
    })
  }
}

/// Raw values read directly from a `master_tags` row.
pub struct RawTag {
  pub id:         i64,
  pub category:   String,
  pub value:      String,
  pub created_at: String,
}

impl RawTag {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      category:   row.get(1)?,
      value:      row.get(2)?,
      created_at: row.get(3)?,
    })
  }

  pub fn into_tag(self) -> Result<MasterTag> {
    Ok(MasterTag {
      id:         TagId(self.id),
      category:   decode_category(&self.category)?,
      value:      self.value,
      created_at: decode_dt("created_at", &self.created_at)?,
    })
  }
}
