//! Stock items — the bicycles (or boxed batches of bicycles) recorded at
//! intake and tracked through assembly and sale.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, id::StockItemId, lifecycle::StockStatus};

// ─── Arrival date ────────────────────────────────────────────────────────────

/// When the stock physically arrived. Intake forms allow the date to be left
/// out, in which case the item carries the `unknown` sentinel and is never
/// considered stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArrivalDate {
  Known(NaiveDate),
  Unknown,
}

impl ArrivalDate {
  pub const SENTINEL: &'static str = "unknown";

  pub fn date(self) -> Option<NaiveDate> {
    match self {
      Self::Known(d) => Some(d),
      Self::Unknown => None,
    }
  }
}

impl From<NaiveDate> for ArrivalDate {
  fn from(d: NaiveDate) -> Self { Self::Known(d) }
}

impl fmt::Display for ArrivalDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Known(d) => write!(f, "{}", d.format("%Y-%m-%d")),
      Self::Unknown => f.write_str(Self::SENTINEL),
    }
  }
}

impl FromStr for ArrivalDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    // Older exports wrote "N/A" for a missing date.
    if s.is_empty()
      || s.eq_ignore_ascii_case(Self::SENTINEL)
      || s.eq_ignore_ascii_case("n/a")
    {
      return Ok(Self::Unknown);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self::Known)
      .map_err(|e| Error::Validation(format!("invalid arrival date {s:?}: {e}")))
  }
}

impl TryFrom<String> for ArrivalDate {
  type Error = Error;

  fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<ArrivalDate> for String {
  fn from(d: ArrivalDate) -> Self { d.to_string() }
}

// ─── StockItem ───────────────────────────────────────────────────────────────

/// A persisted stock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
  pub id:                StockItemId,
  pub name:              String,
  #[serde(rename = "type")]
  pub item_type:         String,
  pub supplier:          String,
  pub size:              String,
  pub color:             Option<String>,
  pub packaging:         String,
  pub units_per_package: u32,
  pub location:          String,
  pub arrival_date:      ArrivalDate,
  pub status:            StockStatus,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

// ─── NewStockItem ────────────────────────────────────────────────────────────

/// Intake form fields. The id, status and timestamps are assigned on intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockItem {
  pub name:              String,
  #[serde(rename = "type")]
  pub item_type:         String,
  pub supplier:          String,
  pub size:              String,
  #[serde(default)]
  pub color:             Option<String>,
  pub packaging:         String,
  pub units_per_package: u32,
  pub location:          String,
  #[serde(default = "unknown_arrival")]
  pub arrival_date:      ArrivalDate,
}

fn unknown_arrival() -> ArrivalDate { ArrivalDate::Unknown }

impl NewStockItem {
  /// Check that every required field carries a value.
  ///
  /// Values are stored as given; whitespace-only counts as blank.
  pub fn validate(&self) -> Result<(), Error> {
    let required = [
      ("name", &self.name),
      ("type", &self.item_type),
      ("supplier", &self.supplier),
      ("size", &self.size),
      ("packaging", &self.packaging),
      ("location", &self.location),
    ];
    let blank: Vec<&str> = required
      .iter()
      .filter(|(_, v)| v.trim().is_empty())
      .map(|(field, _)| *field)
      .collect();

    if !blank.is_empty() {
      return Err(Error::Validation(format!(
        "required fields are blank: {}",
        blank.join(", ")
      )));
    }
    if self.units_per_package == 0 {
      return Err(Error::Validation(
        "units_per_package must be a positive integer".into(),
      ));
    }
    Ok(())
  }

  /// Build the stored record for a freshly assigned id.
  pub fn into_item(self, id: StockItemId, at: DateTime<Utc>) -> StockItem {
    StockItem {
      id,
      name: self.name,
      item_type: self.item_type,
      supplier: self.supplier,
      size: self.size,
      color: self.color,
      packaging: self.packaging,
      units_per_package: self.units_per_package,
      location: self.location,
      arrival_date: self.arrival_date,
      status: StockStatus::NotAssembled,
      created_at: at,
      updated_at: at,
    }
  }
}
