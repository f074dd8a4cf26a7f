//! Dashboard aggregation — counts, stale stock and low-stock alerts, derived
//! on every read from the full stock list. Nothing here is stored.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  id::StockItemId,
  lifecycle::StockStatus,
  stock::{ArrivalDate, StockItem},
};

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Thresholds for the derived alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardRules {
  /// Not-assembled stock older than this many calendar months is stale.
  pub stale_after_months:  u32,
  /// A (name, size) group at or below this many units is low.
  pub low_stock_threshold: u32,
}

impl Default for DashboardRules {
  fn default() -> Self { Self { stale_after_months: 3, low_stock_threshold: 2 } }
}

impl DashboardRules {
  /// The earliest arrival date that is still fresh as of `now`.
  ///
  /// Uses calendar month subtraction; when the target month is shorter the
  /// day is clamped to its last day.
  pub fn stale_cutoff(&self, now: DateTime<Utc>) -> NaiveDate {
    let today = now.date_naive();
    today
      .checked_sub_months(Months::new(self.stale_after_months))
      .unwrap_or(NaiveDate::MIN)
  }

  /// Whether `item` is not-assembled stock that arrived before the cutoff.
  pub fn is_stale(&self, item: &StockItem, now: DateTime<Utc>) -> bool {
    if item.status != StockStatus::NotAssembled {
      return false;
    }
    match item.arrival_date {
      ArrivalDate::Known(arrived) => arrived < self.stale_cutoff(now),
      ArrivalDate::Unknown => false,
    }
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
  pub total:         usize,
  pub not_assembled: usize,
  pub assembled:     usize,
  pub sold:          usize,
}

/// Not-assembled stock sharing a product name and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockGroup {
  pub name:  String,
  pub size:  String,
  /// Sum of `units_per_package` across the group's records.
  pub units: u64,
}

/// A single dashboard alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
  StaleStock {
    count:  usize,
    months: u32,
  },
  LowStock {
    name:  String,
    size:  String,
    units: u64,
  },
}

impl fmt::Display for Notification {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::StaleStock { count, months } => write!(
        f,
        "{count} not-assembled item(s) arrived more than {months} months ago"
      ),
      Self::LowStock { name, size, units } => {
        write!(f, "low stock: {name} {size} has {units} unit(s) left")
      }
    }
  }
}

/// Everything the dashboard view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
  pub as_of:         DateTime<Utc>,
  pub counts:        StatusCounts,
  /// Ids of stale items, in input order.
  pub stale:         Vec<StockItemId>,
  /// Low groups ordered by (name, size).
  pub low_stock:     Vec<LowStockGroup>,
  pub notifications: Vec<Notification>,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Derive the dashboard from the full stock list.
pub fn summarize(
  items: &[StockItem],
  now: DateTime<Utc>,
  rules: &DashboardRules,
) -> DashboardSummary {
  let mut counts = StatusCounts { total: items.len(), ..StatusCounts::default() };
  for item in items {
    match item.status {
      StockStatus::NotAssembled => counts.not_assembled += 1,
      StockStatus::Assembled => counts.assembled += 1,
      StockStatus::Sold => counts.sold += 1,
    }
  }

  let stale: Vec<StockItemId> = items
    .iter()
    .filter(|i| rules.is_stale(i, now))
    .map(|i| i.id)
    .collect();

  let low_stock = low_stock_groups(items, rules.low_stock_threshold);

  let mut notifications = Vec::with_capacity(low_stock.len() + 1);
  if !stale.is_empty() {
    notifications.push(Notification::StaleStock {
      count:  stale.len(),
      months: rules.stale_after_months,
    });
  }
  notifications.extend(low_stock.iter().map(|g| Notification::LowStock {
    name:  g.name.clone(),
    size:  g.size.clone(),
    units: g.units,
  }));

  DashboardSummary { as_of: now, counts, stale, low_stock, notifications }
}

/// Group not-assembled items by (name, size) and keep groups at or under
/// `threshold`.
///
/// The group total adds up `units_per_package` of each record, not
/// packages × units.
pub fn low_stock_groups(items: &[StockItem], threshold: u32) -> Vec<LowStockGroup> {
  let mut groups: BTreeMap<(&str, &str), u64> = BTreeMap::new();
  for item in items.iter().filter(|i| i.status == StockStatus::NotAssembled) {
    *groups.entry((item.name.as_str(), item.size.as_str())).or_default() +=
      u64::from(item.units_per_package);
  }

  groups
    .into_iter()
    .filter(|(_, units)| *units <= u64::from(threshold))
    .map(|((name, size), units)| LowStockGroup {
      name: name.to_owned(),
      size: size.to_owned(),
      units,
    })
    .collect()
}
