//! Master-data tags: the freeform vocabularies behind every selection input
//! (bike types, suppliers, sizes, packaging, locations, staff, product names).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::id::TagId;

/// The closed set of vocabularies a tag can belong to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TagCategory {
  Type,
  Supplier,
  Size,
  Packaging,
  Location,
  Staff,
  ProductName,
}

/// A persisted vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterTag {
  pub id:         TagId,
  pub category:   TagCategory,
  pub value:      String,
  pub created_at: DateTime<Utc>,
}

/// Vocabulary written into a freshly created store.
pub const DEFAULT_TAGS: &[(TagCategory, &str)] = &[
  (TagCategory::Size, "16\""),
  (TagCategory::Size, "18\""),
  (TagCategory::Size, "20\""),
  (TagCategory::Size, "24\""),
  (TagCategory::Size, "26\""),
  (TagCategory::Size, "27.5\""),
  (TagCategory::Size, "29\""),
  (TagCategory::Packaging, "Karung"),
  (TagCategory::Packaging, "Kardus"),
  (TagCategory::Packaging, "Box"),
  (TagCategory::Packaging, "Plastik"),
  (TagCategory::Location, "Rak A"),
  (TagCategory::Location, "Rak B"),
  (TagCategory::Location, "Gudang Belakang"),
  (TagCategory::Location, "Gudang Depan"),
  (TagCategory::Type, "MTB"),
  (TagCategory::Type, "Road Bike"),
  (TagCategory::Type, "City Bike"),
  (TagCategory::Type, "BMX"),
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_names_round_trip() {
    assert_eq!(TagCategory::ProductName.as_ref(), "product_name");
    assert_eq!(
      "product_name".parse::<TagCategory>().unwrap(),
      TagCategory::ProductName
    );
    assert!("staf".parse::<TagCategory>().is_err());
    assert_eq!(
      serde_json::to_value(TagCategory::Staff).unwrap(),
      serde_json::json!("staff")
    );
  }

  #[test]
  fn defaults_seed_no_staff() {
    assert!(DEFAULT_TAGS.iter().all(|(c, _)| *c != TagCategory::Staff));
  }
}
