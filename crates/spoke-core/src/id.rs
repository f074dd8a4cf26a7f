//! Store-assigned record identifiers.
//!
//! Every collection hands out auto-incrementing integer keys. Each collection
//! gets its own newtype so a sale id can never be passed where a stock item id
//! is expected.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! record_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      pub fn get(self) -> i64 { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
      }
    }

    impl FromStr for $name {
      type Err = ParseIntError;

      fn from_str(s: &str) -> Result<Self, Self::Err> { s.parse().map(Self) }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }
  };
}

record_id! {
  /// Key of a [`StockItem`](crate::stock::StockItem).
  StockItemId
}

record_id! {
  /// Key of an [`AssemblyRecord`](crate::lifecycle::AssemblyRecord).
  AssemblyId
}

record_id! {
  /// Key of a [`SaleRecord`](crate::lifecycle::SaleRecord).
  SaleId
}

record_id! {
  /// Key of a [`MasterTag`](crate::tag::MasterTag).
  TagId
}
