//! The payload encoded into a stock item's QR label.
//!
//! Rendering the image is left to an external service; this crate only
//! decides what goes into it.

use serde::{Deserialize, Serialize};

use crate::{id::StockItemId, stock::StockItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPayload {
  pub id:        StockItemId,
  pub name:      String,
  #[serde(rename = "type")]
  pub item_type: String,
  pub supplier:  String,
  pub size:      String,
}

impl LabelPayload {
  /// Compact JSON handed to the QR renderer.
  pub fn qr_text(&self) -> serde_json::Result<String> { serde_json::to_string(self) }
}

impl From<&StockItem> for LabelPayload {
  fn from(item: &StockItem) -> Self {
    Self {
      id:        item.id,
      name:      item.name.clone(),
      item_type: item.item_type.clone(),
      supplier:  item.supplier.clone(),
      size:      item.size.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn qr_text_is_compact_json() {
    let label = LabelPayload {
      id:        StockItemId::from(7),
      name:      "Trail X".into(),
      item_type: "MTB".into(),
      supplier:  "Supplier A".into(),
      size:      "26\"".into(),
    };
    assert_eq!(
      label.qr_text().unwrap(),
      r#"{"id":7,"name":"Trail X","type":"MTB","supplier":"Supplier A","size":"26\""}"#
    );
  }
}
