//! Handlers for `/stock` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/stock` | Optional `status`, `type`, `supplier`, `name`, `q` |
//! | `POST` | `/stock` | Body: [`NewStockItem`]; returns 201 + stored item |
//! | `GET`  | `/stock/{id}` | 404 if not found |
//! | `GET`  | `/stock/{id}/label` | QR label payload |
//! | `POST` | `/stock/{id}/assemble` | Body: [`AssembleBody`]; returns 201 + record |
//! | `POST` | `/stock/{id}/quick-assemble` | First staff member, today |
//! | `POST` | `/stock/{id}/sell` | Returns 201 + sale record |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use spoke_core::{
  Inventory,
  id::StockItemId,
  label::LabelPayload,
  lifecycle::StockStatus,
  stock::{NewStockItem, StockItem},
  store::{InventoryStore, StockFilter},
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub status:   Option<StockStatus>,
  #[serde(rename = "type")]
  pub kind:     Option<String>,
  pub supplier: Option<String>,
  pub name:     Option<String>,
  /// Free-text search over name, type, size, supplier and color.
  pub q:        Option<String>,
}

impl From<ListParams> for StockFilter {
  fn from(p: ListParams) -> Self {
    StockFilter {
      status:    p.status,
      item_type: p.kind,
      supplier:  p.supplier,
      name:      p.name,
      text:      p.q,
    }
  }
}

/// `GET /stock[?status=...][&type=...][&supplier=...][&name=...][&q=...]`
pub async fn list<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StockItem>>, ApiError> {
  let items = inventory.list_stock(&StockFilter::from(params)).await?;
  Ok(Json(items))
}

// ─── Intake ───────────────────────────────────────────────────────────────────

/// `POST /stock` — returns 201 + the stored [`StockItem`].
pub async fn create<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Json(body): Json<NewStockItem>,
) -> Result<impl IntoResponse, ApiError> {
  let item = inventory.intake_stock(body).await?;
  Ok((StatusCode::CREATED, Json(item)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /stock/{id}`
pub async fn get_one<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Path(id): Path<StockItemId>,
) -> Result<Json<StockItem>, ApiError> {
  Ok(Json(inventory.get_stock(id).await?))
}

/// `GET /stock/{id}/label`
pub async fn label<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Path(id): Path<StockItemId>,
) -> Result<Json<LabelPayload>, ApiError> {
  Ok(Json(inventory.label(id).await?))
}

// ─── Transitions ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssembleBody {
  pub staff_name:    String,
  pub assembly_date: NaiveDate,
}

/// `POST /stock/{id}/assemble` — body: `{"staff_name":"...","assembly_date":"YYYY-MM-DD"}`
pub async fn assemble<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Path(id): Path<StockItemId>,
  Json(body): Json<AssembleBody>,
) -> Result<impl IntoResponse, ApiError> {
  let record = inventory
    .assemble(id, &body.staff_name, body.assembly_date)
    .await?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /stock/{id}/quick-assemble`
pub async fn quick_assemble<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Path(id): Path<StockItemId>,
) -> Result<impl IntoResponse, ApiError> {
  let record = inventory.quick_assemble(id).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /stock/{id}/sell`
pub async fn sell<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Path(id): Path<StockItemId>,
) -> Result<impl IntoResponse, ApiError> {
  let record = inventory.mark_sold(id).await?;
  Ok((StatusCode::CREATED, Json(record)))
}
