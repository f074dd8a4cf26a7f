//! Handlers for `/tags` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/tags` | Optional `?category=type\|supplier\|size\|...` |
//! | `POST`   | `/tags` | Body: `{"category":"staff","value":"Budi"}` |
//! | `DELETE` | `/tags/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use spoke_core::{
  Inventory,
  id::TagId,
  store::InventoryStore,
  tag::{MasterTag, TagCategory},
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category: Option<TagCategory>,
}

/// `GET /tags[?category=<category>]`
pub async fn list<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<MasterTag>>, ApiError> {
  Ok(Json(inventory.list_master_tags(params.category).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub category: TagCategory,
  pub value:    String,
}

/// `POST /tags`
pub async fn create<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let tag = inventory.add_master_tag(body.category, &body.value).await?;
  Ok((StatusCode::CREATED, Json(tag)))
}

/// `DELETE /tags/{id}`
pub async fn delete_one<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
  Path(id): Path<TagId>,
) -> Result<StatusCode, ApiError> {
  inventory.delete_master_tag(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
