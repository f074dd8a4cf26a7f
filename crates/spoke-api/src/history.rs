//! Read-only handlers for event history and the dashboard.

use std::sync::Arc;

use axum::{Json, extract::State};
use spoke_core::{
  Inventory,
  dashboard::DashboardSummary,
  lifecycle::{AssemblyEntry, SaleRecord},
  store::InventoryStore,
};

use crate::error::ApiError;

/// `GET /assemblies` — each record joined with its stock item.
pub async fn assemblies<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
) -> Result<Json<Vec<AssemblyEntry>>, ApiError> {
  Ok(Json(inventory.list_assembly_history().await?))
}

/// `GET /sales`
pub async fn sales<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
) -> Result<Json<Vec<SaleRecord>>, ApiError> {
  Ok(Json(inventory.list_sales().await?))
}

/// `GET /dashboard`
pub async fn dashboard<S: InventoryStore>(
  State(inventory): State<Arc<Inventory<S>>>,
) -> Result<Json<DashboardSummary>, ApiError> {
  Ok(Json(inventory.dashboard().await?))
}
