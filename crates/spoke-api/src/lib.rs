//! JSON REST API for Spoke.
//!
//! Exposes an axum [`Router`] backed by an [`Inventory`] over any
//! [`spoke_core::store::InventoryStore`]. The API emits no events; clients
//! re-read after each write.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", spoke_api::api_router(inventory.clone()))
//! ```

pub mod error;
pub mod history;
pub mod stock;
pub mod tags;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use spoke_core::{Inventory, store::InventoryStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `inventory`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(inventory: Arc<Inventory<S>>) -> Router<()>
where
  S: InventoryStore + 'static,
{
  Router::new()
    // Stock
    .route("/stock", get(stock::list::<S>).post(stock::create::<S>))
    .route("/stock/{id}", get(stock::get_one::<S>))
    .route("/stock/{id}/label", get(stock::label::<S>))
    .route("/stock/{id}/assemble", post(stock::assemble::<S>))
    .route("/stock/{id}/quick-assemble", post(stock::quick_assemble::<S>))
    .route("/stock/{id}/sell", post(stock::sell::<S>))
    // History & dashboard
    .route("/assemblies", get(history::assemblies::<S>))
    .route("/sales", get(history::sales::<S>))
    .route("/dashboard", get(history::dashboard::<S>))
    // Master data
    .route("/tags", get(tags::list::<S>).post(tags::create::<S>))
    .route("/tags/{id}", delete(tags::delete_one::<S>))
    .with_state(inventory)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use spoke_core::memory::MemoryStore;
  use spoke_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  fn memory_router() -> Router {
    api_router(Arc::new(Inventory::new(MemoryStore::new())))
  }

  async fn send(
    router: Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn trail_x() -> Value {
    json!({
      "name": "Trail X",
      "type": "MTB",
      "supplier": "Supplier A",
      "size": "26\"",
      "packaging": "Kardus",
      "units_per_package": 1,
      "location": "Rak A",
      "arrival_date": "2026-01-10",
    })
  }

  // ── Stock ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn intake_returns_201_and_item_is_readable() {
    let app = memory_router();
    let (status, item) = send(app.clone(), "POST", "/stock", Some(trail_x())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["status"], "not-assembled");
    assert_eq!(item["arrival_date"], "2026-01-10");
    assert_eq!(item["color"], Value::Null);

    let id = item["id"].as_i64().unwrap();
    let (status, fetched) = send(app, "GET", &format!("/stock/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, item);
  }

  #[tokio::test]
  async fn intake_with_blank_field_is_422() {
    let mut body = trail_x();
    body["supplier"] = json!("");
    let app = memory_router();
    let (status, err) = send(app.clone(), "POST", "/stock", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err["error"].as_str().unwrap().contains("supplier"));

    let (_, list) = send(app, "GET", "/stock", None).await;
    assert_eq!(list, json!([]));
  }

  #[tokio::test]
  async fn missing_stock_is_404() {
    let (status, _) = send(memory_router(), "GET", "/stock/12", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
      memory_router(),
      "POST",
      "/stock/12/assemble",
      Some(json!({ "staff_name": "Budi", "assembly_date": "2026-10-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn lifecycle_over_http() {
    let app = memory_router();
    send(app.clone(), "POST", "/stock", Some(trail_x())).await;

    let (status, _) = send(app.clone(), "POST", "/stock/1/sell", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, record) = send(
      app.clone(),
      "POST",
      "/stock/1/assemble",
      Some(json!({ "staff_name": "Budi", "assembly_date": "2026-10-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["stock_item_id"], 1);
    assert_eq!(record["assembly_date"], "2026-10-01");

    let (status, sale) = send(app.clone(), "POST", "/stock/1/sell", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["stock_item_id"], 1);

    let (_, history) = send(app.clone(), "GET", "/assemblies", None).await;
    assert_eq!(history[0]["record"]["staff_name"], "Budi");
    assert_eq!(history[0]["item"]["status"], "sold");

    let (_, sales) = send(app.clone(), "GET", "/sales", None).await;
    assert_eq!(sales.as_array().unwrap().len(), 1);

    let (_, sold) = send(app, "GET", "/stock?status=sold", None).await;
    assert_eq!(sold.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn quick_assemble_without_staff_is_412() {
    let app = memory_router();
    send(app.clone(), "POST", "/stock", Some(trail_x())).await;

    let (status, _) = send(app.clone(), "POST", "/stock/1/quick-assemble", None).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);

    send(
      app.clone(),
      "POST",
      "/tags",
      Some(json!({ "category": "staff", "value": "Sari" })),
    )
    .await;
    let (status, record) = send(app, "POST", "/stock/1/quick-assemble", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["staff_name"], "Sari");
  }

  #[tokio::test]
  async fn label_payload() {
    let app = memory_router();
    send(app.clone(), "POST", "/stock", Some(trail_x())).await;
    let (status, label) = send(app, "GET", "/stock/1/label", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(label, json!({
      "id": 1,
      "name": "Trail X",
      "type": "MTB",
      "supplier": "Supplier A",
      "size": "26\"",
    }));
  }

  #[tokio::test]
  async fn dashboard_lists_notifications() {
    let app = memory_router();
    send(app.clone(), "POST", "/stock", Some(trail_x())).await;
    send(app.clone(), "POST", "/stock", Some(trail_x())).await;

    let (status, summary) = send(app, "GET", "/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["counts"]["not_assembled"], 2);
    assert_eq!(summary["low_stock"][0]["units"], 2);

    let kinds: Vec<&str> = summary["notifications"]
      .as_array()
      .unwrap()
      .iter()
      .map(|n| n["kind"].as_str().unwrap())
      .collect();
    assert!(kinds.contains(&"low_stock"));
  }

  // ── Tags ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn tag_create_list_delete() {
    let app = memory_router();
    let (status, tag) = send(
      app.clone(),
      "POST",
      "/tags",
      Some(json!({ "category": "supplier", "value": "Polygon" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
      app.clone(),
      "POST",
      "/tags",
      Some(json!({ "category": "supplier", "value": "Polygon" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, suppliers) = send(app.clone(), "GET", "/tags?category=supplier", None).await;
    assert_eq!(suppliers.as_array().unwrap().len(), 1);

    let id = tag["id"].as_i64().unwrap();
    let (status, _) = send(app.clone(), "DELETE", &format!("/tags/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app, "DELETE", &format!("/tags/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn sqlite_backed_router_serves_seeded_tags() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = api_router(Arc::new(Inventory::new(store)));

    let (status, sizes) = send(app, "GET", "/tags?category=size", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sizes.as_array().unwrap().len(), 7);
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  mod offline {
    use chrono::{DateTime, Utc};
    use spoke_core::{
      id::{StockItemId, TagId},
      lifecycle::{AssemblyRecord, NewAssembly, NewSale, SaleRecord, StockStatus},
      stock::{NewStockItem, StockItem},
      store::{InventoryStore, StockFilter},
      tag::{MasterTag, TagCategory},
    };

    #[derive(Debug, thiserror::Error)]
    #[error("database is offline")]
    pub struct Offline;

    /// A backend whose every call fails.
    pub struct OfflineStore;

    impl InventoryStore for OfflineStore {
      type Error = Offline;

      async fn create_stock_item(
        &self,
        _: NewStockItem,
        _: DateTime<Utc>,
      ) -> Result<StockItem, Offline> {
        Err(Offline)
      }

      async fn get_stock_item(&self, _: StockItemId) -> Result<Option<StockItem>, Offline> {
        Err(Offline)
      }

      async fn list_stock_items(&self, _: &StockFilter) -> Result<Vec<StockItem>, Offline> {
        Err(Offline)
      }

      async fn update_stock_item(&self, _: StockItem, _: StockStatus) -> Result<bool, Offline> {
        Err(Offline)
      }

      async fn create_assembly(
        &self,
        _: NewAssembly,
        _: DateTime<Utc>,
      ) -> Result<AssemblyRecord, Offline> {
        Err(Offline)
      }

      async fn list_assemblies(&self) -> Result<Vec<AssemblyRecord>, Offline> { Err(Offline) }

      async fn create_sale(&self, _: NewSale, _: DateTime<Utc>) -> Result<SaleRecord, Offline> {
        Err(Offline)
      }

      async fn list_sales(&self) -> Result<Vec<SaleRecord>, Offline> { Err(Offline) }

      async fn create_tag(
        &self,
        _: TagCategory,
        _: String,
        _: DateTime<Utc>,
      ) -> Result<MasterTag, Offline> {
        Err(Offline)
      }

      async fn list_tags(&self, _: Option<TagCategory>) -> Result<Vec<MasterTag>, Offline> {
        Err(Offline)
      }

      async fn delete_tag(&self, _: TagId) -> Result<bool, Offline> { Err(Offline) }
    }
  }

  #[tokio::test]
  async fn store_failure_is_500_with_error_body() {
    let app = api_router(Arc::new(Inventory::new(offline::OfflineStore)));

    let (status, err) = send(app.clone(), "POST", "/stock", Some(trail_x())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err, json!({ "error": "database is offline" }));

    let (status, err) = send(app, "GET", "/dashboard", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err["error"].is_string());
  }
}
