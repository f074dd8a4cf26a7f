//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, TimeZone as _, Utc};
use spoke_core::{
  Error as CoreError, Inventory,
  id::{StockItemId, TagId},
  lifecycle::{NewAssembly, NewSale, StockStatus},
  stock::{ArrivalDate, NewStockItem},
  store::{InventoryStore, StockFilter},
  tag::{DEFAULT_TAGS, TagCategory},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn bike(name: &str, size: &str) -> NewStockItem {
  NewStockItem {
    name:              name.into(),
    item_type:         "MTB".into(),
    supplier:          "Supplier A".into(),
    size:              size.into(),
    color:             None,
    packaging:         "Kardus".into(),
    units_per_package: 1,
    location:          "Rak A".into(),
    arrival_date:      ArrivalDate::Known(
      NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
    ),
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_is_seeded_with_default_tags() {
  let s = store().await;
  let tags = s.list_tags(None).await.unwrap();
  assert_eq!(tags.len(), DEFAULT_TAGS.len());

  let sizes = s.list_tags(Some(TagCategory::Size)).await.unwrap();
  assert_eq!(sizes.first().map(|t| t.value.as_str()), Some("16\""));
  assert!(s.list_tags(Some(TagCategory::Staff)).await.unwrap().is_empty());
}

#[tokio::test]
async fn reopening_a_file_does_not_reseed() {
  let path = std::env::temp_dir()
    .join(format!("spoke-reopen-{}.db", std::process::id()));
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    let first = s.list_tags(None).await.unwrap()[0].id;
    s.delete_tag(first).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_tags(None).await.unwrap().len(), DEFAULT_TAGS.len() - 1);

  drop(s);
  let _ = std::fs::remove_file(&path);
}

// ─── Stock items ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_stock_item() {
  let s = store().await;
  let at = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
  let mut input = bike("Trail X", "26\"");
  input.color = Some("Merah".into());

  let item = s.create_stock_item(input.clone(), at).await.unwrap();
  assert_eq!(item.id, StockItemId(1));
  assert_eq!(item.status, StockStatus::NotAssembled);

  let fetched = s.get_stock_item(item.id).await.unwrap();
  assert_eq!(fetched, Some(input.into_item(item.id, at)));
}

#[tokio::test]
async fn unknown_arrival_date_roundtrips() {
  let s = store().await;
  let mut input = bike("Trail X", "26\"");
  input.arrival_date = ArrivalDate::Unknown;

  let item = s.create_stock_item(input, Utc::now()).await.unwrap();
  let fetched = s.get_stock_item(item.id).await.unwrap().unwrap();
  assert_eq!(fetched.arrival_date, ArrivalDate::Unknown);
}

#[tokio::test]
async fn get_stock_item_missing_returns_none() {
  let s = store().await;
  assert!(s.get_stock_item(StockItemId(7)).await.unwrap().is_none());
}

#[tokio::test]
async fn update_stock_item_persists_status() {
  let s = store().await;
  let mut item = s
    .create_stock_item(bike("Trail X", "26\""), Utc::now())
    .await
    .unwrap();

  item.status = StockStatus::Assembled;
  item.updated_at = Utc.with_ymd_and_hms(2026, 10, 2, 0, 0, 0).unwrap();
  assert!(
    s.update_stock_item(item.clone(), StockStatus::NotAssembled)
      .await
      .unwrap()
  );

  let fetched = s.get_stock_item(item.id).await.unwrap().unwrap();
  assert_eq!(fetched, item);

  // Stored status is now assembled, so a stale writer changes nothing.
  let mut stale = item.clone();
  stale.status = StockStatus::Sold;
  assert!(
    !s.update_stock_item(stale, StockStatus::NotAssembled)
      .await
      .unwrap()
  );
  assert_eq!(s.get_stock_item(item.id).await.unwrap().unwrap(), item);

  item.id = StockItemId(99);
  assert!(!s.update_stock_item(item, StockStatus::Assembled).await.unwrap());
}

#[tokio::test]
async fn list_stock_items_filters() {
  let s = store().await;
  let now = Utc::now();
  let a = s.create_stock_item(bike("Trail X", "26\""), now).await.unwrap();
  let mut city = bike("City Cruiser", "24\"");
  city.item_type = "City Bike".into();
  city.supplier = "Supplier B".into();
  city.color = Some("Biru".into());
  let b = s.create_stock_item(city, now).await.unwrap();

  let mut assembled = a.clone();
  assembled.status = StockStatus::Assembled;
  s.update_stock_item(assembled, StockStatus::NotAssembled)
    .await
    .unwrap();

  let all = s.list_stock_items(&StockFilter::default()).await.unwrap();
  assert_eq!(all.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a.id, b.id]);

  let pending = s
    .list_stock_items(&StockFilter::with_status(StockStatus::NotAssembled))
    .await
    .unwrap();
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0].id, b.id);

  let by_supplier = StockFilter {
    supplier: Some("Supplier A".into()),
    ..StockFilter::default()
  };
  assert_eq!(s.list_stock_items(&by_supplier).await.unwrap()[0].id, a.id);

  // Case-insensitive text over color.
  let by_text = StockFilter { text: Some("BIRU".into()), ..StockFilter::default() };
  let found = s.list_stock_items(&by_text).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].id, b.id);

  // Size text with a quote character.
  let by_size = StockFilter { text: Some("26\"".into()), ..StockFilter::default() };
  assert_eq!(s.list_stock_items(&by_size).await.unwrap()[0].id, a.id);

  let by_name = StockFilter {
    name: Some("City".into()),
    ..StockFilter::default()
  };
  assert!(s.list_stock_items(&by_name).await.unwrap().is_empty());
}

#[tokio::test]
async fn text_filter_folds_non_ascii_case_like_memory_store() {
  let s = store().await;
  let memory = spoke_core::memory::MemoryStore::new();
  let now = Utc::now();
  let mut steel = bike("Baja", "26\"");
  steel.color = Some("Çelik".into());
  s.create_stock_item(steel.clone(), now).await.unwrap();
  memory.create_stock_item(steel, now).await.unwrap();

  let filter = StockFilter { text: Some("çELIK".into()), ..StockFilter::default() };
  assert_eq!(s.list_stock_items(&filter).await.unwrap().len(), 1);
  assert_eq!(memory.list_stock_items(&filter).await.unwrap().len(), 1);

  // Wildcard characters are literal text, not patterns.
  let wild = StockFilter { text: Some("%".into()), ..StockFilter::default() };
  assert!(s.list_stock_items(&wild).await.unwrap().is_empty());
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn assemblies_and_sales_are_listed_in_order() {
  let s = store().await;
  let now = Utc::now();
  let a = s.create_stock_item(bike("A", "20\""), now).await.unwrap();
  let b = s.create_stock_item(bike("B", "20\""), now).await.unwrap();
  let date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();

  for (id, staff) in [(b.id, "Sari"), (a.id, "Budi")] {
    s.create_assembly(
      NewAssembly { stock_item_id: id, staff_name: staff.into(), assembly_date: date },
      now,
    )
    .await
    .unwrap();
  }
  let sale = s
    .create_sale(NewSale { stock_item_id: b.id, sale_date: now }, now)
    .await
    .unwrap();

  let assemblies = s.list_assemblies().await.unwrap();
  assert_eq!(assemblies.len(), 2);
  assert_eq!(assemblies[0].stock_item_id, b.id);
  assert_eq!(assemblies[0].assembly_date, date);
  assert_eq!(assemblies[1].staff_name, "Budi");

  let sales = s.list_sales().await.unwrap();
  assert_eq!(sales.len(), 1);
  assert_eq!(sales[0].id, sale.id);
  assert_eq!(sales[0].stock_item_id, b.id);
}

// ─── Master data ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn tags_allow_duplicates_at_store_level() {
  let s = store().await;
  let now = Utc::now();
  s.create_tag(TagCategory::Staff, "Budi".into(), now).await.unwrap();
  s.create_tag(TagCategory::Staff, "Budi".into(), now).await.unwrap();

  let staff = s.list_tags(Some(TagCategory::Staff)).await.unwrap();
  assert_eq!(staff.len(), 2);
  assert_ne!(staff[0].id, staff[1].id);
}

#[tokio::test]
async fn delete_tag_reports_presence() {
  let s = store().await;
  let tag = s
    .create_tag(TagCategory::ProductName, "Trail X".into(), Utc::now())
    .await
    .unwrap();

  assert!(s.delete_tag(tag.id).await.unwrap());
  assert!(!s.delete_tag(tag.id).await.unwrap());
  assert!(!s.delete_tag(TagId(10_000)).await.unwrap());
}

// ─── Workflow over SQLite ────────────────────────────────────────────────────

#[tokio::test]
async fn workflow_lifecycle_against_sqlite() {
  let inv = Inventory::new(store().await);
  inv.add_master_tag(TagCategory::Staff, "Budi").await.unwrap();

  let item = inv.intake_stock(bike("Trail X", "26\"")).await.unwrap();
  assert!(matches!(
    inv.mark_sold(item.id).await,
    Err(CoreError::InvalidState { .. })
  ));

  let assembly = inv.quick_assemble(item.id).await.unwrap();
  assert_eq!(assembly.staff_name, "Budi");
  inv.mark_sold(item.id).await.unwrap();

  let stored = inv.get_stock(item.id).await.unwrap();
  assert_eq!(stored.status, StockStatus::Sold);

  let history = inv.list_assembly_history().await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].item.as_ref().map(|i| i.status), Some(StockStatus::Sold));
}

#[tokio::test]
async fn workflow_rejects_duplicate_seeded_tag() {
  let inv = Inventory::new(store().await);
  let err = inv.add_master_tag(TagCategory::Size, "26\"").await.unwrap_err();
  assert!(matches!(err, CoreError::Validation(_)));
}

#[tokio::test]
async fn overlapping_assembles_record_once() {
  let inv = Inventory::new(store().await);
  let item = inv.intake_stock(bike("Trail X", "26\"")).await.unwrap();
  let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();

  let (a, b) = tokio::join!(
    inv.assemble(item.id, "Budi", date),
    inv.assemble(item.id, "Sari", date),
  );
  assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1, "{a:?} / {b:?}");
  let loser = if a.is_ok() { b } else { a };
  assert!(matches!(
    loser,
    Err(CoreError::InvalidState { status: StockStatus::Assembled, .. })
  ));
  assert_eq!(inv.list_assembly_history().await.unwrap().len(), 1);

  let (a, b) = tokio::join!(inv.mark_sold(item.id), inv.mark_sold(item.id));
  assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
  assert_eq!(inv.list_sales().await.unwrap().len(), 1);
}
