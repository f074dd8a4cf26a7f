//! The inventory workflow: intake, assembly, sale and master data, on top of
//! any [`InventoryStore`].
//!
//! Every check runs before the first write, so a rejected call leaves the
//! store untouched. The status update and the event record of `assemble` and
//! `mark_sold` are still two separate writes; a crash between them leaves an
//! item advanced without its record.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::{
  Error, Result,
  dashboard::{self, DashboardRules, DashboardSummary},
  error::Entity,
  id::{StockItemId, TagId},
  label::LabelPayload,
  lifecycle::{
    AssemblyEntry, AssemblyRecord, NewAssembly, NewSale, SaleRecord, StockStatus,
  },
  stock::{NewStockItem, StockItem},
  store::{InventoryStore, StockFilter},
  tag::{MasterTag, TagCategory},
};

/// Business operations over a store. Construct one and hand it to whatever
/// presents the data; it holds no other state.
pub struct Inventory<S> {
  store: S,
  rules: DashboardRules,
}

impl<S: InventoryStore> Inventory<S> {
  pub fn new(store: S) -> Self { Self { store, rules: DashboardRules::default() } }

  pub fn with_rules(mut self, rules: DashboardRules) -> Self {
    self.rules = rules;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn rules(&self) -> &DashboardRules { &self.rules }

  // ── Stock ─────────────────────────────────────────────────────────────────

  /// Record incoming stock as not-assembled.
  pub async fn intake_stock(&self, input: NewStockItem) -> Result<StockItem> {
    if let Err(e) = input.validate() {
      warn!(error = %e, "rejected stock intake");
      return Err(e);
    }

    let item = self
      .store
      .create_stock_item(input, Utc::now())
      .await
      .map_err(Error::store)?;

    info!(id = %item.id, name = %item.name, size = %item.size, "stock received");
    Ok(item)
  }

  pub async fn get_stock(&self, id: StockItemId) -> Result<StockItem> {
    self
      .store
      .get_stock_item(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(Entity::StockItem, id.get()))
  }

  pub async fn list_stock(&self, filter: &StockFilter) -> Result<Vec<StockItem>> {
    self.store.list_stock_items(filter).await.map_err(Error::store)
  }

  pub async fn label(&self, id: StockItemId) -> Result<LabelPayload> {
    let item = self.get_stock(id).await?;
    Ok(LabelPayload::from(&item))
  }

  // ── Transitions ───────────────────────────────────────────────────────────

  /// Mark a not-assembled item as assembled by `staff_name` on `date`.
  pub async fn assemble(
    &self,
    id:         StockItemId,
    staff_name: &str,
    date:       NaiveDate,
  ) -> Result<AssemblyRecord> {
    if staff_name.trim().is_empty() {
      return Err(Error::Validation("staff name is required".into()));
    }

    let item = self.advance(id, StockStatus::Assembled).await?;

    let record = self
      .store
      .create_assembly(
        NewAssembly {
          stock_item_id: item.id,
          staff_name:    staff_name.to_owned(),
          assembly_date: date,
        },
        Utc::now(),
      )
      .await
      .map_err(Error::store)?;

    info!(id = %id, staff = %record.staff_name, date = %date, "stock assembled");
    Ok(record)
  }

  /// Assemble using the first staff member on file and today's date.
  pub async fn quick_assemble(&self, id: StockItemId) -> Result<AssemblyRecord> {
    let staff = self
      .store
      .list_tags(Some(TagCategory::Staff))
      .await
      .map_err(Error::store)?;

    let Some(first) = staff.into_iter().next() else {
      warn!(id = %id, "quick assemble with no staff on file");
      return Err(Error::Precondition(
        "no staff recorded; add a staff tag first".into(),
      ));
    };

    self.assemble(id, &first.value, Utc::now().date_naive()).await
  }

  /// Mark an assembled item as sold.
  pub async fn mark_sold(&self, id: StockItemId) -> Result<SaleRecord> {
    let item = self.advance(id, StockStatus::Sold).await?;

    let now = Utc::now();
    let record = self
      .store
      .create_sale(NewSale { stock_item_id: item.id, sale_date: now }, now)
      .await
      .map_err(Error::store)?;

    info!(id = %id, sale = %record.id, "stock sold");
    Ok(record)
  }

  /// Move `id` one step forward to `target`, persisting the new status.
  ///
  /// The write only lands if the stored status is still the one read here, so
  /// of two overlapping calls on the same item exactly one succeeds.
  async fn advance(&self, id: StockItemId, target: StockStatus) -> Result<StockItem> {
    let expected = match target {
      StockStatus::Assembled => StockStatus::NotAssembled,
      _ => StockStatus::Assembled,
    };

    let mut item = self.get_stock(id).await?;
    if !item.status.can_advance_to(target) {
      warn!(id = %id, status = %item.status, target = %target, "illegal transition");
      return Err(Error::InvalidState { id: id.get(), status: item.status, expected });
    }

    item.status = target;
    item.updated_at = Utc::now();

    let updated = self
      .store
      .update_stock_item(item.clone(), expected)
      .await
      .map_err(Error::store)?;
    if !updated {
      // Lost a race: report whatever the item looks like now.
      let current = self.get_stock(id).await?;
      warn!(id = %id, status = %current.status, target = %target, "concurrent transition");
      return Err(Error::InvalidState { id: id.get(), status: current.status, expected });
    }
    Ok(item)
  }

  // ── History ───────────────────────────────────────────────────────────────

  /// Every assembly record joined with its stock item.
  pub async fn list_assembly_history(&self) -> Result<Vec<AssemblyEntry>> {
    let records = self.store.list_assemblies().await.map_err(Error::store)?;
    let items: HashMap<StockItemId, StockItem> = self
      .store
      .list_stock_items(&StockFilter::default())
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|i| (i.id, i))
      .collect();

    Ok(
      records
        .into_iter()
        .map(|record| {
          let item = items.get(&record.stock_item_id).cloned();
          AssemblyEntry { record, item }
        })
        .collect(),
    )
  }

  pub async fn list_sales(&self) -> Result<Vec<SaleRecord>> {
    self.store.list_sales().await.map_err(Error::store)
  }

  // ── Master data ───────────────────────────────────────────────────────────

  pub async fn list_master_tags(
    &self,
    category: Option<TagCategory>,
  ) -> Result<Vec<MasterTag>> {
    self.store.list_tags(category).await.map_err(Error::store)
  }

  /// Add a vocabulary entry. The value is trimmed; blanks and exact
  /// duplicates within the category are rejected.
  pub async fn add_master_tag(
    &self,
    category: TagCategory,
    value:    &str,
  ) -> Result<MasterTag> {
    let value = value.trim();
    if value.is_empty() {
      return Err(Error::Validation(format!("{category} value is blank")));
    }

    let existing = self.list_master_tags(Some(category)).await?;
    if existing.iter().any(|t| t.value == value) {
      return Err(Error::Validation(format!(
        "{category} {value:?} already exists"
      )));
    }

    let tag = self
      .store
      .create_tag(category, value.to_owned(), Utc::now())
      .await
      .map_err(Error::store)?;

    info!(id = %tag.id, category = %category, value = %tag.value, "tag added");
    Ok(tag)
  }

  pub async fn delete_master_tag(&self, id: TagId) -> Result<()> {
    let deleted = self.store.delete_tag(id).await.map_err(Error::store)?;
    if !deleted {
      return Err(Error::NotFound(Entity::Tag, id.get()));
    }
    info!(id = %id, "tag deleted");
    Ok(())
  }

  // ── Dashboard ─────────────────────────────────────────────────────────────

  pub async fn dashboard(&self) -> Result<DashboardSummary> {
    self.dashboard_at(Utc::now()).await
  }

  /// The dashboard as it would look at `now`.
  pub async fn dashboard_at(
    &self,
    now: chrono::DateTime<Utc>,
  ) -> Result<DashboardSummary> {
    let items = self.list_stock(&StockFilter::default()).await?;
    Ok(dashboard::summarize(&items, now, &self.rules))
  }
}
