//! HTTP front for the Spoke inventory API.
//!
//! Holds the runtime configuration and assembles the full application router;
//! `main.rs` only parses arguments, opens the store and serves.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use spoke_core::{Inventory, dashboard::DashboardRules, store::InventoryStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `spoke.toml` and `SPOKE_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// SQLite file; a leading `~/` is expanded to `$HOME`.
  pub store_path:          PathBuf,
  /// Keep everything in memory instead of opening `store_path`.
  pub ephemeral:           bool,
  pub stale_after_months:  u32,
  pub low_stock_threshold: u32,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let rules = DashboardRules::default();
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8080,
      store_path:          PathBuf::from("spoke.db"),
      ephemeral:           false,
      stale_after_months:  rules.stale_after_months,
      low_stock_threshold: rules.low_stock_threshold,
    }
  }
}

impl ServerConfig {
  /// Layer an optional TOML file under `SPOKE_`-prefixed environment
  /// variables.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("SPOKE"))
      .build()?
      .try_deserialize()
  }

  pub fn rules(&self) -> DashboardRules {
    DashboardRules {
      stale_after_months:  self.stale_after_months,
      low_stock_threshold: self.low_stock_threshold,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API mounted under `/api`, with request tracing.
pub fn app<S>(store: S, config: &ServerConfig) -> Router
where
  S: InventoryStore + 'static,
{
  let inventory = Arc::new(Inventory::new(store).with_rules(config.rules()));
  Router::new()
    .nest("/api", spoke_api::api_router(inventory))
    .layer(TraceLayer::new_for_http())
}
