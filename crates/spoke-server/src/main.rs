//! spoke server binary.
//!
//! Reads `spoke.toml` (or the path specified with `--config`), opens the
//! SQLite store (or an in-memory one with `--ephemeral`), and serves the JSON
//! API under `/api`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use spoke_core::memory::MemoryStore;
use spoke_server::ServerConfig;
use spoke_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Spoke bicycle inventory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "spoke.toml")]
  config: PathBuf,

  /// Override the configured SQLite file.
  #[arg(long)]
  store: Option<PathBuf>,

  /// Keep all data in memory; nothing is written to disk.
  #[arg(long)]
  ephemeral: bool,

  /// Override the configured listen port.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to read config {:?}", cli.config))?;
  if let Some(store) = cli.store {
    cfg.store_path = store;
  }
  if let Some(port) = cli.port {
    cfg.port = port;
  }
  cfg.ephemeral |= cli.ephemeral;

  let app = if cfg.ephemeral {
    tracing::warn!("running with an in-memory store; data is lost on exit");
    spoke_server::app(MemoryStore::with_default_tags(), &cfg)
  } else {
    let store_path = cfg.resolved_store_path();
    let store = SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?;
    tracing::info!(path = %store_path.display(), "opened store");
    spoke_server::app(store, &cfg)
  };

  let address = cfg.address();
  tracing::info!("Listening on http://{address}/api");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
