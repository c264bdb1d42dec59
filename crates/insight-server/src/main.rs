//! insight-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `INSIGHT_*`
//! environment overrides, opens the SQLite record store, and serves the
//! JSON API under `/api`.

mod settings;

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use insight_api::{AppState, scratch::ScratchDir};
use insight_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Insight records ingest server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let raw = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("INSIGHT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = raw
    .try_deserialize::<ServerConfig>()
    .context("failed to deserialise ServerConfig")?
    .expanded();

  tokio::fs::create_dir_all(&server_cfg.upload_dir)
    .await
    .with_context(|| format!("failed to create upload dir {:?}", server_cfg.upload_dir))?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  let scratch = ScratchDir::new(&server_cfg.upload_dir);
  tracing::info!(dir = %scratch.root().display(), "staging uploads");

  let state = AppState {
    store:   Arc::new(store),
    scratch: Arc::new(scratch),
  };

  let app = insight_api::app(state, server_cfg.max_upload_bytes);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
