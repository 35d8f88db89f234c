//! Matchday server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! league store and either serves the JSON API or runs the winner batch once.
//!
//! ```text
//! cargo run -p matchday-server -- assign-winners --today 2024-07-01
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use matchday_server::{ServerConfig, expand_tilde, load_config, scheduler};
use matchday_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Matchday league server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml", global = true)]
  config: std::path::PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (default).
  Serve,
  /// Assign winners to finished tournaments once, print the report and exit.
  AssignWinners {
    /// Reference date (YYYY-MM-DD); defaults to today in UTC.
    #[arg(long)]
    today: Option<NaiveDate>,
  },
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

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(store, &server_cfg).await,
    Command::AssignWinners { today } => {
      let today = today.unwrap_or_else(|| Utc::now().date_naive());
      let report =
        matchday_core::winners::assign_pending_winners(store.as_ref(), today)
          .await
          .context("winner assignment failed")?;
      println!("{}", serde_json::to_string_pretty(&report)?);
      Ok(())
    }
  }
}

async fn serve(store: Arc<SqliteStore>, cfg: &ServerConfig) -> anyhow::Result<()> {
  let mut jobs = if cfg.schedule.enabled {
    Some(scheduler::start_winner_job(store.clone(), &cfg.schedule.winner_cron).await?)
  } else {
    None
  };

  let app = matchday_server::app(store, cfg.scoring.policy());
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  if let Some(jobs) = jobs.as_mut() {
    jobs
      .shutdown()
      .await
      .map_err(|e| anyhow::anyhow!("scheduler shutdown failed: {e}"))?;
  }

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for shutdown signal: {e}");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
