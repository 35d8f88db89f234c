//! Matchday server: configuration, HTTP wiring and the scheduled winner job.

pub mod scheduler;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use matchday_core::{
  scoring::{ScoringPolicy, WrongGuess},
  store::LeagueStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `MATCHDAY_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub scoring:    ScoringConfig,
  #[serde(default)]
  pub schedule:   ScheduleConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScoringConfig {
  /// `"zero"` (default) or `"penalty"`.
  #[serde(default)]
  pub wrong_guess: WrongGuess,
}

impl ScoringConfig {
  pub fn policy(&self) -> ScoringPolicy { self.wrong_guess.into() }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleConfig {
  /// Run the winner job on a schedule while serving.
  #[serde(default = "default_enabled")]
  pub enabled:     bool,
  /// Six-field cron expression (seconds first).
  #[serde(default = "default_winner_cron")]
  pub winner_cron: String,
}

impl Default for ScheduleConfig {
  fn default() -> Self {
    Self { enabled: default_enabled(), winner_cron: default_winner_cron() }
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8000 }
fn default_enabled() -> bool { true }
fn default_winner_cron() -> String { "0 0 0 * * *".to_owned() }

/// Layer the optional TOML file under `MATCHDAY_`-prefixed environment
/// variables. Nested keys use `__`, e.g. `MATCHDAY_SCORING__WRONG_GUESS`.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("MATCHDAY").separator("__"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full HTTP application: the JSON API under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>, policy: ScoringPolicy) -> Router
where
  S: LeagueStore + 'static,
{
  Router::new()
    .nest("/api", matchday_api::api_router(store, policy))
    .layer(TraceLayer::new_for_http())
}
