//! JSON API for the Matchday pipeline.
//!
//! Exposes an axum [`Router`] backed by any [`LeagueStore`]. Auth, TLS and
//! organizer permissions are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", matchday_api::api_router(store.clone(), ScoringPolicy::STANDARD))
//! ```

pub mod error;
pub mod matches;
pub mod predictions;
pub mod tournaments;
pub mod winners;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use matchday_core::{scoring::ScoringPolicy, store::LeagueStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub policy: ScoringPolicy,
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), policy: self.policy }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, policy: ScoringPolicy) -> Router<()>
where
  S: LeagueStore + 'static,
{
  Router::new()
    // Tournaments
    .route("/tournaments/{id}/standings", get(tournaments::standings::<S>))
    .route("/tournaments/{id}/leaderboard", get(tournaments::leaderboard::<S>))
    // Matches
    .route("/matches/{id}/score", put(matches::record::<S>))
    .route("/matches/{id}/evaluate", post(matches::evaluate::<S>))
    // Predictions
    .route("/predictions", put(predictions::submit::<S>))
    // Batch
    .route("/winners/assign", post(winners::assign::<S>))
    .with_state(ApiState { store, policy })
}
