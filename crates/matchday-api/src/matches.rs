//! Handlers for `/matches` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/matches/:id/score` | Body: [`ScoreBody`]; records the result and re-scores predictions |
//! | `POST` | `/matches/:id/evaluate` | Re-score predictions; 412 while unplayed |

use axum::{
  Json,
  extract::{Path, State},
};
use matchday_core::{
  fixture::Score,
  scoring::{ScoreEntry, ScoreReport, record_score, score_match},
  store::LeagueStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// JSON body accepted by `PUT /matches/:id/score`. Negative scores fail to
/// deserialise and are rejected by axum before reaching the store.
#[derive(Debug, Deserialize)]
pub struct ScoreBody {
  pub home_score: u32,
  pub away_score: u32,
}

impl From<ScoreBody> for Score {
  fn from(b: ScoreBody) -> Self { Score::new(b.home_score, b.away_score) }
}

/// `PUT /matches/:id/score`
pub async fn record<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ScoreBody>,
) -> Result<Json<ScoreEntry>, ApiError>
where
  S: LeagueStore,
{
  let entry = record_score(state.store.as_ref(), state.policy, id, body.into()).await?;
  Ok(Json(entry))
}

/// `POST /matches/:id/evaluate`
pub async fn evaluate<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ScoreReport>, ApiError>
where
  S: LeagueStore,
{
  let report = score_match(state.store.as_ref(), state.policy, id).await?;
  Ok(Json(report))
}
