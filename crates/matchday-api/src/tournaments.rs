//! Handlers for `/tournaments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tournaments/:id/standings` | Ordered league table |
//! | `GET`  | `/tournaments/:id/leaderboard` | Prediction totals per user |

use axum::{
  Json,
  extract::{Path, State},
};
use matchday_core::{
  leaderboard::{LeaderboardEntry, prediction_leaderboard},
  standings::{StandingsRow, compute_standings},
  store::LeagueStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// `GET /tournaments/:id/standings`
pub async fn standings<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<StandingsRow>>, ApiError>
where
  S: LeagueStore,
{
  let rows = compute_standings(state.store.as_ref(), id).await?;
  Ok(Json(rows))
}

/// `GET /tournaments/:id/leaderboard`
pub async fn leaderboard<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError>
where
  S: LeagueStore,
{
  let entries = prediction_leaderboard(state.store.as_ref(), id).await?;
  Ok(Json(entries))
}
