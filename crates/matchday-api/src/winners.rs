//! Handler for `POST /winners/assign`.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use matchday_core::{
  store::LeagueStore,
  winners::{WinnerReport, assign_pending_winners},
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct AssignParams {
  /// Reference date; defaults to today (UTC).
  pub today: Option<NaiveDate>,
}

/// `POST /winners/assign[?today=YYYY-MM-DD]`
pub async fn assign<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<AssignParams>,
) -> Result<Json<WinnerReport>, ApiError>
where
  S: LeagueStore,
{
  let today = params.today.unwrap_or_else(|| Utc::now().date_naive());
  let report = assign_pending_winners(state.store.as_ref(), today).await?;
  Ok(Json(report))
}
