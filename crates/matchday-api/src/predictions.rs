//! Handler for `PUT /predictions`.
//!
//! Body: `{"user_id": ..., "match_id": ..., "predicted_winner_id": ...}`.
//! Submitting again for the same user and match replaces the earlier guess.

use axum::{
  Json,
  extract::State,
};
use matchday_core::{
  prediction::{NewPrediction, Prediction, submit_prediction},
  store::LeagueStore,
};

use crate::{ApiState, error::ApiError};

pub async fn submit<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewPrediction>,
) -> Result<Json<Prediction>, ApiError>
where
  S: LeagueStore,
{
  let prediction = submit_prediction(state.store.as_ref(), body).await?;
  Ok(Json(prediction))
}
