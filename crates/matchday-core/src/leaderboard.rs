//! Per-user prediction totals for a tournament.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, prediction::Prediction, store::LeagueStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
  pub user_id:      Uuid,
  pub total_points: i64,
  pub predictions:  u32,
  /// Predictions that earned a positive award.
  pub correct:      u32,
}

/// Sum awarded points per user, highest total first. Users with equal
/// totals are ordered by id.
pub fn tally(predictions: &[Prediction]) -> Vec<LeaderboardEntry> {
  let mut by_user: BTreeMap<Uuid, LeaderboardEntry> = BTreeMap::new();
  for p in predictions {
    let entry = by_user.entry(p.user_id).or_insert(LeaderboardEntry {
      user_id:      p.user_id,
      total_points: 0,
      predictions:  0,
      correct:      0,
    });
    entry.total_points += i64::from(p.points_awarded);
    entry.predictions += 1;
    if p.points_awarded > 0 {
      entry.correct += 1;
    }
  }

  let mut entries: Vec<LeaderboardEntry> = by_user.into_values().collect();
  entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
  entries
}

/// Per-user point totals over every prediction in a tournament.
pub async fn prediction_leaderboard<S>(
  store: &S,
  tournament_id: Uuid,
) -> Result<Vec<LeaderboardEntry>>
where
  S: LeagueStore,
{
  store
    .get_tournament(tournament_id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::TournamentNotFound(tournament_id))?;
  let predictions = store
    .list_tournament_predictions(tournament_id)
    .await
    .map_err(Error::store)?;
  Ok(tally(&predictions))
}
