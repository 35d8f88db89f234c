//! User predictions on match winners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, store::LeagueStore};

/// A user's guess at the winner of one match. There is at most one per
/// `(user_id, match_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
  pub prediction_id:       Uuid,
  pub user_id:             Uuid,
  pub match_id:            Uuid,
  pub predicted_winner_id: Uuid,
  /// Overwritten by the scorer each time the match result is recorded.
  pub points_awarded:      i32,
  pub created_at:          DateTime<Utc>,
  pub updated_at:          DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPrediction {
  pub user_id:             Uuid,
  pub match_id:            Uuid,
  pub predicted_winner_id: Uuid,
}

/// Points to write onto one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
  pub prediction_id: Uuid,
  pub points:        i32,
}

/// Record a user's prediction, replacing any earlier one for the same match.
///
/// Fails if the match is unknown or already finished, or if the predicted
/// winner does not play in it. The store re-checks that the match is
/// unplayed when writing, so a score recorded in between still closes it.
pub async fn submit_prediction<S>(store: &S, input: NewPrediction) -> Result<Prediction>
where
  S: LeagueStore,
{
  let fixture = store
    .get_match(input.match_id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::MatchNotFound(input.match_id))?;

  if fixture.is_finished() {
    return Err(Error::MatchAlreadyFinished(fixture.match_id));
  }
  if !fixture.involves(input.predicted_winner_id) {
    return Err(Error::NotAMatchTeam {
      team_id:  input.predicted_winner_id,
      match_id: fixture.match_id,
    });
  }

  let match_id = fixture.match_id;
  store
    .upsert_prediction(input)
    .await
    .map_err(Error::store)?
    .ok_or(Error::MatchAlreadyFinished(match_id))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{fixture::Score, testing::MemoryStore};

  #[tokio::test]
  async fn second_submission_replaces_the_first() {
    let (store, league) = MemoryStore::with_league(&["A", "B"]);
    let m = store.schedule(league, 0, 1);
    let user = Uuid::new_v4();

    let first = submit_prediction(&store, NewPrediction {
      user_id: user,
      match_id: m.match_id,
      predicted_winner_id: m.home_team_id,
    })
    .await
    .unwrap();
    let second = submit_prediction(&store, NewPrediction {
      user_id: user,
      match_id: m.match_id,
      predicted_winner_id: m.away_team_id,
    })
    .await
    .unwrap();

    assert_eq!(first.prediction_id, second.prediction_id);
    let stored = store.list_predictions(m.match_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].predicted_winner_id, m.away_team_id);
  }

  #[tokio::test]
  async fn rejects_team_outside_the_match() {
    let (store, league) = MemoryStore::with_league(&["A", "B", "C"]);
    let m = store.schedule(league, 0, 1);
    let outsider = store.team(2);

    let err = submit_prediction(&store, NewPrediction {
      user_id: Uuid::new_v4(),
      match_id: m.match_id,
      predicted_winner_id: outsider,
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::NotAMatchTeam { team_id, .. } if team_id == outsider));
  }

  #[tokio::test]
  async fn rejects_finished_match() {
    let (store, league) = MemoryStore::with_league(&["A", "B"]);
    let m = store.schedule(league, 0, 1);
    store.record_score(m.match_id, Score::new(1, 0)).await.unwrap();

    let err = submit_prediction(&store, NewPrediction {
      user_id: Uuid::new_v4(),
      match_id: m.match_id,
      predicted_winner_id: m.home_team_id,
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::MatchAlreadyFinished(id) if id == m.match_id));
  }

  #[tokio::test]
  async fn store_refuses_upsert_on_scored_match() {
    let (store, league) = MemoryStore::with_league(&["A", "B"]);
    let m = store.play(league, 0, 1, 2, 1);

    let written = store
      .upsert_prediction(NewPrediction {
        user_id:             Uuid::new_v4(),
        match_id:            m.match_id,
        predicted_winner_id: m.away_team_id,
      })
      .await
      .unwrap();
    assert!(written.is_none());
    assert!(store.list_predictions(m.match_id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unknown_match_is_not_found() {
    let store = MemoryStore::default();
    let err = submit_prediction(&store, NewPrediction {
      user_id: Uuid::new_v4(),
      match_id: Uuid::new_v4(),
      predicted_winner_id: Uuid::new_v4(),
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::MatchNotFound(_)));
  }
}
