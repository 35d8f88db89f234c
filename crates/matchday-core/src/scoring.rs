//! Prediction scoring.
//!
//! Each time a match result is recorded or corrected, every prediction on
//! that match gets its `points_awarded` overwritten according to a
//! [`ScoringPolicy`]. Overwriting rather than adding makes re-scoring
//! idempotent.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  fixture::{Match, Outcome, Score},
  prediction::Award,
  store::LeagueStore,
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Points handed out per prediction for each kind of result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
  /// The predicted team won.
  pub correct:   i32,
  /// The predicted team lost.
  pub incorrect: i32,
  /// The match was drawn; nobody guessed right.
  pub draw:      i32,
}

impl ScoringPolicy {
  /// Ten points for a correct guess, nothing otherwise.
  pub const STANDARD: Self = Self { correct: 10, incorrect: 0, draw: 0 };

  /// Like [`STANDARD`](Self::STANDARD), but a wrong guess costs ten points.
  pub const WRONG_GUESS_PENALTY: Self = Self { correct: 10, incorrect: -10, draw: 0 };

  /// Points for a prediction of `predicted_winner` given the match outcome.
  pub fn award(&self, outcome: Outcome, predicted_winner: Uuid) -> i32 {
    match outcome.winner() {
      None => self.draw,
      Some(winner) if winner == predicted_winner => self.correct,
      Some(_) => self.incorrect,
    }
  }
}

impl Default for ScoringPolicy {
  fn default() -> Self { Self::STANDARD }
}

/// How wrong guesses are treated; the configurable face of
/// [`ScoringPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrongGuess {
  #[default]
  Zero,
  Penalty,
}

impl From<WrongGuess> for ScoringPolicy {
  fn from(w: WrongGuess) -> Self {
    match w {
      WrongGuess::Zero => Self::STANDARD,
      WrongGuess::Penalty => Self::WRONG_GUESS_PENALTY,
    }
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
  pub match_id:                 Uuid,
  pub updated_prediction_count: usize,
}

/// Re-score every prediction on a finished match.
///
/// Refuses with [`Error::MatchIncomplete`] while the match has no score, so
/// an early call can never zero out everyone's points. If the score is
/// corrected between reading it and writing the awards, the stale write is
/// refused by the store and the match is scored again against the score
/// that is now committed.
pub async fn score_match<S>(
  store: &S,
  policy: ScoringPolicy,
  match_id: Uuid,
) -> Result<ScoreReport>
where
  S: LeagueStore,
{
  loop {
    let fixture = store
      .get_match(match_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::MatchNotFound(match_id))?;
    let (Some(scored), Some(outcome)) = (fixture.score, fixture.outcome()) else {
      return Err(Error::MatchIncomplete(match_id));
    };

    let awards: Vec<Award> = store
      .list_predictions(match_id)
      .await
      .map_err(Error::store)?
      .iter()
      .map(|p| Award {
        prediction_id: p.prediction_id,
        points:        policy.award(outcome, p.predicted_winner_id),
      })
      .collect();

    match store
      .apply_awards(match_id, scored, awards)
      .await
      .map_err(Error::store)?
    {
      Some(updated) => {
        tracing::debug!(%match_id, ?outcome, updated, "scored predictions");
        return Ok(ScoreReport { match_id, updated_prediction_count: updated });
      }
      None => {
        tracing::debug!(%match_id, "score changed while scoring; retrying");
      }
    }
  }
}

/// A recorded score together with the re-scoring it triggered.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
  #[serde(rename = "match")]
  pub fixture:                  Match,
  pub updated_prediction_count: usize,
}

/// Record (or correct) a match score and re-score its predictions.
pub async fn record_score<S>(
  store: &S,
  policy: ScoringPolicy,
  match_id: Uuid,
  score: Score,
) -> Result<ScoreEntry>
where
  S: LeagueStore,
{
  let fixture = store
    .record_score(match_id, score)
    .await
    .map_err(Error::store)?
    .ok_or(Error::MatchNotFound(match_id))?;
  tracing::info!(%match_id, home = score.home, away = score.away, "recorded score");

  let report = score_match(store, policy, match_id).await?;
  Ok(ScoreEntry { fixture, updated_prediction_count: report.updated_prediction_count })
}
