//! The `LeagueStore` trait.
//!
//! Implemented by storage backends (e.g. `matchday-store-sqlite`). The
//! pipeline operations in this crate are generic over it, so they can run
//! against any backend and against in-memory fakes in tests.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  fixture::{Match, NewMatch, Score},
  prediction::{Award, NewPrediction, Prediction},
  tournament::{NewTeam, NewTournament, Team, Tournament},
};

/// Abstraction over the persisted teams, tournaments, matches and
/// predictions.
///
/// Writes that the pipeline depends on for consistency are atomic and
/// conditional: [`apply_awards`](Self::apply_awards) commits every award for
/// a match or none of them, and only against the score they were computed
/// from; [`upsert_prediction`](Self::upsert_prediction) only writes while the
/// match is unplayed; [`set_winner`](Self::set_winner) only writes when no
/// winner is set.
pub trait LeagueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Teams and tournaments ─────────────────────────────────────────────

  fn add_team(
    &self,
    input: NewTeam,
  ) -> impl Future<Output = Result<Team, Self::Error>> + Send + '_;

  /// Create a tournament and its participant set.
  fn add_tournament(
    &self,
    input: NewTournament,
  ) -> impl Future<Output = Result<Tournament, Self::Error>> + Send + '_;

  /// Retrieve a tournament by UUID. Returns `None` if not found.
  fn get_tournament(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Tournament>, Self::Error>> + Send + '_;

  /// All participant teams of a tournament, in no particular order.
  fn list_participants(
    &self,
    tournament_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Team>, Self::Error>> + Send + '_;

  /// Tournaments that ended strictly before `today` and have no winner.
  fn list_pending_tournaments(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Tournament>, Self::Error>> + Send + '_;

  /// Set the winner of a tournament if it has none yet.
  ///
  /// Returns `false` without writing when a winner is already set or when
  /// `team_id` is not a participant. A winner is never cleared or replaced.
  fn set_winner(
    &self,
    tournament_id: Uuid,
    team_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Matches ───────────────────────────────────────────────────────────

  /// Schedule a match. Both teams must differ and be participants.
  fn add_match(
    &self,
    input: NewMatch,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;

  fn get_match(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Match>, Self::Error>> + Send + '_;

  fn list_matches(
    &self,
    tournament_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Match>, Self::Error>> + Send + '_;

  /// Write (or overwrite) the score of a match. Returns the updated match,
  /// or `None` if it does not exist.
  fn record_score(
    &self,
    match_id: Uuid,
    score: Score,
  ) -> impl Future<Output = Result<Option<Match>, Self::Error>> + Send + '_;

  // ── Predictions ───────────────────────────────────────────────────────

  /// Insert a prediction, or overwrite the existing one for the same
  /// `(user_id, match_id)` pair. An overwrite resets `points_awarded`.
  ///
  /// The write only happens while the match is still unplayed, checked in
  /// the same atomic step. Returns `None` without writing once the match has
  /// a score (or does not exist).
  fn upsert_prediction(
    &self,
    input: NewPrediction,
  ) -> impl Future<Output = Result<Option<Prediction>, Self::Error>> + Send + '_;

  fn list_predictions(
    &self,
    match_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Prediction>, Self::Error>> + Send + '_;

  /// Every prediction on any match of the tournament.
  fn list_tournament_predictions(
    &self,
    tournament_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Prediction>, Self::Error>> + Send + '_;

  /// Overwrite `points_awarded` for the given predictions of one match in a
  /// single transaction, provided the match's committed score still equals
  /// `scored`, the score the awards were computed from.
  ///
  /// Returns the number of rows updated, or `None` without writing when the
  /// committed score has changed in the meantime.
  fn apply_awards(
    &self,
    match_id: Uuid,
    scored: Score,
    awards: Vec<Award>,
  ) -> impl Future<Output = Result<Option<usize>, Self::Error>> + Send + '_;
}
