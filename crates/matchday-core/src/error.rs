//! Error types for `matchday-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("tournament not found: {0}")]
  TournamentNotFound(Uuid),

  #[error("match not found: {0}")]
  MatchNotFound(Uuid),

  #[error("team not found: {0}")]
  TeamNotFound(Uuid),

  /// The match has no recorded score yet; predictions cannot be evaluated.
  #[error("match {0} is not finished")]
  MatchIncomplete(Uuid),

  /// Predictions are closed once a score has been recorded.
  #[error("match {0} is already finished")]
  MatchAlreadyFinished(Uuid),

  #[error("team {team_id} does not play in match {match_id}")]
  NotAMatchTeam { team_id: Uuid, match_id: Uuid },

  #[error("a match needs two different teams, got {0} twice")]
  SameTeam(Uuid),

  #[error("team {team_id} is not a participant of tournament {tournament_id}")]
  TeamNotParticipant { team_id: Uuid, tournament_id: Uuid },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error. Used as `.map_err(Error::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
