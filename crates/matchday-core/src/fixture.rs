//! Matches and their recorded scores.
//!
//! A match is *finished* exactly when it carries a [`Score`]. The two score
//! columns are nullable together in storage; here that pairing is a single
//! `Option<Score>` so a half-entered result cannot be represented.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Goals scored by the home and away side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
  pub home: u32,
  pub away: u32,
}

impl Score {
  pub fn new(home: u32, away: u32) -> Self { Self { home, away } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
  pub match_id:      Uuid,
  pub tournament_id: Uuid,
  pub home_team_id:  Uuid,
  pub away_team_id:  Uuid,
  pub scheduled_at:  DateTime<Utc>,
  pub score:         Option<Score>,
}

impl Match {
  pub fn is_finished(&self) -> bool { self.score.is_some() }

  /// Whether `team_id` is the home or away side of this match.
  pub fn involves(&self, team_id: Uuid) -> bool {
    self.home_team_id == team_id || self.away_team_id == team_id
  }

  /// The result of a finished match, or `None` while it is unplayed.
  pub fn outcome(&self) -> Option<Outcome> {
    let score = self.score?;
    Some(match score.home.cmp(&score.away) {
      Ordering::Greater => Outcome::HomeWin(self.home_team_id),
      Ordering::Less => Outcome::AwayWin(self.away_team_id),
      Ordering::Equal => Outcome::Draw,
    })
  }
}

/// Input for scheduling a match. Validated by the store on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
  pub tournament_id: Uuid,
  pub home_team_id:  Uuid,
  pub away_team_id:  Uuid,
  pub scheduled_at:  DateTime<Utc>,
}

/// Result of a finished match from the point of view of the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  HomeWin(Uuid),
  AwayWin(Uuid),
  Draw,
}

impl Outcome {
  pub fn winner(self) -> Option<Uuid> {
    match self {
      Self::HomeWin(team) | Self::AwayWin(team) => Some(team),
      Self::Draw => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixture(score: Option<Score>) -> Match {
    Match {
      match_id: Uuid::new_v4(),
      tournament_id: Uuid::new_v4(),
      home_team_id: Uuid::new_v4(),
      away_team_id: Uuid::new_v4(),
      scheduled_at: Utc::now(),
      score,
    }
  }

  #[test]
  fn unplayed_match_has_no_outcome() {
    let m = fixture(None);
    assert!(!m.is_finished());
    assert_eq!(m.outcome(), None);
  }

  #[test]
  fn outcome_follows_score() {
    let home = fixture(Some(Score::new(3, 1)));
    assert_eq!(home.outcome(), Some(Outcome::HomeWin(home.home_team_id)));

    let away = fixture(Some(Score::new(0, 2)));
    assert_eq!(away.outcome(), Some(Outcome::AwayWin(away.away_team_id)));

    let draw = fixture(Some(Score::new(1, 1)));
    assert_eq!(draw.outcome(), Some(Outcome::Draw));
    assert_eq!(Outcome::Draw.winner(), None);
  }

  #[test]
  fn involves_only_the_two_sides() {
    let m = fixture(None);
    assert!(m.involves(m.home_team_id));
    assert!(m.involves(m.away_team_id));
    assert!(!m.involves(Uuid::new_v4()));
  }
}
