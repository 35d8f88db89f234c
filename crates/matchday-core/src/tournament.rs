//! Teams and tournaments.
//!
//! Both are owned by the wider platform; the pipeline only reads them, with
//! one exception: a tournament's `winner_id` is written once by the winner
//! job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Team ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
  pub team_id: Uuid,
  /// Display name; unique across the platform.
  pub name:    String,
  /// URL of the team's logo, if one was uploaded.
  pub logo:    Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
  pub name: String,
  #[serde(default)]
  pub logo: Option<String>,
}

impl NewTeam {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), logo: None }
  }
}

// ─── Tournament ──────────────────────────────────────────────────────────────

/// A round-robin competition between a fixed set of participant teams.
///
/// Invariant: `winner_id`, when set, names one of the participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
  pub tournament_id:     Uuid,
  pub name:              String,
  pub description:       Option<String>,
  pub start_date:        NaiveDate,
  pub end_date:          NaiveDate,
  pub registration_open: bool,
  pub winner_id:         Option<Uuid>,
  pub created_at:        DateTime<Utc>,
}

impl Tournament {
  /// Whether the winner job should look at this tournament on `today`.
  pub fn awaits_winner(&self, today: NaiveDate) -> bool {
    self.winner_id.is_none() && self.end_date < today
  }
}

/// Input for creating a tournament together with its participant set.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTournament {
  pub name:              String,
  #[serde(default)]
  pub description:       Option<String>,
  pub start_date:        NaiveDate,
  pub end_date:          NaiveDate,
  #[serde(default = "default_registration_open")]
  pub registration_open: bool,
  #[serde(default)]
  pub participant_ids:   Vec<Uuid>,
}

fn default_registration_open() -> bool { true }

impl NewTournament {
  pub fn new(
    name: impl Into<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    participant_ids: Vec<Uuid>,
  ) -> Self {
    Self {
      name: name.into(),
      description: None,
      start_date,
      end_date,
      registration_open: true,
      participant_ids,
    }
  }
}
