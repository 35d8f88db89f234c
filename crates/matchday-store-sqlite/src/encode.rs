//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar dates are `YYYY-MM-DD` (so text
//! comparison matches date order), UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use matchday_core::{
  fixture::{Match, Score},
  prediction::Prediction,
  tournament::{Team, Tournament},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const TEAM_COLUMNS: &str = "t.team_id, t.name, t.logo";

/// Raw values read from a `teams` row.
pub struct RawTeam {
  pub team_id: String,
  pub name:    String,
  pub logo:    Option<String>,
}

impl RawTeam {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { team_id: row.get(0)?, name: row.get(1)?, logo: row.get(2)? })
  }

  pub fn into_team(self) -> Result<Team> {
    Ok(Team { team_id: decode_uuid(&self.team_id)?, name: self.name, logo: self.logo })
  }
}

pub const TOURNAMENT_COLUMNS: &str = "tournament_id, name, description, start_date, end_date, \
                                      registration_open, winner_id, created_at";

/// Raw values read from a `tournaments` row.
pub struct RawTournament {
  pub tournament_id:     String,
  pub name:              String,
  pub description:       Option<String>,
  pub start_date:        String,
  pub end_date:          String,
  pub registration_open: bool,
  pub winner_id:         Option<String>,
  pub created_at:        String,
}

impl RawTournament {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      tournament_id:     row.get(0)?,
      name:              row.get(1)?,
      description:       row.get(2)?,
      start_date:        row.get(3)?,
      end_date:          row.get(4)?,
      registration_open: row.get(5)?,
      winner_id:         row.get(6)?,
      created_at:        row.get(7)?,
    })
  }

  pub fn into_tournament(self) -> Result<Tournament> {
    Ok(Tournament {
      tournament_id:     decode_uuid(&self.tournament_id)?,
      name:              self.name,
      description:       self.description,
      start_date:        decode_date(&self.start_date)?,
      end_date:          decode_date(&self.end_date)?,
      registration_open: self.registration_open,
      winner_id:         self.winner_id.as_deref().map(decode_uuid).transpose()?,
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}

pub const MATCH_COLUMNS: &str = "match_id, tournament_id, home_team_id, away_team_id, \
                                 scheduled_at, home_score, away_score";

/// Raw values read from a `matches` row.
pub struct RawMatch {
  pub match_id:      String,
  pub tournament_id: String,
  pub home_team_id:  String,
  pub away_team_id:  String,
  pub scheduled_at:  String,
  pub home_score:    Option<u32>,
  pub away_score:    Option<u32>,
}

impl RawMatch {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      match_id:      row.get(0)?,
      tournament_id: row.get(1)?,
      home_team_id:  row.get(2)?,
      away_team_id:  row.get(3)?,
      scheduled_at:  row.get(4)?,
      home_score:    row.get(5)?,
      away_score:    row.get(6)?,
    })
  }

  pub fn into_match(self) -> Result<Match> {
    // The CHECK constraint keeps the pair together; a lone score is treated
    // as unplayed.
    let score = match (self.home_score, self.away_score) {
      (Some(home), Some(away)) => Some(Score { home, away }),
      _ => None,
    };
    Ok(Match {
      match_id: decode_uuid(&self.match_id)?,
      tournament_id: decode_uuid(&self.tournament_id)?,
      home_team_id: decode_uuid(&self.home_team_id)?,
      away_team_id: decode_uuid(&self.away_team_id)?,
      scheduled_at: decode_dt(&self.scheduled_at)?,
      score,
    })
  }
}

pub const PREDICTION_COLUMNS: &str = "p.prediction_id, p.user_id, p.match_id, \
                                      p.predicted_winner_id, p.points_awarded, \
                                      p.created_at, p.updated_at";

/// Raw values read from a `predictions` row.
pub struct RawPrediction {
  pub prediction_id:       String,
  pub user_id:             String,
  pub match_id:            String,
  pub predicted_winner_id: String,
  pub points_awarded:      i32,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawPrediction {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      prediction_id:       row.get(0)?,
      user_id:             row.get(1)?,
      match_id:            row.get(2)?,
      predicted_winner_id: row.get(3)?,
      points_awarded:      row.get(4)?,
      created_at:          row.get(5)?,
      updated_at:          row.get(6)?,
    })
  }

  pub fn into_prediction(self) -> Result<Prediction> {
    Ok(Prediction {
      prediction_id:       decode_uuid(&self.prediction_id)?,
      user_id:             decode_uuid(&self.user_id)?,
      match_id:            decode_uuid(&self.match_id)?,
      predicted_winner_id: decode_uuid(&self.predicted_winner_id)?,
      points_awarded:      self.points_awarded,
      created_at:          decode_dt(&self.created_at)?,
      updated_at:          decode_dt(&self.updated_at)?,
    })
  }
}
