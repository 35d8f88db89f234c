//! End-of-tournament winner assignment.
//!
//! Run periodically. Every tournament whose end date has passed and which
//! still has no winner gets the top row of its standings as champion,
//! provided at least one match was actually played. Tournaments are handled
//! one at a time and a failure on one is recorded without stopping the rest.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  standings::{StandingsRow, standings_for},
  store::LeagueStore,
  tournament::Tournament,
};

/// What the standings say about a tournament's champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerDecision {
  Winner(Uuid),
  NoParticipants,
  /// The leader has not played a single finished match.
  NoMatchesPlayed,
}

/// Decide the champion from an already ranked table.
pub fn select_winner(rows: &[StandingsRow]) -> WinnerDecision {
  match rows.first() {
    None => WinnerDecision::NoParticipants,
    Some(top) if top.played == 0 => WinnerDecision::NoMatchesPlayed,
    Some(top) => WinnerDecision::Winner(top.team_id),
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItemError {
  pub tournament_id: Uuid,
  pub message:       String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WinnerReport {
  pub updated: usize,
  pub skipped: usize,
  pub errors:  Vec<BatchItemError>,
}

enum Assignment {
  Assigned(Uuid),
  Skipped(&'static str),
}

async fn assign_one<S>(store: &S, tournament: &Tournament) -> Result<Assignment>
where
  S: LeagueStore,
{
  let rows = standings_for(store, tournament).await?;
  let team_id = match select_winner(&rows) {
    WinnerDecision::Winner(team_id) => team_id,
    WinnerDecision::NoParticipants => return Ok(Assignment::Skipped("no participants")),
    WinnerDecision::NoMatchesPlayed => return Ok(Assignment::Skipped("no matches played")),
  };

  let written = store
    .set_winner(tournament.tournament_id, team_id)
    .await
    .map_err(Error::store)?;
  if written {
    Ok(Assignment::Assigned(team_id))
  } else {
    Ok(Assignment::Skipped("winner already set"))
  }
}

/// Assign winners to every tournament that ended before `today`.
///
/// Only fails if the list of pending tournaments cannot be read. Errors on
/// individual tournaments end up in [`WinnerReport::errors`].
pub async fn assign_pending_winners<S>(store: &S, today: NaiveDate) -> Result<WinnerReport>
where
  S: LeagueStore,
{
  let pending = store
    .list_pending_tournaments(today)
    .await
    .map_err(Error::store)?;
  tracing::info!(count = pending.len(), %today, "checking finished tournaments");

  let mut report = WinnerReport::default();
  for tournament in pending.iter().filter(|t| t.awaits_winner(today)) {
    let id = tournament.tournament_id;
    match assign_one(store, tournament).await {
      Ok(Assignment::Assigned(team_id)) => {
        tracing::info!(tournament_id = %id, name = %tournament.name, %team_id, "winner assigned");
        report.updated += 1;
      }
      Ok(Assignment::Skipped(reason)) => {
        tracing::warn!(tournament_id = %id, name = %tournament.name, reason, "no winner assignable");
        report.skipped += 1;
      }
      Err(e) => {
        tracing::error!(tournament_id = %id, name = %tournament.name, error = %e, "failed to assign winner");
        report.errors.push(BatchItemError { tournament_id: id, message: e.to_string() });
      }
    }
  }

  tracing::info!(
    updated = report.updated,
    skipped = report.skipped,
    errors = report.errors.len(),
    "winner assignment finished"
  );
  Ok(report)
}
