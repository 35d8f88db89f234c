//! The league table.
//!
//! Standings are never stored. Every call folds the tournament's finished
//! matches into one row per participant and sorts the rows with
//! [`rank_cmp`]; the winner job uses the very same function.

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  fixture::Match,
  store::LeagueStore,
  tournament::{Team, Tournament},
};

const POINTS_PER_WIN: u32 = 3;
const POINTS_PER_DRAW: u32 = 1;

/// One participant's line in the table. Field names are part of the JSON
/// contract with the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
  pub team_id:         Uuid,
  pub team_name:       String,
  pub team_logo:       Option<String>,
  pub played:          u32,
  pub wins:            u32,
  pub draws:           u32,
  pub losses:          u32,
  pub goals_for:       u32,
  pub goals_against:   u32,
  pub goal_difference: i64,
  pub points:          u32,
}

impl StandingsRow {
  fn empty(team: &Team) -> Self {
    Self {
      team_id:         team.team_id,
      team_name:       team.name.clone(),
      team_logo:       team.logo.clone(),
      played:          0,
      wins:            0,
      draws:           0,
      losses:          0,
      goals_for:       0,
      goals_against:   0,
      goal_difference: 0,
      points:          0,
    }
  }

  /// Fold one side of a finished match into the row.
  fn record(&mut self, scored: u32, conceded: u32) {
    self.played += 1;
    self.goals_for += scored;
    self.goals_against += conceded;
    match scored.cmp(&conceded) {
      Ordering::Greater => {
        self.wins += 1;
        self.points += POINTS_PER_WIN;
      }
      Ordering::Equal => {
        self.draws += 1;
        self.points += POINTS_PER_DRAW;
      }
      Ordering::Less => self.losses += 1,
    }
  }
}

/// Table order: points, goal difference and goals scored, all descending,
/// then team name ascending by plain byte comparison. Team id breaks any tie
/// left after the name so the order is total.
pub fn rank_cmp(a: &StandingsRow, b: &StandingsRow) -> Ordering {
  b.points
    .cmp(&a.points)
    .then_with(|| b.goal_difference.cmp(&a.goal_difference))
    .then_with(|| b.goals_for.cmp(&a.goals_for))
    .then_with(|| a.team_name.cmp(&b.team_name))
    .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Build the ordered table for `participants` from `matches`.
///
/// Unfinished matches are ignored. A match side whose team is not among the
/// participants is skipped with a warning; the rest of the table is still
/// produced.
pub fn aggregate(participants: &[Team], matches: &[Match]) -> Vec<StandingsRow> {
  let mut rows: Vec<StandingsRow> = Vec::with_capacity(participants.len());
  let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(participants.len());
  for team in participants {
    if !index.contains_key(&team.team_id) {
      index.insert(team.team_id, rows.len());
      rows.push(StandingsRow::empty(team));
    }
  }

  for m in matches {
    let Some(score) = m.score else { continue };
    let sides = [
      (m.home_team_id, score.home, score.away),
      (m.away_team_id, score.away, score.home),
    ];
    for (team_id, scored, conceded) in sides {
      match index.get(&team_id) {
        Some(&i) => rows[i].record(scored, conceded),
        None => tracing::warn!(
          match_id = %m.match_id,
          tournament_id = %m.tournament_id,
          %team_id,
          "match references a team outside the participant list; ignoring"
        ),
      }
    }
  }

  for row in &mut rows {
    row.goal_difference = i64::from(row.goals_for) - i64::from(row.goals_against);
  }
  rows.sort_by(rank_cmp);
  rows
}

/// Load a tournament's participants and matches and aggregate them.
pub(crate) async fn standings_for<S>(store: &S, tournament: &Tournament) -> Result<Vec<StandingsRow>>
where
  S: LeagueStore,
{
  let participants = store
    .list_participants(tournament.tournament_id)
    .await
    .map_err(Error::store)?;
  let matches = store
    .list_matches(tournament.tournament_id)
    .await
    .map_err(Error::store)?;
  Ok(aggregate(&participants, &matches))
}

/// Current standings of a tournament, computed from its recorded matches.
pub async fn compute_standings<S>(store: &S, tournament_id: Uuid) -> Result<Vec<StandingsRow>>
where
  S: LeagueStore,
{
  let tournament = store
    .get_tournament(tournament_id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::TournamentNotFound(tournament_id))?;
  standings_for(store, &tournament).await
}
