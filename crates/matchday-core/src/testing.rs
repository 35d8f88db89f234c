//! In-memory [`LeagueStore`] for unit tests.

use std::{
  collections::HashSet,
  sync::{Mutex, MutexGuard},
};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
  fixture::{Match, NewMatch, Score},
  prediction::{Award, NewPrediction, Prediction},
  store::LeagueStore,
  tournament::{NewTeam, NewTournament, Team, Tournament},
};

#[derive(Debug, Error)]
#[error("memory store: {0}")]
pub struct MemoryError(String);

#[derive(Default)]
struct Inner {
  teams:        Vec<Team>,
  tournaments:  Vec<Tournament>,
  participants: Vec<(Uuid, Uuid)>,
  matches:      Vec<Match>,
  predictions:  Vec<Prediction>,
  failing:      HashSet<Uuid>,
  correction:   Option<(Uuid, Score)>,
}

#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  fn lock(&self) -> MutexGuard<'_, Inner> { self.inner.lock().unwrap() }

  /// A store holding one finished-in-the-past tournament with `names` as
  /// participants.
  pub fn with_league(names: &[&str]) -> (Self, Uuid) {
    let store = Self::default();
    let teams: Vec<Uuid> = names.iter().map(|n| store.create_team(n)).collect();
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let league = store.create_tournament("League", end, &teams);
    (store, league)
  }

  pub fn create_team(&self, name: &str) -> Uuid {
    let team = Team { team_id: Uuid::new_v4(), name: name.into(), logo: None };
    let id = team.team_id;
    self.lock().teams.push(team);
    id
  }

  pub fn create_tournament(&self, name: &str, end: NaiveDate, teams: &[Uuid]) -> Uuid {
    let tournament = Tournament {
      tournament_id:     Uuid::new_v4(),
      name:              name.into(),
      description:       None,
      start_date:        end,
      end_date:          end,
      registration_open: false,
      winner_id:         None,
      created_at:        Utc::now(),
    };
    let id = tournament.tournament_id;
    let mut inner = self.lock();
    inner.tournaments.push(tournament);
    inner.participants.extend(teams.iter().map(|&t| (id, t)));
    id
  }

  /// The `i`-th team created in this store.
  pub fn team(&self, i: usize) -> Uuid { self.lock().teams[i].team_id }

  pub fn tournament(&self, id: Uuid) -> Tournament {
    self
      .lock()
      .tournaments
      .iter()
      .find(|t| t.tournament_id == id)
      .cloned()
      .unwrap()
  }

  pub fn prediction(&self, id: Uuid) -> Prediction {
    self
      .lock()
      .predictions
      .iter()
      .find(|p| p.prediction_id == id)
      .cloned()
      .unwrap()
  }

  pub fn play_between(&self, tournament: Uuid, home: Uuid, away: Uuid, h: u32, a: u32) -> Match {
    let mut m = self.schedule_between(tournament, home, away);
    m.score = Some(Score::new(h, a));
    let mut inner = self.lock();
    if let Some(stored) = inner.matches.iter_mut().find(|s| s.match_id == m.match_id) {
      stored.score = m.score;
    }
    m
  }

  pub fn schedule_between(&self, tournament: Uuid, home: Uuid, away: Uuid) -> Match {
    let m = Match {
      match_id:      Uuid::new_v4(),
      tournament_id: tournament,
      home_team_id:  home,
      away_team_id:  away,
      scheduled_at:  Utc::now(),
      score:         None,
    };
    self.lock().matches.push(m.clone());
    m
  }

  pub fn schedule(&self, tournament: Uuid, home: usize, away: usize) -> Match {
    self.schedule_between(tournament, self.team(home), self.team(away))
  }

  pub fn play(&self, tournament: Uuid, home: usize, away: usize, h: u32, a: u32) -> Match {
    self.play_between(tournament, self.team(home), self.team(away), h, a)
  }

  /// Insert a prediction as-is, whatever the state of its match.
  pub fn seed_prediction(&self, user_id: Uuid, match_id: Uuid, winner: Uuid) -> Uuid {
    let now = Utc::now();
    let p = Prediction {
      prediction_id:       Uuid::new_v4(),
      user_id,
      match_id,
      predicted_winner_id: winner,
      points_awarded:      0,
      created_at:          now,
      updated_at:          now,
    };
    let id = p.prediction_id;
    self.lock().predictions.push(p);
    id
  }

  /// Commit `score` for `match_id` during the next prediction listing, as a
  /// concurrent correction landing mid-scoring would.
  pub fn correct_score_while_listing(&self, match_id: Uuid, score: Score) {
    self.lock().correction = Some((match_id, score));
  }

  /// Make every participant/match read for `tournament` fail.
  pub fn fail_reads_for(&self, tournament: Uuid) { self.lock().failing.insert(tournament); }

  fn check(&self, tournament: Uuid) -> Result<(), MemoryError> {
    if self.lock().failing.contains(&tournament) {
      Err(MemoryError(format!("tournament {tournament} is unreadable")))
    } else {
      Ok(())
    }
  }
}

impl LeagueStore for MemoryStore {
  type Error = MemoryError;

  async fn add_team(&self, input: NewTeam) -> Result<Team, MemoryError> {
    let team = Team { team_id: Uuid::new_v4(), name: input.name, logo: input.logo };
    self.lock().teams.push(team.clone());
    Ok(team)
  }

  async fn add_tournament(&self, input: NewTournament) -> Result<Tournament, MemoryError> {
    let id = self.create_tournament(&input.name, input.end_date, &input.participant_ids);
    Ok(self.tournament(id))
  }

  async fn get_tournament(&self, id: Uuid) -> Result<Option<Tournament>, MemoryError> {
    Ok(self.lock().tournaments.iter().find(|t| t.tournament_id == id).cloned())
  }

  async fn list_participants(&self, tournament_id: Uuid) -> Result<Vec<Team>, MemoryError> {
    self.check(tournament_id)?;
    let inner = self.lock();
    Ok(
      inner
        .participants
        .iter()
        .filter(|(t, _)| *t == tournament_id)
        .filter_map(|(_, team)| inner.teams.iter().find(|x| x.team_id == *team).cloned())
        .collect(),
    )
  }

  async fn list_pending_tournaments(&self, today: NaiveDate) -> Result<Vec<Tournament>, MemoryError> {
    Ok(
      self
        .lock()
        .tournaments
        .iter()
        .filter(|t| t.awaits_winner(today))
        .cloned()
        .collect(),
    )
  }

  async fn set_winner(&self, tournament_id: Uuid, team_id: Uuid) -> Result<bool, MemoryError> {
    let mut inner = self.lock();
    if !inner.participants.contains(&(tournament_id, team_id)) {
      return Ok(false);
    }
    match inner.tournaments.iter_mut().find(|t| t.tournament_id == tournament_id) {
      Some(t) if t.winner_id.is_none() => {
        t.winner_id = Some(team_id);
        Ok(true)
      }
      _ => Ok(false),
    }
  }

  async fn add_match(&self, input: NewMatch) -> Result<Match, MemoryError> {
    Ok(self.schedule_between(input.tournament_id, input.home_team_id, input.away_team_id))
  }

  async fn get_match(&self, id: Uuid) -> Result<Option<Match>, MemoryError> {
    Ok(self.lock().matches.iter().find(|m| m.match_id == id).cloned())
  }

  async fn list_matches(&self, tournament_id: Uuid) -> Result<Vec<Match>, MemoryError> {
    self.check(tournament_id)?;
    Ok(
      self
        .lock()
        .matches
        .iter()
        .filter(|m| m.tournament_id == tournament_id)
        .cloned()
        .collect(),
    )
  }

  async fn record_score(&self, match_id: Uuid, score: Score) -> Result<Option<Match>, MemoryError> {
    let mut inner = self.lock();
    Ok(inner.matches.iter_mut().find(|m| m.match_id == match_id).map(|m| {
      m.score = Some(score);
      m.clone()
    }))
  }

  async fn upsert_prediction(&self, input: NewPrediction) -> Result<Option<Prediction>, MemoryError> {
    let now = Utc::now();
    let mut inner = self.lock();
    let open = inner
      .matches
      .iter()
      .any(|m| m.match_id == input.match_id && m.score.is_none());
    if !open {
      return Ok(None);
    }
    if let Some(p) = inner
      .predictions
      .iter_mut()
      .find(|p| p.user_id == input.user_id && p.match_id == input.match_id)
    {
      p.predicted_winner_id = input.predicted_winner_id;
      p.points_awarded = 0;
      p.updated_at = now;
      return Ok(Some(p.clone()));
    }
    let p = Prediction {
      prediction_id:       Uuid::new_v4(),
      user_id:             input.user_id,
      match_id:            input.match_id,
      predicted_winner_id: input.predicted_winner_id,
      points_awarded:      0,
      created_at:          now,
      updated_at:          now,
    };
    inner.predictions.push(p.clone());
    Ok(Some(p))
  }

  async fn list_predictions(&self, match_id: Uuid) -> Result<Vec<Prediction>, MemoryError> {
    let mut inner = self.lock();
    if let Some((id, score)) = inner.correction.take_if(|(id, _)| *id == match_id)
      && let Some(m) = inner.matches.iter_mut().find(|m| m.match_id == id)
    {
      m.score = Some(score);
    }
    Ok(
      inner
        .predictions
        .iter()
        .filter(|p| p.match_id == match_id)
        .cloned()
        .collect(),
    )
  }

  async fn list_tournament_predictions(&self, tournament_id: Uuid) -> Result<Vec<Prediction>, MemoryError> {
    let inner = self.lock();
    Ok(
      inner
        .predictions
        .iter()
        .filter(|p| {
          inner
            .matches
            .iter()
            .any(|m| m.match_id == p.match_id && m.tournament_id == tournament_id)
        })
        .cloned()
        .collect(),
    )
  }

  async fn apply_awards(
    &self,
    match_id: Uuid,
    scored: Score,
    awards: Vec<Award>,
  ) -> Result<Option<usize>, MemoryError> {
    let mut inner = self.lock();
    let current = inner.matches.iter().find(|m| m.match_id == match_id).and_then(|m| m.score);
    if current != Some(scored) {
      return Ok(None);
    }
    let mut updated = 0;
    for award in awards {
      if let Some(p) = inner
        .predictions
        .iter_mut()
        .find(|p| p.prediction_id == award.prediction_id && p.match_id == match_id)
      {
        p.points_awarded = award.points;
        updated += 1;
      }
    }
    Ok(Some(updated))
  }
}
