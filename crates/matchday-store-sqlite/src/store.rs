//! [`SqliteStore`]: the SQLite implementation of [`LeagueStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use matchday_core::{
  fixture::{Match, NewMatch, Score},
  prediction::{Award, NewPrediction, Prediction},
  store::LeagueStore,
  tournament::{NewTeam, NewTournament, Team, Tournament},
};

use crate::{
  Error, Result,
  encode::{
    MATCH_COLUMNS, PREDICTION_COLUMNS, RawMatch, RawPrediction, RawTeam, RawTournament,
    TEAM_COLUMNS, TOURNAMENT_COLUMNS, encode_date, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A league store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened league store");
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Which of `team_ids` are participants of `tournament_id`.
  async fn participant_flags(&self, tournament_id: Uuid, team_ids: [Uuid; 2]) -> Result<[bool; 2]> {
    let t_str = encode_uuid(tournament_id);
    let ids = team_ids.map(encode_uuid);

    let flags = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT 1 FROM tournament_participants WHERE tournament_id = ?1 AND team_id = ?2",
        )?;
        let mut flags = [false; 2];
        for (flag, id) in flags.iter_mut().zip(ids.iter()) {
          *flag = stmt
            .query_row(rusqlite::params![t_str, id], |_| Ok(()))
            .optional()?
            .is_some();
        }
        Ok(flags)
      })
      .await?;
    Ok(flags)
  }
}

// ─── LeagueStore impl ────────────────────────────────────────────────────────

impl LeagueStore for SqliteStore {
  type Error = Error;

  // ── Teams and tournaments ─────────────────────────────────────────────────

  async fn add_team(&self, input: NewTeam) -> Result<Team> {
    let team = Team { team_id: Uuid::new_v4(), name: input.name, logo: input.logo };

    let id_str = encode_uuid(team.team_id);
    let name   = team.name.clone();
    let logo   = team.logo.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO teams (team_id, name, logo) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, logo],
        )?;
        Ok(())
      })
      .await?;

    Ok(team)
  }

  async fn add_tournament(&self, input: NewTournament) -> Result<Tournament> {
    let tournament = Tournament {
      tournament_id:     Uuid::new_v4(),
      name:              input.name,
      description:       input.description,
      start_date:        input.start_date,
      end_date:          input.end_date,
      registration_open: input.registration_open,
      winner_id:         None,
      created_at:        Utc::now(),
    };

    let id_str       = encode_uuid(tournament.tournament_id);
    let name         = tournament.name.clone();
    let description  = tournament.description.clone();
    let start_str    = encode_date(tournament.start_date);
    let end_str      = encode_date(tournament.end_date);
    let open         = tournament.registration_open;
    let at_str       = encode_dt(tournament.created_at);
    let participants: Vec<String> = input.participant_ids.into_iter().map(encode_uuid).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO tournaments (
             tournament_id, name, description, start_date, end_date,
             registration_open, winner_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7)",
          rusqlite::params![id_str, name, description, start_str, end_str, open, at_str],
        )?;
        {
          let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO tournament_participants (tournament_id, team_id)
             VALUES (?1, ?2)",
          )?;
          for team_id in &participants {
            stmt.execute(rusqlite::params![id_str, team_id])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(tournament)
  }

  async fn get_tournament(&self, id: Uuid) -> Result<Option<Tournament>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawTournament> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE tournament_id = ?1"),
            rusqlite::params![id_str],
            RawTournament::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawTournament::into_tournament).transpose()
  }

  async fn list_participants(&self, tournament_id: Uuid) -> Result<Vec<Team>> {
    let id_str = encode_uuid(tournament_id);

    let raws: Vec<RawTeam> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TEAM_COLUMNS}
           FROM teams t
           JOIN tournament_participants tp ON tp.team_id = t.team_id
           WHERE tp.tournament_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawTeam::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTeam::into_team).collect()
  }

  async fn list_pending_tournaments(&self, today: NaiveDate) -> Result<Vec<Tournament>> {
    let today_str = encode_date(today);

    let raws: Vec<RawTournament> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TOURNAMENT_COLUMNS}
           FROM tournaments
           WHERE end_date < ?1 AND winner_id IS NULL
           ORDER BY end_date, tournament_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![today_str], RawTournament::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTournament::into_tournament).collect()
  }

  async fn set_winner(&self, tournament_id: Uuid, team_id: Uuid) -> Result<bool> {
    let t_str    = encode_uuid(tournament_id);
    let team_str = encode_uuid(team_id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE tournaments SET winner_id = ?2
           WHERE tournament_id = ?1
             AND winner_id IS NULL
             AND EXISTS (
               SELECT 1 FROM tournament_participants
               WHERE tournament_id = ?1 AND team_id = ?2
             )",
          rusqlite::params![t_str, team_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  // ── Matches ───────────────────────────────────────────────────────────────

  async fn add_match(&self, input: NewMatch) -> Result<Match> {
    if input.home_team_id == input.away_team_id {
      return Err(matchday_core::Error::SameTeam(input.home_team_id).into());
    }
    let flags = self
      .participant_flags(input.tournament_id, [input.home_team_id, input.away_team_id])
      .await?;
    for (ok, team_id) in flags.into_iter().zip([input.home_team_id, input.away_team_id]) {
      if !ok {
        return Err(
          matchday_core::Error::TeamNotParticipant { team_id, tournament_id: input.tournament_id }
            .into(),
        );
      }
    }

    let fixture = Match {
      match_id:      Uuid::new_v4(),
      tournament_id: input.tournament_id,
      home_team_id:  input.home_team_id,
      away_team_id:  input.away_team_id,
      scheduled_at:  input.scheduled_at,
      score:         None,
    };

    let id_str   = encode_uuid(fixture.match_id);
    let t_str    = encode_uuid(fixture.tournament_id);
    let home_str = encode_uuid(fixture.home_team_id);
    let away_str = encode_uuid(fixture.away_team_id);
    let at_str   = encode_dt(fixture.scheduled_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO matches (match_id, tournament_id, home_team_id, away_team_id, scheduled_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, t_str, home_str, away_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(fixture)
  }

  async fn get_match(&self, id: Uuid) -> Result<Option<Match>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMatch> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE match_id = ?1"),
            rusqlite::params![id_str],
            RawMatch::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMatch::into_match).transpose()
  }

  async fn list_matches(&self, tournament_id: Uuid) -> Result<Vec<Match>> {
    let id_str = encode_uuid(tournament_id);

    let raws: Vec<RawMatch> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MATCH_COLUMNS} FROM matches
           WHERE tournament_id = ?1
           ORDER BY scheduled_at, match_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawMatch::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMatch::into_match).collect()
  }

  async fn record_score(&self, match_id: Uuid, score: Score) -> Result<Option<Match>> {
    let id_str = encode_uuid(match_id);

    let raw: Option<RawMatch> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE matches SET home_score = ?2, away_score = ?3 WHERE match_id = ?1",
          rusqlite::params![id_str, score.home, score.away],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE match_id = ?1"),
          rusqlite::params![id_str],
          RawMatch::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawMatch::into_match).transpose()
  }

  // ── Predictions ───────────────────────────────────────────────────────────

  async fn upsert_prediction(&self, input: NewPrediction) -> Result<Option<Prediction>> {
    let new_id_str = encode_uuid(Uuid::new_v4());
    let user_str   = encode_uuid(input.user_id);
    let match_str  = encode_uuid(input.match_id);
    let winner_str = encode_uuid(input.predicted_winner_id);
    let now_str    = encode_dt(Utc::now());

    // The unplayed check and the write are one statement, so a score
    // committed after the caller's own check still closes the match.
    let raw: Option<RawPrediction> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "INSERT INTO predictions (
             prediction_id, user_id, match_id, predicted_winner_id,
             points_awarded, created_at, updated_at
           )
           SELECT ?1, ?2, ?3, ?4, 0, ?5, ?5
           WHERE EXISTS (
             SELECT 1 FROM matches WHERE match_id = ?3 AND home_score IS NULL
           )
           ON CONFLICT (user_id, match_id) DO UPDATE SET
             predicted_winner_id = excluded.predicted_winner_id,
             points_awarded      = 0,
             updated_at          = excluded.updated_at",
          rusqlite::params![new_id_str, user_str, match_str, winner_str, now_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!(
            "SELECT {PREDICTION_COLUMNS} FROM predictions p
             WHERE p.user_id = ?1 AND p.match_id = ?2"
          ),
          rusqlite::params![user_str, match_str],
          RawPrediction::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawPrediction::into_prediction).transpose()
  }

  async fn list_predictions(&self, match_id: Uuid) -> Result<Vec<Prediction>> {
    let id_str = encode_uuid(match_id);

    let raws: Vec<RawPrediction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PREDICTION_COLUMNS} FROM predictions p
           WHERE p.match_id = ?1
           ORDER BY p.created_at, p.prediction_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawPrediction::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPrediction::into_prediction).collect()
  }

  async fn list_tournament_predictions(&self, tournament_id: Uuid) -> Result<Vec<Prediction>> {
    let id_str = encode_uuid(tournament_id);

    let raws: Vec<RawPrediction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PREDICTION_COLUMNS}
           FROM predictions p
           JOIN matches m ON m.match_id = p.match_id
           WHERE m.tournament_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawPrediction::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPrediction::into_prediction).collect()
  }

  async fn apply_awards(
    &self,
    match_id: Uuid,
    scored: Score,
    awards: Vec<Award>,
  ) -> Result<Option<usize>> {
    let match_str = encode_uuid(match_id);
    let awards: Vec<(String, i32)> = awards
      .into_iter()
      .map(|a| (encode_uuid(a.prediction_id), a.points))
      .collect();

    // All awards for the match land in one transaction so readers never see
    // a half re-scored match. Awards computed from a superseded score are
    // dropped.
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current = tx.query_row(
          "SELECT 1 FROM matches
           WHERE match_id = ?1 AND home_score = ?2 AND away_score = ?3",
          rusqlite::params![match_str, scored.home, scored.away],
          |_| Ok(()),
        )
        .optional()?;
        if current.is_none() {
          return Ok(None);
        }
        let mut updated = 0;
        {
          let mut stmt = tx.prepare(
            "UPDATE predictions SET points_awarded = ?1
             WHERE prediction_id = ?2 AND match_id = ?3",
          )?;
          for (id, points) in &awards {
            updated += stmt.execute(rusqlite::params![points, id, match_str])?;
          }
        }
        tx.commit()?;
        Ok(Some(updated))
      })
      .await?;

    Ok(updated)
  }
}
