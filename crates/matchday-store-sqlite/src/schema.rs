//! SQL schema for the Matchday SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS teams (
    team_id  TEXT PRIMARY KEY,
    name     TEXT NOT NULL UNIQUE,
    logo     TEXT
);

CREATE TABLE IF NOT EXISTS tournaments (
    tournament_id     TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    description       TEXT,
    start_date        TEXT NOT NULL,   -- YYYY-MM-DD
    end_date          TEXT NOT NULL,   -- YYYY-MM-DD; compared as text
    registration_open INTEGER NOT NULL DEFAULT 1,
    winner_id         TEXT REFERENCES teams(team_id),
    created_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tournament_participants (
    tournament_id TEXT NOT NULL REFERENCES tournaments(tournament_id),
    team_id       TEXT NOT NULL REFERENCES teams(team_id),
    PRIMARY KEY (tournament_id, team_id)
);

-- Scores are both NULL (unplayed) or both set (finished).
CREATE TABLE IF NOT EXISTS matches (
    match_id      TEXT PRIMARY KEY,
    tournament_id TEXT NOT NULL REFERENCES tournaments(tournament_id),
    home_team_id  TEXT NOT NULL REFERENCES teams(team_id),
    away_team_id  TEXT NOT NULL REFERENCES teams(team_id),
    scheduled_at  TEXT NOT NULL,
    home_score    INTEGER,
    away_score    INTEGER,
    CHECK (home_team_id != away_team_id),
    CHECK ((home_score IS NULL) = (away_score IS NULL)),
    CHECK (home_score IS NULL OR (home_score >= 0 AND away_score >= 0))
);

CREATE TABLE IF NOT EXISTS predictions (
    prediction_id       TEXT PRIMARY KEY,
    user_id             TEXT NOT NULL,
    match_id            TEXT NOT NULL REFERENCES matches(match_id),
    predicted_winner_id TEXT NOT NULL REFERENCES teams(team_id),
    points_awarded      INTEGER NOT NULL DEFAULT 0,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL,
    UNIQUE (user_id, match_id)
);

CREATE INDEX IF NOT EXISTS matches_tournament_idx   ON matches(tournament_id);
CREATE INDEX IF NOT EXISTS predictions_match_idx    ON predictions(match_id);
CREATE INDEX IF NOT EXISTS tournaments_end_date_idx ON tournaments(end_date);

PRAGMA user_version = 1;
";
