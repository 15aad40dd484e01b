//! SQL schema for the Elite Critics SQLite cache.
//!
//! Migrations run once each, in order, at connection startup. The number of
//! applied migrations is kept in `PRAGMA user_version`.

use rusqlite::Connection;

/// Per-connection settings; not persisted by SQLite, so applied on every open.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
";

/// Ordered schema migrations. Index `i` upgrades `user_version` from `i` to
/// `i + 1`. Never edit an entry once released; append a new one.
pub const MIGRATIONS: &[&str] = &[
  // 1: movies, critics and review edges.
  "
  CREATE TABLE IF NOT EXISTS critics (
      url   TEXT PRIMARY KEY,
      name  TEXT NOT NULL
  );

  CREATE TABLE IF NOT EXISTS movies (
      url              TEXT PRIMARY KEY,
      name             TEXT NOT NULL,
      critic_score     INTEGER,
      noobless_score   REAL,
      hierarchy_score  REAL,
      genres           TEXT NOT NULL DEFAULT '[]'   -- JSON array, source order
  );

  -- One review per (movie, critic); a later write replaces the earlier one.
  CREATE TABLE IF NOT EXISTS reviews (
      review_id   INTEGER PRIMARY KEY AUTOINCREMENT,
      critic_url  TEXT NOT NULL REFERENCES critics(url),
      movie_url   TEXT NOT NULL REFERENCES movies(url),
      approved    BOOLEAN NOT NULL,
      UNIQUE (movie_url, critic_url)
  );

  CREATE INDEX IF NOT EXISTS reviews_movie_idx ON reviews(movie_url);
  ",
  // 2: audience score and review excerpts.
  "
  ALTER TABLE movies  ADD COLUMN audience_score INTEGER;
  ALTER TABLE reviews ADD COLUMN excerpt        TEXT;
  ",
];

/// Apply connection pragmas and any migrations newer than `user_version`.
pub fn migrate(conn: &mut Connection) -> rusqlite::Result<()> {
  conn.execute_batch(PRAGMAS)?;

  let applied: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
  let applied = usize::try_from(applied).unwrap_or(0);

  for (index, sql) in MIGRATIONS.iter().enumerate().skip(applied) {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", (index + 1) as i64)?;
    tx.commit()?;
    tracing::debug!(version = index + 1, "applied schema migration");
  }

  Ok(())
}
