//! [`SqliteStore`], the SQLite implementation of [`CriticStore`].

use std::path::Path;

use critics_core::{
  model::{Critic, Movie, Review, ReviewListing},
  store::CriticStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{RawListing, RawMovie, encode_approval, encode_genres, encode_score},
  schema::migrate,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The Elite Critics cache backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring the schema up to date.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
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
        migrate(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CriticStore impl ────────────────────────────────────────────────────────

impl CriticStore for SqliteStore {
  type Error = crate::Error;

  // ── Movies ────────────────────────────────────────────────────────────────

  async fn get_movie(&self, url: &str) -> Result<Option<Movie>> {
    let url = url.to_owned();

    let raw: Option<RawMovie> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT url, name, critic_score, audience_score, genres,
                    noobless_score, hierarchy_score
             FROM movies WHERE url = ?1",
            rusqlite::params![url],
            RawMovie::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMovie::into_movie).transpose()
  }

  async fn put_movie(&self, movie: &Movie) -> Result<()> {
    let url             = movie.url.clone();
    let name            = movie.name.clone();
    let critic_score    = encode_score(movie.critic_score);
    let audience_score  = encode_score(movie.audience_score);
    let genres          = encode_genres(&movie.genres)?;
    let noobless_score  = movie.noobless_score;
    let hierarchy_score = movie.hierarchy_score;

    // Upsert in place rather than REPLACE: a delete-and-reinsert would trip
    // the foreign keys of existing reviews.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO movies (
             url, name, critic_score, audience_score, genres,
             noobless_score, hierarchy_score
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
           ON CONFLICT(url) DO UPDATE SET
             name            = excluded.name,
             critic_score    = excluded.critic_score,
             audience_score  = excluded.audience_score,
             genres          = excluded.genres,
             noobless_score  = excluded.noobless_score,
             hierarchy_score = excluded.hierarchy_score",
          rusqlite::params![
            url,
            name,
            critic_score,
            audience_score,
            genres,
            noobless_score,
            hierarchy_score,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(url = %movie.url, "movie stored");
    Ok(())
  }

  // ── Critics ───────────────────────────────────────────────────────────────

  async fn get_critic(&self, url: &str) -> Result<Option<Critic>> {
    let url = url.to_owned();

    let critic = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT url, name FROM critics WHERE url = ?1",
            rusqlite::params![url],
            |row| {
              Ok(Critic {
                url:  row.get(0)?,
                name: row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(critic)
  }

  async fn put_critic(&self, critic: &Critic) -> Result<()> {
    let url  = critic.url.clone();
    let name = critic.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO critics (url, name) VALUES (?1, ?2)
           ON CONFLICT(url) DO UPDATE SET name = excluded.name",
          rusqlite::params![url, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  async fn put_review(&self, review: &Review) -> Result<()> {
    let movie_url  = review.movie_url.clone();
    let critic_url = review.critic_url.clone();
    let approved   = encode_approval(review.sentiment);
    let excerpt    = review.excerpt.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reviews (movie_url, critic_url, approved, excerpt)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT(movie_url, critic_url) DO UPDATE SET
             approved = excluded.approved,
             excerpt  = excluded.excerpt",
          rusqlite::params![movie_url, critic_url, approved, excerpt],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_reviews(&self, movie_url: &str) -> Result<Vec<ReviewListing>> {
    let movie_url = movie_url.to_owned();

    let raws: Vec<RawListing> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.url, c.name, r.approved, r.excerpt
           FROM reviews r
           JOIN critics c ON c.url = r.critic_url
           WHERE r.movie_url = ?1
           ORDER BY r.review_id",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![movie_url], RawListing::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawListing::into_listing).collect())
  }
}
