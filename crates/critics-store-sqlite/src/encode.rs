//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! Scores are stored as integers, genres as a compact JSON array, approval as
//! a 0/1 boolean.

use critics_core::model::{Movie, ReviewListing, Sentiment};

use crate::{Error, Result};

// ─── Scores ──────────────────────────────────────────────────────────────────

pub fn encode_score(score: Option<u8>) -> Option<i64> { score.map(i64::from) }

pub fn decode_score(column: &'static str, raw: Option<i64>) -> Result<Option<u8>> {
  raw
    .map(|value| match u8::try_from(value) {
      Ok(score) if score <= 100 => Ok(score),
      _ => Err(Error::ScoreOutOfRange { column, value }),
    })
    .transpose()
}

// ─── Genres ──────────────────────────────────────────────────────────────────

pub fn encode_genres(genres: &[String]) -> Result<String> {
  Ok(serde_json::to_string(genres)?)
}

pub fn decode_genres(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Approval ────────────────────────────────────────────────────────────────

/// Storage has no room for an unknown sentiment; it is recorded as `false`.
pub fn encode_approval(sentiment: Sentiment) -> bool { sentiment.approved() }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `movies` row.
pub struct RawMovie {
  pub url:             String,
  pub name:            String,
  pub critic_score:    Option<i64>,
  pub audience_score:  Option<i64>,
  pub genres:          String,
  pub noobless_score:  Option<f64>,
  pub hierarchy_score: Option<f64>,
}

impl RawMovie {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      url:             row.get(0)?,
      name:            row.get(1)?,
      critic_score:    row.get(2)?,
      audience_score:  row.get(3)?,
      genres:          row.get(4)?,
      noobless_score:  row.get(5)?,
      hierarchy_score: row.get(6)?,
    })
  }

  pub fn into_movie(self) -> Result<Movie> {
    Ok(Movie {
      url:             self.url,
      name:            self.name,
      critic_score:    decode_score("critic_score", self.critic_score)?,
      audience_score:  decode_score("audience_score", self.audience_score)?,
      genres:          decode_genres(&self.genres)?,
      noobless_score:  self.noobless_score,
      hierarchy_score: self.hierarchy_score,
    })
  }
}

/// Raw values read from a `reviews` row joined with `critics`.
pub struct RawListing {
  pub critic_url:  String,
  pub critic_name: String,
  pub approved:    bool,
  pub excerpt:     Option<String>,
}

impl RawListing {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      critic_url:  row.get(0)?,
      critic_name: row.get(1)?,
      approved:    row.get(2)?,
      excerpt:     row.get(3)?,
    })
  }

  pub fn into_listing(self) -> ReviewListing {
    ReviewListing {
      critic_url:  self.critic_url,
      critic_name: self.critic_name,
      approved:    self.approved,
      excerpt:     self.excerpt,
    }
  }
}
