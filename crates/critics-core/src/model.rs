//! Cached entities: movies, critics and the review edges between them.
//!
//! Every entity is keyed by its canonical source URL. Display names are not
//! unique and are never used as keys.

use serde::{Deserialize, Serialize};

// ─── Movie ───────────────────────────────────────────────────────────────────

/// A movie summary as extracted from its source page.
///
/// Written whole: a later successful fetch for the same `url` replaces every
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
  /// Canonical source URL; the cache key.
  pub url:             String,
  pub name:            String,
  /// Critic aggregate, integer percentage.
  pub critic_score:    Option<u8>,
  /// Audience aggregate, integer percentage.
  pub audience_score:  Option<u8>,
  /// Genres in source order.
  pub genres:          Vec<String>,
  /// "No Room for Noobies" recalculated critic score. Reserved; never
  /// computed by the pipeline.
  pub noobless_score:  Option<f64>,
  /// "Hierarchy" recalculated critic score. Reserved; never computed by the
  /// pipeline.
  pub hierarchy_score: Option<f64>,
}

impl Movie {
  /// Genres joined for display, or `"N/A"` when there are none.
  pub fn genre_line(&self) -> String {
    if self.genres.is_empty() {
      "N/A".to_string()
    } else {
      self.genres.join(", ")
    }
  }
}

// ─── Critic ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critic {
  pub url:  String,
  pub name: String,
}

// ─── Sentiment ───────────────────────────────────────────────────────────────

/// The polarity a source attaches to a review.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
  Positive,
  Negative,
  /// No marker could be resolved at parse time.
  #[default]
  Unknown,
}

impl Sentiment {
  /// Boolean projection used for storage. `Unknown` collapses to `false`.
  pub fn approved(self) -> bool { matches!(self, Self::Positive) }
}

// ─── Review ──────────────────────────────────────────────────────────────────

/// A critic's review of a movie. At most one per (movie, critic) pair; a later
/// write for the same pair replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
  pub movie_url:  String,
  pub critic_url: String,
  pub sentiment:  Sentiment,
  pub excerpt:    Option<String>,
}

/// A stored review joined with its critic's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewListing {
  pub critic_url:  String,
  pub critic_name: String,
  pub approved:    bool,
  pub excerpt:     Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_sentiment_is_not_approved() {
    assert!(Sentiment::Positive.approved());
    assert!(!Sentiment::Negative.approved());
    assert!(!Sentiment::Unknown.approved());
  }

  #[test]
  fn genre_line_falls_back_to_na() {
    let mut movie = Movie {
      url:             "https://example.com/m/x".into(),
      name:            "X".into(),
      critic_score:    Some(50),
      audience_score:  None,
      genres:          vec![],
      noobless_score:  None,
      hierarchy_score: None,
    };
    assert_eq!(movie.genre_line(), "N/A");

    movie.genres = vec!["Drama".into(), "Romance".into()];
    assert_eq!(movie.genre_line(), "Drama, Romance");
  }
}
