//! Movie-summary extraction.
//!
//! Two embedded JSON blocks carry the data. The JSON-LD block is authoritative
//! for name and genres and usually has the critic score; the score-card block
//! supplies the audience score and, when present, overrides the critic score.
//! Either block may be missing. The result is accepted only if name, critic
//! score and genres were all recovered.

use critics_core::model::Movie;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::{Error, Result, chain::Strategy};

/// Fields recovered so far. Later passes overwrite what they find.
#[derive(Debug, Default, PartialEq)]
struct SummaryDraft {
  name:           Option<String>,
  critic_score:   Option<u8>,
  audience_score: Option<u8>,
  genres:         Option<Vec<String>>,
}

impl SummaryDraft {
  fn merge(&mut self, later: SummaryDraft) {
    if later.name.is_some() {
      self.name = later.name;
    }
    if later.critic_score.is_some() {
      self.critic_score = later.critic_score;
    }
    if later.audience_score.is_some() {
      self.audience_score = later.audience_score;
    }
    if later.genres.is_some() {
      self.genres = later.genres;
    }
  }

  fn finish(self, url: &str) -> Result<Movie> {
    let name = self.name.filter(|n| !n.is_empty());
    let genres = self.genres.filter(|g| !g.is_empty());

    let mut missing = Vec::new();
    if name.is_none() {
      missing.push("name");
    }
    if self.critic_score.is_none() {
      missing.push("critic_score");
    }
    if genres.is_none() {
      missing.push("genres");
    }

    match (name, genres) {
      (Some(name), Some(genres)) if missing.is_empty() => Ok(Movie {
        url: url.to_string(),
        name,
        critic_score: self.critic_score,
        audience_score: self.audience_score,
        genres,
        noobless_score: None,
        hierarchy_score: None,
      }),
      _ => Err(Error::Incomplete { missing }),
    }
  }
}

/// Passes over the document root, applied in order.
const PASSES: &[Strategy<SummaryDraft>] = &[
  Strategy { name: "json-ld", run: json_ld },
  Strategy { name: "media scorecard", run: scorecard },
];

/// Extract the movie summary from a movie page. `url` becomes the record key.
pub fn extract_summary(html: &str, url: &str) -> Result<Movie> {
  let document = Html::parse_document(html);
  let root = document.root_element();

  let mut draft = SummaryDraft::default();
  for pass in PASSES {
    match (pass.run)(root) {
      Some(found) => draft.merge(found),
      None => tracing::warn!(pass = pass.name, url, "summary block missing or unreadable"),
    }
  }

  draft.finish(url).inspect_err(|e| {
    tracing::warn!(url, error = %e, "movie summary rejected");
  })
}

// ─── Passes ──────────────────────────────────────────────────────────────────

fn json_ld(root: ElementRef<'_>) -> Option<SummaryDraft> {
  let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
  let data = root
    .select(&selector)
    .find_map(|script| script_json(script).filter(Value::is_object))?;

  Some(SummaryDraft {
    name:           data
      .get("name")
      .and_then(Value::as_str)
      .map(|n| n.trim().to_string()),
    critic_score:   data
      .get("aggregateRating")
      .and_then(|rating| rating.get("ratingValue"))
      .and_then(score_value),
    audience_score: None,
    genres:         data.get("genre").map(genre_list),
  })
}

fn scorecard(root: ElementRef<'_>) -> Option<SummaryDraft> {
  let selector = Selector::parse("script#media-scorecard-json").ok()?;
  let data = root.select(&selector).next().and_then(script_json)?;

  let score = |key: &str| {
    data
      .get(key)
      .and_then(|block| block.get("score"))
      .and_then(score_value)
  };

  Some(SummaryDraft {
    name:           None,
    critic_score:   score("criticsScore"),
    audience_score: score("audienceScore"),
    genres:         None,
  })
}

// ─── Value helpers ───────────────────────────────────────────────────────────

fn script_json(script: ElementRef<'_>) -> Option<Value> {
  let body: String = script.text().collect();
  match serde_json::from_str(&body) {
    Ok(value) => Some(value),
    Err(e) => {
      tracing::debug!(error = %e, "embedded JSON did not parse");
      None
    }
  }
}

/// A percentage from an integer, a float (truncated) or an all-digit string.
fn score_value(value: &Value) -> Option<u8> {
  let raw = match value {
    Value::Number(n) => n
      .as_u64()
      .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
    Value::String(s) => {
      let s = s.trim();
      if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
      }
      s.parse().ok()
    }
    _ => None,
  }?;
  u8::try_from(raw).ok().filter(|score| *score <= 100)
}

/// Genres from either a JSON array of strings or a single string.
fn genre_list(value: &Value) -> Vec<String> {
  let items: Vec<&str> = match value {
    Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
    Value::String(s) => vec![s.as_str()],
    _ => Vec::new(),
  };
  items
    .into_iter()
    .map(str::trim)
    .filter(|g| !g.is_empty())
    .map(str::to_string)
    .collect()
}
