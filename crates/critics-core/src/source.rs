//! The `DocumentSource` trait and source URL layout.
//!
//! The trait is implemented by `critics-fetch` for the live site. The
//! pipeline depends on this abstraction so a cached run can be proven never
//! to touch the network.

use std::future::Future;

use crate::{
  Error, Result,
  slug::{CriticSlug, MovieSlug},
};

/// Default root of the review site.
pub const DEFAULT_SOURCE_ROOT: &str = "https://www.rottentomatoes.com";

// ─── URLs ────────────────────────────────────────────────────────────────────

/// Builds canonical URLs under a source root. Movie and critic URLs double as
/// cache keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
  root: String,
}

impl SourceUrls {
  /// `root` must be an absolute http(s) URL; a trailing `/` is dropped.
  pub fn new(root: &str) -> Result<Self> {
    let trimmed = root.trim().trim_end_matches('/');
    let has_host = trimmed
      .strip_prefix("https://")
      .or_else(|| trimmed.strip_prefix("http://"))
      .is_some_and(|host| !host.is_empty());
    if !has_host {
      return Err(Error::InvalidSourceRoot(root.to_string()));
    }
    Ok(Self { root: trimmed.to_string() })
  }

  pub fn root(&self) -> &str { &self.root }

  /// `<root>/m/<slug>`
  pub fn movie(&self, slug: &MovieSlug) -> String {
    format!("{}/m/{}", self.root, slug)
  }

  /// `<root>/m/<slug>/reviews`
  pub fn reviews(&self, slug: &MovieSlug) -> String {
    format!("{}/m/{}/reviews", self.root, slug)
  }

  /// `<root>/critic/<slug>`
  pub fn critic(&self, slug: &CriticSlug) -> String {
    format!("{}/critic/{}", self.root, slug)
  }
}

impl Default for SourceUrls {
  fn default() -> Self { Self { root: DEFAULT_SOURCE_ROOT.to_string() } }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Retrieves raw documents for a movie.
///
/// Each method is an independent strategy; a failure in one says nothing about
/// the others. Implementations keep a raw copy of every document they
/// retrieve, which [`DocumentSource::saved_reviews`] can serve back later.
pub trait DocumentSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the movie summary page with a single direct request.
  fn fetch_summary<'a>(
    &'a self,
    slug: &'a MovieSlug,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Fetch the reviews page with a single direct request. Only the first
  /// batch of reviews is present in this document.
  fn fetch_reviews<'a>(
    &'a self,
    slug: &'a MovieSlug,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Render the reviews page in a browser, expanding every "load more" batch.
  /// Returns `Ok(None)` when browser retrieval is disabled.
  fn fetch_rendered_reviews<'a>(
    &'a self,
    slug: &'a MovieSlug,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// The reviews document kept by an earlier direct fetch, if any.
  fn saved_reviews<'a>(
    &'a self,
    slug: &'a MovieSlug,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn urls_follow_site_layout() {
    let urls = SourceUrls::default();
    let movie = MovieSlug::from_title("Zootopia 2").unwrap();
    let critic = CriticSlug::from_name("Roger Ebert").unwrap();

    assert_eq!(urls.movie(&movie), "https://www.rottentomatoes.com/m/zootopia_2");
    assert_eq!(
      urls.reviews(&movie),
      "https://www.rottentomatoes.com/m/zootopia_2/reviews"
    );
    assert_eq!(
      urls.critic(&critic),
      "https://www.rottentomatoes.com/critic/roger-ebert"
    );
  }

  #[test]
  fn trailing_slash_is_dropped() {
    let urls = SourceUrls::new("http://127.0.0.1:8080/").unwrap();
    assert_eq!(urls.root(), "http://127.0.0.1:8080");
  }

  #[test]
  fn non_http_roots_are_rejected() {
    assert!(SourceUrls::new("ftp://example.com").is_err());
    assert!(SourceUrls::new("https://").is_err());
    assert!(SourceUrls::new("").is_err());
  }
}
