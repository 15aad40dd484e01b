//! One movie, end to end.
//!
//! ```text
//! title → slug → cache lookup ─ hit ───────────────────────┐
//!                     └─ miss → fetch summary → extract → store
//!                                                           │
//!   reviews: direct fetch, browser fetch, pick a document ◄─┘
//!            → extract → store critic + review, per item
//!            → list stored reviews → Report
//! ```
//!
//! Only the summary step can abort a run. Every later failure is logged and
//! the run continues with whatever it has.

use critics_core::{
  model::{Critic, Movie, Review, ReviewListing},
  slug::{CriticSlug, MovieSlug},
  source::{DocumentSource, SourceUrls},
  store::CriticStore,
};
use critics_extract::{ParsedReview, extract_reviews, extract_summary};

use crate::Abort;

type ItemError = Box<dyn std::error::Error + Send + Sync>;

/// Counts for one batch of extracted reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
  pub parsed: usize,
  pub stored: usize,
  pub failed: usize,
}

/// Everything needed to render a completed run.
#[derive(Debug, Clone)]
pub struct Report {
  /// The title as entered.
  pub title:      String,
  pub movie:      Movie,
  /// Whether the movie came from the cache rather than a fetch.
  pub from_cache: bool,
  pub stats:      BatchStats,
  /// Every stored review for the movie, not only this run's.
  pub reviews:    Vec<ReviewListing>,
}

#[derive(Debug)]
pub enum Outcome {
  Completed(Report),
  Aborted(Abort),
}

pub struct Pipeline<S, D> {
  store:  S,
  source: D,
  urls:   SourceUrls,
}

impl<S, D> Pipeline<S, D>
where
  S: CriticStore,
  D: DocumentSource,
{
  pub fn new(store: S, source: D, urls: SourceUrls) -> Self {
    Self { store, source, urls }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn source(&self) -> &D { &self.source }

  pub async fn run(&self, title: &str) -> Outcome {
    match self.try_run(title).await {
      Ok(report) => Outcome::Completed(report),
      Err(reason) => {
        tracing::error!(error = %reason, "analysis aborted");
        Outcome::Aborted(reason)
      }
    }
  }

  async fn try_run(&self, title: &str) -> Result<Report, Abort> {
    let slug = MovieSlug::from_title(title)?;
    let url = self.urls.movie(&slug);
    tracing::info!(%slug, %url, "looking up movie");

    let (movie, from_cache) = match self.cached_movie(&url).await {
      Some(movie) => {
        tracing::info!(name = %movie.name, "found in cache; skipping summary fetch");
        (movie, true)
      }
      None => (self.fetch_movie(&slug, &url).await?, false),
    };

    let stats = match self.review_document(&slug).await {
      Some(html) => self.store_reviews(&url, &html).await,
      None => {
        tracing::warn!(%slug, "no reviews document available");
        BatchStats::default()
      }
    };

    let reviews = self.store.list_reviews(&url).await.unwrap_or_else(|e| {
      tracing::warn!(error = %e, "could not list stored reviews");
      Vec::new()
    });

    Ok(Report {
      title: title.to_string(),
      movie,
      from_cache,
      stats,
      reviews,
    })
  }

  // ─── Movie ─────────────────────────────────────────────────────────────

  async fn cached_movie(&self, url: &str) -> Option<Movie> {
    match self.store.get_movie(url).await {
      Ok(found) => found,
      Err(e) => {
        tracing::warn!(url, error = %e, "cache lookup failed; treating as a miss");
        None
      }
    }
  }

  async fn fetch_movie(&self, slug: &MovieSlug, url: &str) -> Result<Movie, Abort> {
    let html = self
      .source
      .fetch_summary(slug)
      .await
      .map_err(|e| Abort::Fetch { url: url.to_string(), source: Box::new(e) })?;

    let movie = extract_summary(&html, url).map_err(|source| Abort::Extract {
      url: url.to_string(),
      source,
    })?;

    match self.store.put_movie(&movie).await {
      Ok(()) => tracing::info!(name = %movie.name, "movie stored"),
      Err(e) => tracing::warn!(url, error = %e, "could not store movie"),
    }
    Ok(movie)
  }

  // ─── Reviews ───────────────────────────────────────────────────────────

  /// The rendered document if the browser produced one, else the direct
  /// response, else the snapshot of an earlier direct fetch.
  async fn review_document(&self, slug: &MovieSlug) -> Option<String> {
    let direct = match self.source.fetch_reviews(slug).await {
      Ok(body) => Some(body),
      Err(e) => {
        tracing::warn!(error = %e, "direct reviews fetch failed");
        None
      }
    };

    match self.source.fetch_rendered_reviews(slug).await {
      Ok(Some(body)) => {
        tracing::debug!("using rendered reviews document");
        return Some(body);
      }
      Ok(None) => {}
      Err(e) => tracing::warn!(error = %e, "browser reviews fetch failed"),
    }

    if direct.is_some() {
      tracing::debug!("using direct reviews document");
      return direct;
    }

    match self.source.saved_reviews(slug).await {
      Ok(saved) => {
        if saved.is_some() {
          tracing::debug!("using saved reviews snapshot");
        }
        saved
      }
      Err(e) => {
        tracing::warn!(error = %e, "could not read saved reviews");
        None
      }
    }
  }

  async fn store_reviews(&self, movie_url: &str, html: &str) -> BatchStats {
    let parsed = extract_reviews(html);
    let mut stats = BatchStats { parsed: parsed.len(), ..BatchStats::default() };

    for review in parsed {
      let critic = review.critic_name.clone();
      match self.store_review(movie_url, review).await {
        Ok(()) => stats.stored += 1,
        Err(e) => {
          stats.failed += 1;
          tracing::warn!(%critic, error = %e, "could not store review");
        }
      }
    }

    tracing::info!(
      parsed = stats.parsed,
      stored = stats.stored,
      failed = stats.failed,
      "reviews processed"
    );
    stats
  }

  async fn store_review(&self, movie_url: &str, review: ParsedReview) -> Result<(), ItemError> {
    let critic_slug = CriticSlug::from_name(&review.critic_name)?;
    let critic = Critic {
      url:  self.urls.critic(&critic_slug),
      name: review.critic_name,
    };
    self.store.put_critic(&critic).await?;

    self
      .store
      .put_review(&Review {
        movie_url:  movie_url.to_string(),
        critic_url: critic.url,
        sentiment:  review.sentiment,
        excerpt:    review.excerpt,
      })
      .await?;
    Ok(())
  }
}
