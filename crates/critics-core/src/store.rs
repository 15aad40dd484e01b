//! The `CriticStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `critics-store-sqlite`).
//! The pipeline depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::model::{Critic, Movie, Review, ReviewListing};

/// Abstraction over the movie/critic/review cache.
///
/// Every write is an upsert keyed by URL (or by the (movie, critic) pair for
/// reviews) and replaces the whole stored record. Nothing is ever deleted.
///
/// Callers must treat a write as not having happened unless it returned
/// `Ok`.
pub trait CriticStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Movies ────────────────────────────────────────────────────────────

  /// Point lookup by canonical movie URL. Returns `None` on a cache miss.
  fn get_movie<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<Option<Movie>, Self::Error>> + Send + 'a;

  /// Insert or fully replace a movie.
  fn put_movie<'a>(
    &'a self,
    movie: &'a Movie,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Critics ───────────────────────────────────────────────────────────

  fn get_critic<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<Option<Critic>, Self::Error>> + Send + 'a;

  /// Insert a critic or overwrite its display name.
  fn put_critic<'a>(
    &'a self,
    critic: &'a Critic,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Reviews ───────────────────────────────────────────────────────────

  /// Insert or replace the review for `(review.movie_url, review.critic_url)`.
  ///
  /// Both the movie and the critic must already be stored.
  fn put_review<'a>(
    &'a self,
    review: &'a Review,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All reviews of a movie joined with critic names, in storage order.
  fn list_reviews<'a>(
    &'a self,
    movie_url: &'a str,
  ) -> impl Future<Output = Result<Vec<ReviewListing>, Self::Error>> + Send + 'a;
}
