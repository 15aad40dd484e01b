//! Live retrieval of movie and review pages.
//!
//! [`WebSource`] implements [`DocumentSource`] over a plain HTTP client and an
//! optional headless browser. Every document it retrieves is also written to
//! a [`SnapshotDir`].

pub mod browser;
pub mod direct;
pub mod error;
mod scripts;
pub mod snapshot;


use critics_core::{
  slug::MovieSlug,
  source::{DocumentSource, SourceUrls},
};

pub use self::{
  browser::{BrowserFetcher, BrowserSettings},
  direct::{DirectFetcher, FetchSettings},
  error::{Error, Result},
  snapshot::{SnapshotDir, SnapshotKind},
};

/// The live site as a [`DocumentSource`].
pub struct WebSource {
  urls:      SourceUrls,
  direct:    DirectFetcher,
  browser:   Option<BrowserFetcher>,
  snapshots: SnapshotDir,
}

impl WebSource {
  pub fn new(
    urls: SourceUrls,
    fetch: &FetchSettings,
    browser: &BrowserSettings,
    snapshots: SnapshotDir,
  ) -> Result<Self> {
    Ok(Self {
      urls,
      direct: DirectFetcher::new(fetch)?,
      browser: browser
        .enabled
        .then(|| BrowserFetcher::new(browser.clone())),
      snapshots,
    })
  }

  pub fn urls(&self) -> &SourceUrls { &self.urls }

  pub fn snapshots(&self) -> &SnapshotDir { &self.snapshots }

  /// Snapshot failures are logged and otherwise ignored.
  async fn keep(&self, slug: &MovieSlug, kind: SnapshotKind, body: &str) {
    match self.snapshots.write(slug, kind, body).await {
      Ok(path) => tracing::debug!(path = %path.display(), bytes = body.len(), "snapshot written"),
      Err(e) => tracing::warn!(error = %e, "could not write snapshot"),
    }
  }

  async fn direct(&self, slug: &MovieSlug, url: String, kind: SnapshotKind) -> Result<String> {
    tracing::info!(%url, "fetching");
    let body = self.direct.get(&url).await?;
    self.keep(slug, kind, &body).await;
    Ok(body)
  }
}

impl DocumentSource for WebSource {
  type Error = Error;

  async fn fetch_summary(&self, slug: &MovieSlug) -> Result<String> {
    self
      .direct(slug, self.urls.movie(slug), SnapshotKind::Summary)
      .await
  }

  async fn fetch_reviews(&self, slug: &MovieSlug) -> Result<String> {
    self
      .direct(slug, self.urls.reviews(slug), SnapshotKind::Reviews)
      .await
  }

  async fn fetch_rendered_reviews(&self, slug: &MovieSlug) -> Result<Option<String>> {
    let Some(browser) = &self.browser else {
      tracing::debug!("browser retrieval disabled");
      return Ok(None);
    };

    let url = self.urls.reviews(slug);
    tracing::info!(%url, "rendering in browser");
    let body = browser.fetch(&url).await?;
    self.keep(slug, SnapshotKind::RenderedReviews, &body).await;
    Ok(Some(body))
  }

  async fn saved_reviews(&self, slug: &MovieSlug) -> Result<Option<String>> {
    self.snapshots.read(slug, SnapshotKind::Reviews).await
  }
}
