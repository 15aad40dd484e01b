use thiserror::Error;

/// Why a pipeline run stopped before producing a report.
#[derive(Debug, Error)]
pub enum Abort {
  #[error("invalid title: {0}")]
  Title(#[from] critics_core::Error),

  #[error("could not fetch movie page {url}: {source}")]
  Fetch {
    url:    String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("movie page {url} is incomplete: {source}")]
  Extract {
    url:    String,
    #[source]
    source: critics_extract::Error,
  },
}
