use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request to {url} failed: {source}")]
  Request {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{url} returned HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("browser launch failed: {0}")]
  Launch(String),

  #[error("browser automation failed: {0}")]
  Browser(#[from] chromiumoxide::error::CdpError),

  #[error("page script returned an unexpected value: {0}")]
  Script(#[from] serde_json::Error),

  #[error("snapshot {}: {source}", .path.display())]
  Snapshot {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}
