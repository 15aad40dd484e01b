//! Plain HTTP retrieval.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result};

/// Desktop Chrome user agent; the site serves a stripped page to unknown
/// clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
  AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings for [`DirectFetcher`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
  pub user_agent:   String,
  pub timeout_secs: u64,
}

impl Default for FetchSettings {
  fn default() -> Self {
    Self {
      user_agent:   DEFAULT_USER_AGENT.to_string(),
      timeout_secs: 10,
    }
  }
}

/// Single-request page fetcher.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct DirectFetcher {
  client: Client,
}

impl DirectFetcher {
  pub fn new(settings: &FetchSettings) -> Result<Self> {
    let client = Client::builder()
      .user_agent(settings.user_agent.as_str())
      .timeout(Duration::from_secs(settings.timeout_secs))
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client })
  }

  /// `GET url` and return the body. Any non-2xx status is an error.
  pub async fn get(&self, url: &str) -> Result<String> {
    let request_err = |source| Error::Request { url: url.to_string(), source };

    let resp = self.client.get(url).send().await.map_err(request_err)?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status {
        url:    url.to_string(),
        status: status.as_u16(),
      });
    }

    resp.text().await.map_err(request_err)
  }
}
