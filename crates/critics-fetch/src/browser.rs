//! Headless-browser retrieval of the fully expanded reviews page.
//!
//! A fresh browser is launched per fetch and torn down before returning,
//! whether or not the page was collected.

use std::{future::Future, path::PathBuf, time::Duration};

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::{Error, Result, scripts};

/// Settings for [`BrowserFetcher`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
  /// Disable to skip browser retrieval entirely.
  pub enabled:           bool,
  /// Wait after navigation and after each "load more" click.
  pub settle_ms:         u64,
  /// Wait between scrolling the control into view and clicking it.
  pub scroll_pause_ms:   u64,
  /// Upper bound on "load more" clicks per page.
  pub max_clicks:        u32,
  /// Browser binary; autodetected when unset.
  pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
  fn default() -> Self {
    Self {
      enabled:           true,
      settle_ms:         2000,
      scroll_pause_ms:   200,
      max_clicks:        100,
      chrome_executable: None,
    }
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A running browser and its CDP event loop.
///
/// [`BrowserSession::shutdown`] closes the browser cleanly. Dropping a session
/// without shutting it down still stops the event loop, and chromiumoxide
/// kills the child process when the `Browser` is dropped.
struct BrowserSession {
  browser: Browser,
  handler: JoinHandle<()>,
}

impl BrowserSession {
  async fn launch(settings: &BrowserSettings) -> Result<Self> {
    let mut builder = BrowserConfig::builder()
      .no_sandbox()
      .arg("--disable-dev-shm-usage")
      .arg("--disable-gpu");
    if let Some(path) = &settings.chrome_executable {
      builder = builder.chrome_executable(path);
    }
    let config = builder.build().map_err(Error::Launch)?;

    let (browser, mut events) = Browser::launch(config).await?;
    let handler = tokio::spawn(async move {
      while let Some(event) = events.next().await {
        if let Err(e) = event {
          tracing::debug!(error = %e, "browser event loop error");
        }
      }
    });

    Ok(Self { browser, handler })
  }

  async fn shutdown(mut self) {
    if let Err(e) = self.browser.close().await {
      tracing::warn!(error = %e, "browser close failed");
    }
    if let Err(e) = self.browser.wait().await {
      tracing::warn!(error = %e, "browser process wait failed");
    }
    self.handler.abort();
  }
}

impl Drop for BrowserSession {
  fn drop(&mut self) { self.handler.abort(); }
}

// ─── Fetcher ─────────────────────────────────────────────────────────────────

/// Renders a page and clicks "load more" until every batch is present.
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
  settings: BrowserSettings,
}

impl BrowserFetcher {
  pub fn new(settings: BrowserSettings) -> Self { Self { settings } }

  pub fn settings(&self) -> &BrowserSettings { &self.settings }

  /// Render `url`, expand it, annotate review sentiment and return the final
  /// document.
  pub async fn fetch(&self, url: &str) -> Result<String> {
    let session = BrowserSession::launch(&self.settings).await?;
    let result = self.collect(&session.browser, url).await;
    session.shutdown().await;
    result
  }

  async fn collect(&self, browser: &Browser, url: &str) -> Result<String> {
    let page = browser.new_page(url).await?;
    tokio::time::sleep(Duration::from_millis(self.settings.settle_ms)).await;

    let clicks = self.expand(&page).await;
    tracing::debug!(url, clicks, "review list expanded");

    match eval::<u64>(&page, &scripts::annotate_sentiment()).await {
      Ok(count) => tracing::debug!(url, count, "review blocks annotated"),
      Err(e) => tracing::warn!(url, error = %e, "sentiment annotation failed"),
    }

    let html = page.content().await?;
    if let Err(e) = page.close().await {
      tracing::debug!(url, error = %e, "page close failed");
    }
    Ok(html)
  }

  /// Click "load more" until it disappears, a step fails, or the click
  /// budget runs out. Returns the number of clicks made.
  ///
  /// A failed step ends expansion but keeps what was loaded so far.
  async fn expand<C: LoadMore>(&self, control: &C) -> u32 {
    let pause = Duration::from_millis(self.settings.scroll_pause_ms);
    let settle = Duration::from_millis(self.settings.settle_ms);
    let mut clicks = 0;

    while clicks < self.settings.max_clicks {
      if !step(control.scroll_into_view().await, "scroll") {
        break;
      }
      tokio::time::sleep(pause).await;

      if !step(control.click().await, "click") {
        break;
      }
      clicks += 1;
      tokio::time::sleep(settle).await;

      if !step(control.remaining().await, "re-check") {
        break;
      }
    }

    if clicks > 0 && clicks == self.settings.max_clicks {
      tracing::warn!(clicks, "stopped expanding reviews at click limit");
    }
    clicks
  }
}

/// `true` to keep going. Errors are logged and stop the loop.
fn step(result: Result<bool>, action: &'static str) -> bool {
  match result {
    Ok(more) => more,
    Err(e) => {
      tracing::warn!(action, error = %e, "load-more step failed; keeping loaded reviews");
      false
    }
  }
}

// ─── Load-more control ───────────────────────────────────────────────────────

/// The page operations the expansion loop needs. Each returns `false` when
/// there is no usable control.
trait LoadMore: Sync {
  fn scroll_into_view(&self) -> impl Future<Output = Result<bool>> + Send;

  fn click(&self) -> impl Future<Output = Result<bool>> + Send;

  /// Whether a visible, non-hidden control is still on the page.
  fn remaining(&self) -> impl Future<Output = Result<bool>> + Send;
}

impl LoadMore for Page {
  async fn scroll_into_view(&self) -> Result<bool> {
    eval(self, &scripts::scroll_to_load_more()).await
  }

  async fn click(&self) -> Result<bool> {
    eval(self, &scripts::click_load_more()).await
  }

  async fn remaining(&self) -> Result<bool> {
    eval(self, &scripts::load_more_remaining()).await
  }
}

async fn eval<T: serde::de::DeserializeOwned>(page: &Page, script: &str) -> Result<T> {
  let value = page.evaluate_expression(script).await?.into_value()?;
  Ok(value)
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use tokio::time::Instant;

  use super::*;

  /// A page whose control accepts `batches` clicks and then disappears.
  #[derive(Default)]
  struct ScriptedControl {
    batches:       u32,
    fail_click_at: Option<u32>,
    clicks:        Mutex<u32>,
    log:           Mutex<Vec<&'static str>>,
  }

  impl ScriptedControl {
    fn with_batches(batches: u32) -> Self { Self { batches, ..Self::default() } }

    fn present(&self) -> bool { *self.clicks.lock().unwrap() < self.batches }

    fn log(&self) -> Vec<&'static str> { self.log.lock().unwrap().clone() }
  }

  impl LoadMore for ScriptedControl {
    async fn scroll_into_view(&self) -> Result<bool> {
      self.log.lock().unwrap().push("scroll");
      Ok(self.present())
    }

    async fn click(&self) -> Result<bool> {
      self.log.lock().unwrap().push("click");
      let mut clicks = self.clicks.lock().unwrap();
      if self.fail_click_at == Some(*clicks + 1) {
        let detached = serde_json::from_str::<bool>("detached").unwrap_err();
        return Err(Error::Script(detached));
      }
      *clicks += 1;
      Ok(true)
    }

    async fn remaining(&self) -> Result<bool> {
      self.log.lock().unwrap().push("remaining");
      Ok(self.present())
    }
  }

  fn fetcher(max_clicks: u32) -> BrowserFetcher {
    BrowserFetcher::new(BrowserSettings { max_clicks, ..BrowserSettings::default() })
  }

  #[test]
  fn partial_settings_keep_defaults() {
    let settings: BrowserSettings =
      serde_json::from_str(r#"{"enabled": false, "max_clicks": 5}"#).unwrap();
    assert!(!settings.enabled);
    assert_eq!(settings.max_clicks, 5);
    assert_eq!(settings.settle_ms, 2000);
    assert_eq!(settings.scroll_pause_ms, 200);
    assert_eq!(settings.chrome_executable, None);
  }

  #[tokio::test(start_paused = true)]
  async fn stops_at_click_limit() {
    let control = ScriptedControl::with_batches(1_000);
    assert_eq!(fetcher(5).expand(&control).await, 5);
    assert_eq!(*control.clicks.lock().unwrap(), 5);
  }

  #[tokio::test(start_paused = true)]
  async fn stops_when_control_disappears() {
    let control = ScriptedControl::with_batches(3);
    assert_eq!(fetcher(100).expand(&control).await, 3);
    assert_eq!(control.log().last(), Some(&"remaining"));
  }

  #[tokio::test(start_paused = true)]
  async fn page_without_control_is_not_clicked() {
    let control = ScriptedControl::with_batches(0);
    assert_eq!(fetcher(100).expand(&control).await, 0);
    assert_eq!(control.log(), ["scroll"]);
  }

  #[tokio::test(start_paused = true)]
  async fn failed_click_keeps_earlier_batches() {
    let control = ScriptedControl {
      batches: 10,
      fail_click_at: Some(3),
      ..ScriptedControl::default()
    };
    assert_eq!(fetcher(100).expand(&control).await, 2);
    assert_eq!(control.log().last(), Some(&"click"));
  }

  #[tokio::test(start_paused = true)]
  async fn settles_after_each_click() {
    let control = ScriptedControl::with_batches(2);
    let started = Instant::now();

    fetcher(100).expand(&control).await;

    // Two rounds of 200 ms before the click and 2000 ms after it. The paused
    // clock rounds each deadline up to the next millisecond.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(4_400), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(4_500), "{elapsed:?}");
  }
}
