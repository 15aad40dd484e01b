//! Raw document snapshots.
//!
//! Every retrieved page is written to disk as plain text so a failed parse can
//! be inspected offline. The direct reviews snapshot also serves as the last
//! fallback input when both live review fetches fail.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use critics_core::slug::MovieSlug;

use crate::{Error, Result};

/// Which document a snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
  /// The movie summary page.
  Summary,
  /// The reviews page as served to a plain request.
  Reviews,
  /// The reviews page after browser rendering and "load more" expansion.
  RenderedReviews,
}

impl SnapshotKind {
  fn suffix(self) -> &'static str {
    match self {
      Self::Summary => "raw_html",
      Self::Reviews => "reviews_raw_html",
      Self::RenderedReviews => "reviews_full_html",
    }
  }
}

/// Directory holding `<slug>_<kind>.txt` snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotDir {
  root: PathBuf,
}

impl SnapshotDir {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  pub fn path(&self, slug: &MovieSlug, kind: SnapshotKind) -> PathBuf {
    self.root.join(format!("{slug}_{}.txt", kind.suffix()))
  }

  /// Write `body`, creating the directory if needed. Returns the file path.
  pub async fn write(
    &self,
    slug: &MovieSlug,
    kind: SnapshotKind,
    body: &str,
  ) -> Result<PathBuf> {
    let path = self.path(slug, kind);
    let io_err = |source| Error::Snapshot { path: path.clone(), source };

    tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;
    tokio::fs::write(&path, body).await.map_err(io_err)?;
    Ok(path)
  }

  /// Read a snapshot back. A missing file is `Ok(None)`.
  pub async fn read(&self, slug: &MovieSlug, kind: SnapshotKind) -> Result<Option<String>> {
    let path = self.path(slug, kind);
    match tokio::fs::read_to_string(&path).await {
      Ok(body) => Ok(Some(body)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(source) => Err(Error::Snapshot { path, source }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn slug() -> MovieSlug { MovieSlug::from_title("Zootopia 2").unwrap() }

  #[test]
  fn file_names_follow_kind() {
    let dir = SnapshotDir::new("/tmp/snaps");
    assert_eq!(
      dir.path(&slug(), SnapshotKind::Summary),
      Path::new("/tmp/snaps/zootopia_2_raw_html.txt")
    );
    assert_eq!(
      dir.path(&slug(), SnapshotKind::Reviews),
      Path::new("/tmp/snaps/zootopia_2_reviews_raw_html.txt")
    );
    assert_eq!(
      dir.path(&slug(), SnapshotKind::RenderedReviews),
      Path::new("/tmp/snaps/zootopia_2_reviews_full_html.txt")
    );
  }

  #[tokio::test]
  async fn write_creates_directory_and_reads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = SnapshotDir::new(tmp.path().join("nested"));

    let path = dir
      .write(&slug(), SnapshotKind::Reviews, "<html>reviews</html>")
      .await
      .unwrap();
    assert!(path.exists());

    let body = dir.read(&slug(), SnapshotKind::Reviews).await.unwrap();
    assert_eq!(body.as_deref(), Some("<html>reviews</html>"));
  }

  #[tokio::test]
  async fn missing_snapshot_is_none() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = SnapshotDir::new(tmp.path());
    assert_eq!(dir.read(&slug(), SnapshotKind::Summary).await.unwrap(), None);
  }
}
