//! Identifier normalization.
//!
//! Human-typed titles and names become the slugs used both as path segments
//! on the source site and, through [`crate::source::SourceUrls`], as cache
//! keys. The transform is minimal and lossy: lowercase plus a fixed space
//! separator. Punctuation is kept, so titles whose source slug drops
//! apostrophes or colons will not resolve.

use std::fmt;

use crate::{Error, Result};

/// Lowercase `title` and replace every space with `_`.
pub fn normalize_title(title: &str) -> String {
  title.to_lowercase().replace(' ', "_")
}

/// Lowercase `name` and replace every space with `-`.
pub fn normalize_critic(name: &str) -> String {
  name.to_lowercase().replace(' ', "-")
}

/// A normalized movie slug, e.g. `zootopia_2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieSlug(String);

impl MovieSlug {
  /// Normalize a free-text title. Rejects input that is blank.
  pub fn from_title(title: &str) -> Result<Self> {
    if title.trim().is_empty() {
      return Err(Error::EmptyIdentifier);
    }
    Ok(Self(normalize_title(title)))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for MovieSlug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// A normalized critic slug, e.g. `roger-ebert`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CriticSlug(String);

impl CriticSlug {
  /// Normalize a critic display name. Rejects input that is blank.
  pub fn from_name(name: &str) -> Result<Self> {
    if name.trim().is_empty() {
      return Err(Error::EmptyIdentifier);
    }
    Ok(Self(normalize_critic(name)))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CriticSlug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
