//! Error types for the extractor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required movie field was not recovered by any strategy.
  #[error("missing required fields: {}", .missing.join(", "))]
  Incomplete { missing: Vec<&'static str> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
