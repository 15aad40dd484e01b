//! Error types for `critics-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("identifier is empty")]
  EmptyIdentifier,

  #[error("invalid source root {0:?}: expected an http(s) URL")]
  InvalidSourceRoot(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
