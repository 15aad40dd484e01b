//! HTML extraction for Elite Critics.
//!
//! Turns raw movie and review pages into [`critics_core`] domain types. Pure
//! synchronous; no HTTP or database dependencies.
//!
//! The source markup is undocumented and shifts over time, so every field is
//! recovered through an ordered list of independent strategies (see
//! [`chain`]). The first strategy that produces a value wins.
//!
//! # Quick start
//!
//! ```no_run
//! let html = std::fs::read_to_string("twilight_raw_html.txt").unwrap();
//! let movie = critics_extract::extract_summary(
//!   &html,
//!   "https://www.rottentomatoes.com/m/twilight",
//! )
//! .unwrap();
//! println!("{} ({:?}%)", movie.name, movie.critic_score);
//! ```

pub mod chain;
pub mod error;
mod reviews;
mod sentiment;
mod summary;
mod text;

pub use error::{Error, Result};
pub use reviews::{ParsedReview, extract_reviews};
pub use sentiment::parse_marker;
pub use summary::extract_summary;
