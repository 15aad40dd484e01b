//! The Elite Critics pipeline.
//!
//! Wires a [`critics_core::store::CriticStore`] and a
//! [`critics_core::source::DocumentSource`] together: look the movie up in the
//! cache, fetch and extract on a miss, collect reviews, and render the
//! result. The `elite-critics` binary is a thin shell around [`Pipeline`].

pub mod error;
pub mod pipeline;
pub mod render;
pub mod settings;

pub use error::Abort;
pub use pipeline::{BatchStats, Outcome, Pipeline, Report};
pub use settings::Settings;
