//! Core types and trait definitions for Elite Critics.
//!
//! This crate is deliberately free of HTTP, HTML and database dependencies.
//! The store, extractor, fetcher and CLI crates all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod model;
pub mod slug;
pub mod source;
pub mod store;

pub use error::{Error, Result};
