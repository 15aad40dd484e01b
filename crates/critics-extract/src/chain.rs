//! Ordered fallback chains.
//!
//! A chain is a slice of named, pure strategies over a review container. The
//! chain is evaluated in order and stops at the first strategy that returns
//! `Some`.

use scraper::ElementRef;

/// One way of recovering a value from an element.
pub struct Strategy<T> {
  /// Label used in trace output.
  pub name: &'static str,
  pub run:  for<'a> fn(ElementRef<'a>) -> Option<T>,
}

/// Run `chain` against `element`, returning the first value produced.
pub fn first_match<T>(element: ElementRef<'_>, chain: &[Strategy<T>]) -> Option<T> {
  chain.iter().find_map(|strategy| {
    let value = (strategy.run)(element)?;
    tracing::trace!(strategy = strategy.name, "strategy resolved");
    Some(value)
  })
}
