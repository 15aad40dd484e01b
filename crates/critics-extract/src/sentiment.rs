//! Review sentiment resolution.
//!
//! The score indicator and the review text are siblings in the source markup,
//! not parent and child, so the sentiment can turn up in several places. A
//! browser pass may already have copied it onto the container as
//! `data-sentiment`; failing that the chain searches inside the container,
//! then forward in the document, then falls back to class names and literal
//! "Fresh"/"Rotten" text.

use critics_core::model::Sentiment;
use scraper::ElementRef;

use crate::{
  chain::{Strategy, first_match},
  text::{clean_text, next_in_document, select_first},
};

/// Custom element carrying the critic score icon.
pub const SCORE_ICON_TAG: &str = "score-icon-critics";

/// Attributes a score icon may carry its sentiment in, by priority.
const MARKER_ATTRS: &[&str] = &["sentiment", "data-sentiment", "data-qa-sentiment"];

pub const SENTIMENT_CHAIN: &[Strategy<Sentiment>] = &[
  Strategy {
    name: "annotated container",
    run:  |el| el.value().attr("data-sentiment").and_then(parse_marker),
  },
  Strategy {
    name: "score icon inside",
    run:  |el| select_first(el, SCORE_ICON_TAG).and_then(icon_marker),
  },
  Strategy {
    name: "next score icon",
    run:  |el| next_in_document(el, SCORE_ICON_TAG).and_then(icon_marker),
  },
  Strategy { name: "sentiment attribute", run: descendant_attribute },
  Strategy { name: "container class", run: container_class },
  Strategy { name: "icon or label", run: icon_or_label },
];

/// Resolve the sentiment of a review container; `Unknown` when every strategy
/// fails.
pub fn resolve(container: ElementRef<'_>) -> Sentiment {
  first_match(container, SENTIMENT_CHAIN).unwrap_or_default()
}

/// Map a raw marker value (`POSITIVE`, `negative`, `true`, ...) to a
/// sentiment. Unrecognised values do not resolve.
pub fn parse_marker(raw: &str) -> Option<Sentiment> {
  let marker = raw.trim().to_uppercase();
  if marker.contains("POS") || marker == "TRUE" {
    Some(Sentiment::Positive)
  } else if marker.contains("NEG") || marker == "FALSE" {
    Some(Sentiment::Negative)
  } else {
    None
  }
}

fn icon_marker(icon: ElementRef<'_>) -> Option<Sentiment> {
  MARKER_ATTRS
    .iter()
    .find_map(|attr| icon.value().attr(attr))
    .and_then(parse_marker)
}

fn descendant_attribute(container: ElementRef<'_>) -> Option<Sentiment> {
  container
    .descendants()
    .skip(1)
    .filter_map(ElementRef::wrap)
    .find_map(|el| {
      el.value()
        .attrs()
        .find(|(name, _)| name.contains("sentiment"))
        .map(|(_, value)| value)
    })
    .and_then(parse_marker)
}

fn container_class(container: ElementRef<'_>) -> Option<Sentiment> {
  let class = container.value().attr("class").unwrap_or_default();
  if class.contains("fresh") {
    Some(Sentiment::Positive)
  } else if class.contains("rotten") {
    Some(Sentiment::Negative)
  } else {
    None
  }
}

fn icon_or_label(container: ElementRef<'_>) -> Option<Sentiment> {
  let labelled = |word: &str| {
    container
      .descendants()
      .filter_map(ElementRef::wrap)
      .filter(|el| el.value().name() == "span")
      .any(|span| clean_text(span).is_some_and(|t| t.contains(word)))
  };

  if select_first(container, ".icon.fresh").is_some() || labelled("Fresh") {
    Some(Sentiment::Positive)
  } else if select_first(container, ".icon.rotten").is_some() || labelled("Rotten") {
    Some(Sentiment::Negative)
  } else {
    None
  }
}
