//! Review-list extraction.

use critics_core::model::Sentiment;
use scraper::{ElementRef, Html, Selector};

use crate::{
  chain::{Strategy, first_match},
  sentiment,
  text::{clean_text, select_first, text_of},
};

/// A review as read from the page, before it is keyed for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReview {
  pub critic_name: String,
  pub sentiment:   Sentiment,
  pub excerpt:     Option<String>,
}

/// Container selectors, tried in order; the first one matching anything is
/// used for the whole document. The last two are loose attribute/tag
/// heuristics for layouts none of the table selectors recognise.
pub const CONTAINER_SELECTORS: &[&str] = &[
  "div.review_table .review_table_row",
  "div.review_table .row",
  "div.review_table_row",
  "div.review_table__row",
  "div.review_table div.review",
  "[data-qa*='review']",
  "article.review",
];

const CRITIC_NAME_CHAIN: &[Strategy<String>] = &[
  Strategy { name: ".critic-name", run: |el| text_of(el, ".critic-name") },
  Strategy { name: ".reviewer a", run: |el| text_of(el, ".reviewer a") },
  Strategy { name: ".critic__link", run: |el| text_of(el, ".critic__link") },
  Strategy { name: ".reviewer", run: |el| text_of(el, ".reviewer") },
  Strategy {
    name: "first link",
    run:  |el| select_first(el, "a").and_then(clean_text),
  },
];

const EXCERPT_CHAIN: &[Strategy<String>] = &[
  Strategy { name: ".the_review", run: |el| text_of(el, ".the_review") },
  Strategy { name: ".review-text", run: |el| text_of(el, ".review-text") },
  Strategy { name: ".content", run: |el| text_of(el, ".content") },
];

/// Extract every review from a reviews page.
///
/// Containers without a recognisable critic name are skipped. An empty result
/// is not an error: the page may simply have no reviews in a known layout.
pub fn extract_reviews(html: &str) -> Vec<ParsedReview> {
  let document = Html::parse_document(html);
  let containers = find_containers(&document);

  let mut reviews = Vec::with_capacity(containers.len());
  for (index, container) in containers.into_iter().enumerate() {
    match parse_container(container) {
      Some(review) => reviews.push(review),
      None => tracing::debug!(index, "review container has no critic name; skipped"),
    }
  }
  reviews
}

fn find_containers(document: &Html) -> Vec<ElementRef<'_>> {
  for css in CONTAINER_SELECTORS {
    let Ok(selector) = Selector::parse(css) else {
      continue;
    };
    let found: Vec<_> = document.select(&selector).collect();
    if !found.is_empty() {
      tracing::debug!(selector = *css, count = found.len(), "review containers found");
      return found;
    }
  }
  tracing::debug!("no review containers found");
  Vec::new()
}

fn parse_container(container: ElementRef<'_>) -> Option<ParsedReview> {
  let critic_name = first_match(container, CRITIC_NAME_CHAIN)?;
  Some(ParsedReview {
    critic_name,
    sentiment: sentiment::resolve(container),
    excerpt: first_match(container, EXCERPT_CHAIN),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const TABLE_PAGE: &str = r#"
    <html><body>
      <div class="review_table">
        <div class="row review_table_row" data-sentiment="POSITIVE">
          <div class="reviewer"><a class="critic-name" href="/critic/roger-ebert">Roger Ebert</a></div>
          <div class="the_review">  A swoony, moody teen romance. </div>
        </div>
        <div class="row review_table_row">
          <div class="reviewer"><a href="/critic/mark-kermode">Mark Kermode</a></div>
          <score-icon-critics sentiment="NEGATIVE"></score-icon-critics>
        </div>
        <div class="row review_table_row">
          <div class="review-text">Nobody signed this one.</div>
        </div>
      </div>
    </body></html>
  "#;

  #[test]
  fn table_layout() {
    let reviews = extract_reviews(TABLE_PAGE);
    assert_eq!(reviews.len(), 2);

    assert_eq!(reviews[0], ParsedReview {
      critic_name: "Roger Ebert".into(),
      sentiment:   Sentiment::Positive,
      excerpt:     Some("A swoony, moody teen romance.".into()),
    });

    assert_eq!(reviews[1].critic_name, "Mark Kermode");
    assert_eq!(reviews[1].sentiment, Sentiment::Negative);
    assert_eq!(reviews[1].excerpt, None);
  }

  #[test]
  fn first_matching_selector_wins() {
    // The table row selector matches first, so the `review_table__row` div
    // is never considered even though a later selector would find it.
    let html = r#"
      <div class="review_table">
        <div class="review_table_row"><a>Critic A</a></div>
      </div>
      <div class="review_table__row"><a>Critic B</a></div>
    "#;
    let names: Vec<_> = extract_reviews(html)
      .into_iter()
      .map(|r| r.critic_name)
      .collect();
    assert_eq!(names, ["Critic A"]);
  }

  #[test]
  fn falls_back_to_article_reviews() {
    let html = r#"
      <article class="review fresh"><span class="critic__link">Dana Stevens</span></article>
      <article class="review"><a href="/x">Wesley Morris</a><span>Rotten</span></article>
    "#;
    let reviews = extract_reviews(html);
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].critic_name, "Dana Stevens");
    assert_eq!(reviews[0].sentiment, Sentiment::Positive);
    assert_eq!(reviews[1].critic_name, "Wesley Morris");
    assert_eq!(reviews[1].sentiment, Sentiment::Negative);
  }

  #[test]
  fn data_qa_attribute_fallback() {
    let html = r#"<li data-qa="review-item"><a>Alissa Wilkinson</a></li>"#;
    let reviews = extract_reviews(html);
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].sentiment, Sentiment::Unknown);
  }

  #[test]
  fn page_without_reviews_is_empty() {
    assert!(extract_reviews("<html><body><p>Nothing</p></body></html>").is_empty());
  }
}
