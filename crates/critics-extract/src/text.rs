//! Small DOM helpers shared by the extractors.

use scraper::{ElementRef, Selector};

/// All text under `element` with runs of whitespace collapsed to one space.
/// `None` when nothing but whitespace is left.
pub fn clean_text(element: ElementRef<'_>) -> Option<String> {
  let joined = element
    .text()
    .flat_map(str::split_whitespace)
    .collect::<Vec<_>>()
    .join(" ");
  (!joined.is_empty()).then_some(joined)
}

/// First descendant of `element` matching `css`.
pub fn select_first<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
  let selector = Selector::parse(css).ok()?;
  element.select(&selector).next()
}

/// Cleaned text of the first descendant matching `css`.
pub fn text_of(element: ElementRef<'_>, css: &str) -> Option<String> {
  select_first(element, css).and_then(clean_text)
}

/// The first element named `tag` that starts after `element` ends, in
/// document order. Descendants of `element` itself are not considered.
pub fn next_in_document<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
  let mut node = *element;
  loop {
    for sibling in node.next_siblings() {
      let found = sibling
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag);
      if found.is_some() {
        return found;
      }
    }
    node = node.parent()?;
  }
}
