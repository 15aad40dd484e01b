//! In-page JavaScript run by the browser fetcher.
//!
//! Each script is a self-invoking expression whose value is returned to Rust
//! by value. Selector lists are injected as JSON array literals.

/// "Load more" controls, by priority. Markup has changed several times; older
/// entries are kept for cached and regional variants.
pub const LOAD_MORE_SELECTORS: &[&str] = &[
  "button.load-more",
  r#"button[data-qa="load-more-button"]"#,
  "button.js-load-more-btn",
  "button#reviews-load-more",
  ".load-more button",
  "button[data-load-more]",
  r#"rt-button[data-qa="load-more-btn"]"#,
  "div.load-more-container rt-button",
  "rt-button[data-LoadMoreManager]",
];

/// Review blocks to annotate with `data-sentiment`.
pub const REVIEW_BLOCK_SELECTORS: &[&str] = &[
  "div.review_table .review_table_row",
  "div.review_table .row",
  "div.review_table_row",
  "div.review_table__row",
  "div.review_table div.review",
  "article.review",
];

/// How many following element siblings to search for a score icon.
pub const ICON_SIBLING_WINDOW: usize = 10;

/// Shared helpers: `selectors`, `visible(el)` and `findControl()`.
const LOAD_MORE_PRELUDE: &str = r#"
  const visible = (el) =>
    !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
  const enabled = (el) =>
    !el.disabled && el.getAttribute('aria-disabled') !== 'true';
  const findControl = () => {
    for (const sel of selectors) {
      const el = document.querySelector(sel);
      if (el && visible(el) && enabled(el)) return el;
    }
    return null;
  };
"#;

fn json_list(items: &[&str]) -> String {
  serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn load_more_script(body: &str) -> String {
  format!(
    "(() => {{\n  const selectors = {};\n{LOAD_MORE_PRELUDE}\n{body}\n}})()",
    json_list(LOAD_MORE_SELECTORS)
  )
}

/// Scroll the first usable control into view. Evaluates to `false` when
/// there is none.
pub fn scroll_to_load_more() -> String {
  load_more_script(
    "  const el = findControl();
  if (!el) return false;
  el.scrollIntoView(true);
  return true;",
  )
}

/// Click the first usable control. Evaluates to `false` when it has gone.
pub fn click_load_more() -> String {
  load_more_script(
    "  const el = findControl();
  if (!el) return false;
  el.click();
  return true;",
  )
}

/// Whether a visible control without the `hide` class is still on the page.
pub fn load_more_remaining() -> String {
  load_more_script(
    "  return selectors.some((sel) =>
    Array.from(document.querySelectorAll(sel)).some((el) =>
      !(el.getAttribute('class') || '').includes('hide') && visible(el)));",
  )
}

/// Copy each review block's score-icon sentiment onto the block itself as
/// `data-sentiment`. The icon sits inside the block or in one of the next
/// few element siblings. Evaluates to the number of blocks annotated.
pub fn annotate_sentiment() -> String {
  format!(
    r#"(() => {{
  const selectors = {selectors};
  const blocks = [];
  for (const sel of selectors) {{
    document.querySelectorAll(sel).forEach((el) => {{
      if (!blocks.includes(el)) blocks.push(el);
    }});
  }}
  let annotated = 0;
  for (const block of blocks) {{
    let icon = block.querySelector('score-icon-critics');
    let node = block;
    for (let i = 0; !icon && i < {window}; i++) {{
      node = node.nextElementSibling;
      if (!node) break;
      if (node.tagName.toLowerCase().startsWith('score-icon')) {{
        icon = node;
      }} else {{
        icon = node.querySelector('score-icon-critics');
      }}
    }}
    if (!icon) continue;
    const sentiment =
      icon.getAttribute('sentiment') || icon.getAttribute('data-sentiment') || '';
    if (sentiment) {{
      block.setAttribute('data-sentiment', sentiment);
      annotated++;
    }}
  }}
  return annotated;
}})()"#,
    selectors = json_list(REVIEW_BLOCK_SELECTORS),
    window = ICON_SIBLING_WINDOW,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selectors_are_injected_as_json() {
    let script = click_load_more();
    assert!(script.contains(r#"const selectors = ["button.load-more","#));
    assert!(script.contains(r#""rt-button[data-qa=\"load-more-btn\"]""#));
    assert!(script.trim_end().ends_with("})()"));
  }

  #[test]
  fn annotation_script_uses_review_blocks() {
    let script = annotate_sentiment();
    assert!(script.contains(r#""article.review""#));
    assert!(script.contains("i < 10"));
    assert!(script.contains("block.setAttribute('data-sentiment', sentiment)"));
  }
}
