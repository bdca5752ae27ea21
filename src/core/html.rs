// src/core/html.rs
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::consts::HEADING_SELECTOR;
use super::sanitize::normalize_ws;

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(HEADING_SELECTOR).unwrap());

/// Text of the first `h1.heading-size-1`, whitespace-collapsed.
/// None when the element is missing or empty.
pub fn heading_text(doc: &str) -> Option<String> {
    let html = Html::parse_document(doc);
    let node = html.select(&HEADING).next()?;
    let text = normalize_ws(&node.text().collect::<String>());
    if text.is_empty() { None } else { Some(text) }
}
