//! Ordered-fallback extraction of social-preview fields from HTML.

use scraper::{ElementRef, Html, Selector};

use super::MetaInfo;

const IMAGE_SELECTORS: &[&str] = &[
    r#"meta[property="og:image"]"#,
    r#"meta[name="og:image"]"#,
    r#"meta[name="twitter:image"]"#,
    r#"meta[property="twitter:image"]"#,
    r#"link[rel="image_src"]"#,
];

const PRICE_SELECTORS: &[&str] = &[
    r#"meta[property="product:price:amount"]"#,
    r#"meta[property="og:price:amount"]"#,
    r#"meta[name="twitter:data1"]"#,
    r#"meta[itemprop="price"]"#,
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    r#"meta[property="og:description"]"#,
    r#"meta[name="description"]"#,
    r#"meta[name="twitter:description"]"#,
];

/// Parses `html` (scripts are never run) and extracts image, price and description.
pub fn extract_meta(html: &str) -> MetaInfo {
    let doc = Html::parse_document(html);
    MetaInfo {
        image: pick_content(&doc, IMAGE_SELECTORS),
        price: pick_content(&doc, PRICE_SELECTORS),
        description: pick_content(&doc, DESCRIPTION_SELECTORS),
    }
}

/// Tries each selector in order; the first one that matches any element decides
/// the value, even when that element carries nothing usable.
fn pick_content(doc: &Html, selectors: &[&str]) -> Option<String> {
    for sel in selectors {
        let selector = match Selector::parse(sel) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("invalid selector {}: {:?}", sel, e);
                continue;
            }
        };
        if let Some(node) = doc.select(&selector).next() {
            return node_value(&node);
        }
    }
    None
}

/// `content`, then `value`, then `href` for `<link>`, then text content.
fn node_value(node: &ElementRef<'_>) -> Option<String> {
    let el = node.value();
    let mut candidates = vec![el.attr("content"), el.attr("value")];
    if el.name() == "link" {
        candidates.push(el.attr("href"));
    }
    candidates
        .into_iter()
        .flatten()
        .map(str::to_string)
        .chain(std::iter::once(node.text().collect::<String>()))
        .find(|v| !v.is_empty())
}
