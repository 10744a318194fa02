//! Product card: state machine for the thumbnail and its node tree.

use url::Url;

use super::node::{Element, Node};
use crate::catalog::Product;
use crate::meta::{MetaInfo, ScrapeError};

const PRIMARY_LINK_LABEL: &str = "View in store";
const DETAILS_LABEL: &str = "Details";

/// Thumbnail slot of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumb {
    /// Scrape in flight.
    Loading,
    /// Ready-to-use image source.
    Image(String),
    /// Scrape finished without an image.
    NoImage,
    /// Scrape failed.
    Unavailable,
}

impl Thumb {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Thumb::Loading => Some("Loading image..."),
            Thumb::Image(_) => None,
            Thumb::NoImage => Some("No image (manual)"),
            Thumb::Unavailable => Some("Image unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    pub thumb: Thumb,
    /// Price captured from the product page, shown above the actions.
    pub price: Option<String>,
}

impl CardState {
    pub fn loading() -> Self {
        Self {
            thumb: Thumb::Loading,
            price: None,
        }
    }
}

/// `<image_dir>/<file>`.
pub fn local_image_src(image_dir: &str, file: &str) -> String {
    let dir = image_dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

/// Initial state and whether the card needs a scrape.
/// A product with a local image is final immediately and never scrapes.
pub fn initial_card_state(product: &Product, image_dir: &str) -> (CardState, bool) {
    match product.local_image() {
        Some(file) => (
            CardState {
                thumb: Thumb::Image(local_image_src(image_dir, file)),
                price: None,
            },
            false,
        ),
        None => (CardState::loading(), true),
    }
}

/// Resolves a scraped image against the product link; on failure the string is kept verbatim.
pub fn resolve_image(image: &str, link: Option<&str>) -> String {
    let resolved = match link {
        Some(link) => Url::parse(link).and_then(|base| base.join(image)),
        None => Url::parse(image),
    };
    match resolved {
        Ok(url) => url.to_string(),
        Err(_) => image.to_string(),
    }
}

/// Folds a finished scrape into the card state. Errors end in [`Thumb::Unavailable`].
pub fn apply_scrape_outcome(
    state: &mut CardState,
    product: &Product,
    outcome: Result<Option<MetaInfo>, ScrapeError>,
) {
    match outcome {
        Ok(meta) => {
            let meta = meta.unwrap_or_default();
            state.thumb = match meta.image.as_deref().filter(|i| !i.is_empty()) {
                Some(image) => Thumb::Image(resolve_image(image, product.link())),
                None => Thumb::NoImage,
            };
            state.price = meta.price.filter(|p| !p.is_empty());
        }
        Err(e) => {
            tracing::warn!(
                link = product.link().unwrap_or(""),
                "could not read product page meta (blocked or failed): {}",
                e
            );
            state.thumb = Thumb::Unavailable;
        }
    }
}

/// Text of the "Details" dialog: name and link on two lines.
pub fn details_message(product: &Product) -> String {
    format!(
        "{}\n{}",
        product.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Product"),
        product.link().unwrap_or("No link")
    )
}

fn thumb_node(product: &Product, thumb: &Thumb) -> Element {
    let slot = Element::new("div").class("thumb");
    match thumb {
        Thumb::Image(src) => slot.child(
            Element::new("img")
                .class("thumb-img")
                .attr(
                    "alt",
                    product.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Product"),
                )
                .attr("src", src.clone()),
        ),
        other => slot.text(other.label().unwrap_or_default()),
    }
}

/// Builds the `<article class="card">` tree for a product in `state`.
pub fn card_node(product: &Product, state: &CardState) -> Node {
    let title = product.display_name();

    // Serialized as a JS string literal; JSON is a subset.
    let alert_arg = serde_json::to_string(&details_message(product)).unwrap_or_default();

    let actions = Element::new("div")
        .class("actions")
        .child(
            Element::new("a")
                .class("btn btn-primary")
                .attr("href", product.link().unwrap_or("#"))
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .text(PRIMARY_LINK_LABEL),
        )
        .child(
            Element::new("a")
                .class("btn btn-outline")
                .attr("href", "#")
                .attr("onclick", format!("alert({});return false;", alert_arg))
                .text(DETAILS_LABEL),
        );

    let mut card = Element::new("article")
        .class("card")
        .child(thumb_node(product, &state.thumb))
        .child(Element::new("h3").text(title))
        .child(
            Element::new("div")
                .class("meta")
                .text(product.store.clone().unwrap_or_default()),
        );
    if let Some(price) = &state.price {
        card = card.child(
            Element::new("div")
                .class("meta price")
                .text(format!("Price (captured): {}", price)),
        );
    }
    card.child(actions).into()
}
