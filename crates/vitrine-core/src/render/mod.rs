//! Virtual node tree for the catalog page and its HTML serialization.

mod card;
mod node;
mod page;

pub use card::{
    apply_scrape_outcome, card_node, details_message, initial_card_state, local_image_src,
    resolve_image, CardState, Thumb,
};
pub use node::{Element, Node};
pub use page::{render_page, results_node, EMPTY_RESULTS_TEXT};
