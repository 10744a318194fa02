//! CLI command handlers. Each command is in its own file.

mod browse;
mod check;
mod details;
mod render;
mod scrape;
mod search;

pub use browse::run_browse;
pub use check::run_check;
pub use details::run_details;
pub use render::run_render;
pub use scrape::run_scrape;
pub use search::run_search;

use vitrine_core::catalog::{self, Catalog, CatalogSource};
use vitrine_core::config::VitrineConfig;
use vitrine_core::render::Thumb;
use vitrine_core::view::ResultsView;

/// Loads the configured catalog off the async threads. Never fails.
pub(super) async fn load_catalog(cfg: &VitrineConfig) -> Catalog {
    let source = CatalogSource::parse(&cfg.catalog);
    tokio::task::spawn_blocking(move || catalog::load_catalog(&source))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("catalog loader task failed: {}", e);
            Vec::new().into()
        })
}

/// One line per card: thumbnail state, name and store.
pub(super) fn print_view(view: &ResultsView) {
    if view.is_empty() {
        println!("{}", vitrine_core::render::EMPTY_RESULTS_TEXT);
        return;
    }
    for (product, state) in view.products().zip(view.states()) {
        let thumb = match &state.thumb {
            Thumb::Image(src) => src.clone(),
            other => other.label().unwrap_or_default().to_string(),
        };
        let price = state
            .price
            .as_deref()
            .map(|p| format!("  [{}]", p))
            .unwrap_or_default();
        println!(
            "  {:<32} {:<16} {}{}",
            product.display_name(),
            product.store.as_deref().unwrap_or("-"),
            thumb,
            price
        );
    }
}
