//! Session state: the loaded catalog, the current query and its view.

use crate::catalog::{self, Catalog, CatalogSource};
use crate::config::VitrineConfig;
use crate::filter::filter;
use crate::render::{self, Node};
use crate::view::{RenderContext, ResultsView};

pub struct Browser {
    catalog: Catalog,
    ctx: RenderContext,
    query: String,
    view: ResultsView,
}

impl Browser {
    /// Renders the whole catalog (empty query) right away.
    pub fn new(catalog: Catalog, ctx: RenderContext) -> Self {
        let view = ResultsView::build(catalog.iter(), &ctx);
        Self {
            catalog,
            ctx,
            query: String::new(),
            view,
        }
    }

    /// Loads the configured catalog (failures give an empty one) and opens a session.
    pub async fn open(cfg: &VitrineConfig, ctx: RenderContext) -> Self {
        let source = CatalogSource::parse(&cfg.catalog);
        let catalog = match tokio::task::spawn_blocking(move || catalog::load_catalog(&source)).await
        {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("catalog loader task failed: {}", e);
                Vec::new().into()
            }
        };
        Self::new(catalog, ctx)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// Re-filters and re-renders. Scrapes still running for the previous
    /// results are cancelled. Returns the new results as first drawn.
    pub fn search(&mut self, query: &str) -> Node {
        let matches = filter(&self.catalog, query);
        tracing::debug!(query, matches = matches.len(), "search");
        let view = ResultsView::build(matches, &self.ctx);
        // Dropping the previous view cancels its scrapes.
        drop(std::mem::replace(&mut self.view, view));
        self.query = query.to_string();
        self.view.snapshot()
    }

    /// Waits for the current view's scrapes to finish.
    pub async fn settle(&mut self) {
        self.view.settle().await;
    }

    /// Full HTML document for the current query and card states.
    pub fn render_page(&self) -> String {
        render::render_page(&self.query, self.view.snapshot())
    }
}
