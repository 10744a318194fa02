//! `vitrine render` – write the catalog page as HTML.

use anyhow::{Context, Result};
use std::path::Path;
use vitrine_core::browser::Browser;
use vitrine_core::config::VitrineConfig;
use vitrine_core::view::RenderContext;

pub async fn run_render(
    cfg: &VitrineConfig,
    query: &str,
    out: Option<&Path>,
    no_scrape: bool,
) -> Result<()> {
    let mut ctx = RenderContext::from_config(cfg);
    ctx.scrape = !no_scrape;

    let mut browser = Browser::open(cfg, ctx).await;
    if !query.is_empty() {
        browser.search(query);
    }
    browser.settle().await;

    let page = browser.render_page();
    match out {
        Some(path) => {
            std::fs::write(path, page).with_context(|| format!("write {}", path.display()))?;
            println!(
                "Wrote {} ({} of {} products)",
                path.display(),
                browser.view().len(),
                browser.catalog().len()
            );
        }
        None => print!("{}", page),
    }
    Ok(())
}
