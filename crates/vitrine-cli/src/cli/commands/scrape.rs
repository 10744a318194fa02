//! `vitrine scrape <url>` – show the meta fields a card would use.

use anyhow::{Context, Result};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vitrine_core::config::VitrineConfig;
use vitrine_core::meta::{self, CurlMetaSource, ScrapeOptions};
use vitrine_core::render::resolve_image;

pub async fn run_scrape(cfg: &VitrineConfig, url: &str) -> Result<()> {
    let source = CurlMetaSource::new(ScrapeOptions::from(cfg));
    let meta = tokio::task::spawn_blocking({
        let url = url.to_string();
        move || meta::scrape(&source, Some(url.as_str()), &Arc::new(AtomicBool::new(false)))
    })
    .await
    .context("scrape task join")??
    .unwrap_or_default();

    if meta.is_empty() {
        println!("No preview meta tags found at {}", url);
        return Ok(());
    }

    let image = meta.image.as_deref().map(|i| resolve_image(i, Some(url)));
    println!("image:       {}", image.as_deref().unwrap_or("-"));
    println!("price:       {}", meta.price.as_deref().unwrap_or("-"));
    println!("description: {}", meta.description.as_deref().unwrap_or("-"));
    Ok(())
}
