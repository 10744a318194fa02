//! `vitrine check` – load the catalog and report the outcome.

use anyhow::{Context, Result};
use vitrine_core::catalog::{self, CatalogSource};
use vitrine_core::config::VitrineConfig;

pub async fn run_check(cfg: &VitrineConfig) -> Result<()> {
    let source = CatalogSource::parse(&cfg.catalog);
    let label = source.to_string();
    let products = tokio::task::spawn_blocking(move || catalog::try_load_catalog(&source))
        .await
        .context("catalog task join")?
        .with_context(|| format!("catalog {}", label))?;

    let local = products.iter().filter(|p| p.local_image().is_some()).count();
    println!("{}: {} products", label, products.len());
    println!("  with local image: {}", local);
    println!("  needing scrape:   {}", products.len() - local);
    Ok(())
}
