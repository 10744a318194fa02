//! `vitrine search <query>` – list matching products.

use anyhow::Result;
use vitrine_core::config::VitrineConfig;
use vitrine_core::filter::filter;

pub async fn run_search(cfg: &VitrineConfig, query: &str) -> Result<()> {
    let catalog = super::load_catalog(cfg).await;
    let matches = filter(&catalog, query);
    if matches.is_empty() {
        println!("{}", vitrine_core::render::EMPTY_RESULTS_TEXT);
        return Ok(());
    }
    println!("{:<32} {:<16} {}", "NAME", "STORE", "LINK");
    for p in matches {
        println!(
            "{:<32} {:<16} {}",
            p.display_name(),
            p.store.as_deref().unwrap_or("-"),
            p.link().unwrap_or("#")
        );
    }
    Ok(())
}
