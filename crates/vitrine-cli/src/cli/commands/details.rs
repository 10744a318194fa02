//! `vitrine details <index>` – the card's "Details" dialog.

use anyhow::{bail, Result};
use vitrine_core::config::VitrineConfig;
use vitrine_core::render::details_message;

pub async fn run_details(cfg: &VitrineConfig, index: usize) -> Result<()> {
    let catalog = super::load_catalog(cfg).await;
    match catalog.get(index) {
        Some(product) => println!("{}", details_message(product)),
        None => bail!("no product at index {} (catalog has {})", index, catalog.len()),
    }
    Ok(())
}
