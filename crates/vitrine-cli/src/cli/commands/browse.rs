//! `vitrine browse` – interactive search over the loaded catalog.
//!
//! Each input line is a new query. Scrapes started for the previous results
//! are cancelled. `:show` prints the current cards, `:wait` waits for pending
//! scrapes first, `:q` quits.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use vitrine_core::browser::Browser;
use vitrine_core::config::VitrineConfig;
use vitrine_core::view::RenderContext;

pub async fn run_browse(cfg: &VitrineConfig, no_scrape: bool) -> Result<()> {
    let mut ctx = RenderContext::from_config(cfg);
    ctx.scrape = !no_scrape;

    let mut browser = Browser::open(cfg, ctx).await;
    println!(
        "{} products loaded. Type to search; :show, :wait, :q.",
        browser.catalog().len()
    );
    super::print_view(browser.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":q" | ":quit" => break,
            ":show" => super::print_view(browser.view()),
            ":wait" => {
                browser.settle().await;
                super::print_view(browser.view());
            }
            _ => {
                browser.search(&line);
                println!("{} result(s) for {:?}", browser.view().len(), browser.query());
                super::print_view(browser.view());
            }
        }
    }
    Ok(())
}
