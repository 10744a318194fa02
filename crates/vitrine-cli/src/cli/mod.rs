//! CLI for the Vitrine catalog browser.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vitrine_core::config::{self, VitrineConfig};

use commands::{run_browse, run_check, run_details, run_render, run_scrape, run_search};

/// Top-level CLI for Vitrine.
#[derive(Debug, Parser)]
#[command(name = "vitrine")]
#[command(about = "Vitrine: product catalog browser with Open Graph enrichment", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Settings that take precedence over `config.toml`.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Catalog JSON: local path or http(s) URL.
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub catalog: Option<String>,

    /// Relay prefix for product pages; the encoded link is appended to it.
    #[arg(long, global = true, value_name = "PREFIX")]
    pub proxy: Option<String>,

    /// Directory or URL prefix for local product images.
    #[arg(long, global = true, value_name = "DIR")]
    pub image_dir: Option<String>,
}

impl Overrides {
    pub fn apply(&self, mut cfg: VitrineConfig) -> VitrineConfig {
        if let Some(catalog) = &self.catalog {
            cfg.catalog = catalog.clone();
        }
        if let Some(proxy) = &self.proxy {
            cfg.cors_proxy = Some(proxy.clone());
        }
        if let Some(dir) = &self.image_dir {
            cfg.image_dir = dir.clone();
        }
        cfg
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Render the catalog page to HTML after all product pages are scraped.
    Render {
        /// Search query applied before rendering.
        #[arg(long, short, default_value = "")]
        query: String,
        /// Output file (stdout when omitted).
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Do not fetch product pages; cards without a local image stay in the loading state.
        #[arg(long)]
        no_scrape: bool,
    },

    /// List products whose name matches a query (accent- and case-insensitive).
    Search {
        /// Search text.
        query: String,
    },

    /// Show the details dialog text for a product.
    Details {
        /// Zero-based position in the catalog.
        index: usize,
    },

    /// Fetch a product page and print its image, price and description.
    Scrape {
        /// Product page URL.
        url: String,
    },

    /// Interactive search: every line re-filters the catalog.
    Browse {
        /// Do not fetch product pages.
        #[arg(long)]
        no_scrape: bool,
    },

    /// Load the catalog and report how many products it has, or why it failed.
    Check,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.overrides.apply(config::load_or_init()?);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Render {
                query,
                out,
                no_scrape,
            } => run_render(&cfg, &query, out.as_deref(), no_scrape).await?,
            CliCommand::Search { query } => run_search(&cfg, &query).await?,
            CliCommand::Details { index } => run_details(&cfg, index).await?,
            CliCommand::Scrape { url } => run_scrape(&cfg, &url).await?,
            CliCommand::Browse { no_scrape } => run_browse(&cfg, no_scrape).await?,
            CliCommand::Check => run_check(&cfg).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
