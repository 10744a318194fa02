//! Product page meta scraping (Open Graph / Twitter Card fields).
//!
//! The scraper only reports: network, status and abort failures are returned
//! to the caller, which decides what the card shows.

mod extract;

pub use extract::extract_meta;

use crate::config::VitrineConfig;
use crate::fetch::{self, FetchError, FetchOptions};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Fields scraped from a product page. Not cached, not shared across cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaInfo {
    pub image: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
}

impl MetaInfo {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.price.is_none() && self.description.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl ScrapeError {
    pub fn is_aborted(&self) -> bool {
        match self {
            ScrapeError::Fetch { source, .. } => source.is_aborted(),
        }
    }
}

/// How product pages are reached.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Relay prefix; the encoded link is appended to it.
    pub cors_proxy: Option<String>,
    pub user_agent: Option<String>,
    pub connect_timeout: Option<Duration>,
}

impl From<&VitrineConfig> for ScrapeOptions {
    fn from(cfg: &VitrineConfig) -> Self {
        Self {
            cors_proxy: cfg.proxy().map(str::to_string),
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Source of [`MetaInfo`] for a product link. Blocking.
pub trait MetaSource: Send + Sync {
    fn fetch_meta(
        &self,
        link: &str,
        abort: &Arc<AtomicBool>,
    ) -> Result<MetaInfo, ScrapeError>;
}

/// Production [`MetaSource`]: libcurl GET, optionally through the proxy.
#[derive(Debug, Clone, Default)]
pub struct CurlMetaSource {
    opts: ScrapeOptions,
}

impl CurlMetaSource {
    pub fn new(opts: ScrapeOptions) -> Self {
        Self { opts }
    }
}

impl MetaSource for CurlMetaSource {
    fn fetch_meta(
        &self,
        link: &str,
        abort: &Arc<AtomicBool>,
    ) -> Result<MetaInfo, ScrapeError> {
        let target = target_url(link, self.opts.cors_proxy.as_deref());
        let fetch_opts = FetchOptions {
            user_agent: self.opts.user_agent.clone(),
            connect_timeout: self.opts.connect_timeout,
            ..FetchOptions::default()
        };
        tracing::debug!(link, target = %target, "scraping product page");
        let body = fetch::http_get(&target, &fetch_opts, Some(abort)).map_err(|source| {
            ScrapeError::Fetch {
                url: target.clone(),
                source,
            }
        })?;
        Ok(extract_meta(&body.text()))
    }
}

/// Scrapes `link`. A missing or empty link yields `Ok(None)` without any request.
pub fn scrape(
    source: &dyn MetaSource,
    link: Option<&str>,
    abort: &Arc<AtomicBool>,
) -> Result<Option<MetaInfo>, ScrapeError> {
    match link.filter(|l| !l.is_empty()) {
        Some(link) => source.fetch_meta(link, abort).map(Some),
        None => Ok(None),
    }
}

/// The URL actually requested: `proxy + encodeURIComponent(link)`, or `link`.
pub fn target_url(link: &str, proxy: Option<&str>) -> String {
    match proxy.filter(|p| !p.is_empty()) {
        Some(proxy) => format!("{}{}", proxy, encode_uri_component(link)),
        None => link.to_string(),
    }
}

/// Percent-encodes every byte except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
