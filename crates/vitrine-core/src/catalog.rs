//! Product records and the catalog loader.
//!
//! The loader never fails from the caller's point of view: a missing file,
//! a bad status or malformed JSON all degrade to an empty catalog.

use crate::fetch::{self, FetchError, FetchOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Title used for products without a name.
pub const UNNAMED_PRODUCT: &str = "Unnamed product";

/// One catalog entry. Every field is optional in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Bare file name under the configured image directory.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Local image file name, ignoring empty strings.
    pub fn local_image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }

    /// Name shown on cards and listings; empty or missing names get a placeholder.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(UNNAMED_PRODUCT)
    }

    /// Product link, ignoring empty strings.
    pub fn link(&self) -> Option<&str> {
        non_empty(self.link.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Immutable catalog shared between the filter and the views.
pub type Catalog = Arc<[Product]>;

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(s: &str) -> Self {
        let lower = s.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(s.trim().to_string())
        } else {
            CatalogSource::Path(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Path(p) => write!(f, "{}", p.display()),
            CatalogSource::Url(u) => write!(f, "{}", u),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a catalog document: a JSON array of product objects.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Loads the catalog, reporting the failure.
///
/// Blocking for URL sources; call from `spawn_blocking` in async code.
pub fn try_load_catalog(source: &CatalogSource) -> Result<Vec<Product>, CatalogError> {
    let bytes = match source {
        CatalogSource::Path(path) => std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?,
        CatalogSource::Url(url) => {
            fetch::http_get(url, &FetchOptions::no_cache(), None)
                .map_err(|source| CatalogError::Fetch {
                    url: url.clone(),
                    source,
                })?
                .bytes
        }
    };
    parse_catalog(&bytes)
}

/// Loads the catalog; any failure is logged and yields an empty catalog.
pub fn load_catalog(source: &CatalogSource) -> Catalog {
    match try_load_catalog(source) {
        Ok(products) => {
            tracing::debug!(source = %source, count = products.len(), "catalog loaded");
            products.into()
        }
        Err(e) => {
            tracing::error!(source = %source, "failed to load catalog: {}", e);
            Vec::new().into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_catalog_missing_fields_default_to_none() {
        let json = r#"[
            {"name": "Café Premium", "store": "Loja A", "link": "https://a.example/p/1", "image": "cafe.png"},
            {"name": "Chá"},
            {}
        ]"#
        .as_bytes();
        let products = parse_catalog(json).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name.as_deref(), Some("Café Premium"));
        assert_eq!(products[0].local_image(), Some("cafe.png"));
        assert_eq!(products[1].store, None);
        assert_eq!(products[2], Product::default());
    }

    #[test]
    fn parse_catalog_ignores_unknown_fields() {
        let products = parse_catalog(br#"[{"name": "X", "sku": 12}]"#).unwrap();
        assert_eq!(products[0].name.as_deref(), Some("X"));
    }

    #[test]
    fn parse_catalog_rejects_non_array() {
        assert!(matches!(
            parse_catalog(br#"{"name": "X"}"#),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let p = Product {
            link: Some(String::new()),
            image: Some(String::new()),
            ..Product::default()
        };
        assert!(p.link().is_none());
        assert!(p.local_image().is_none());
    }

    #[test]
    fn display_name_falls_back_for_empty_and_missing() {
        let named = Product {
            name: Some("Mel".to_string()),
            ..Product::default()
        };
        let blank = Product {
            name: Some(String::new()),
            ..Product::default()
        };
        assert_eq!(named.display_name(), "Mel");
        assert_eq!(blank.display_name(), UNNAMED_PRODUCT);
        assert_eq!(Product::default().display_name(), UNNAMED_PRODUCT);
    }

    #[test]
    fn catalog_source_parse() {
        assert_eq!(
            CatalogSource::parse("https://x.example/products.json"),
            CatalogSource::Url("https://x.example/products.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("HTTP://x.example/p.json"),
            CatalogSource::Url("HTTP://x.example/p.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("src/db/products.json"),
            CatalogSource::Path(PathBuf::from("src/db/products.json"))
        );
    }

    #[test]
    fn load_catalog_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"[{"name": "A"}, {"name": "B"}]"#).unwrap();
        f.flush().unwrap();
        let catalog = load_catalog(&CatalogSource::Path(f.path().to_path_buf()));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].name.as_deref(), Some("B"));
    }

    #[test]
    fn load_catalog_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::Path(dir.path().join("nope.json"));
        assert!(matches!(
            try_load_catalog(&source),
            Err(CatalogError::Io { .. })
        ));
        assert!(load_catalog(&source).is_empty());
    }

    #[test]
    fn load_catalog_malformed_json_is_empty() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"[{\"name\": ").unwrap();
        f.flush().unwrap();
        assert!(load_catalog(&CatalogSource::Path(f.path().to_path_buf())).is_empty());
    }
}
