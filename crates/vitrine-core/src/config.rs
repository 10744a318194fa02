use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `cors_proxy` from the config file.
pub const CORS_PROXY_ENV: &str = "VITRINE_CORS_PROXY";

/// Global configuration loaded from `~/.config/vitrine/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Catalog location: a local JSON file path or an http(s) URL.
    pub catalog: String,
    /// Directory (or URL prefix) that local product images are served from.
    pub image_dir: String,
    /// Optional relay prefix; the product link is URL-encoded and appended to it.
    #[serde(default)]
    pub cors_proxy: Option<String>,
    /// Optional User-Agent sent with product page requests.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional connect timeout in seconds (None = libcurl default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            catalog: "src/db/products.json".to_string(),
            image_dir: "src/img".to_string(),
            cors_proxy: None,
            user_agent: None,
            connect_timeout_secs: None,
        }
    }
}

impl VitrineConfig {
    /// Applies `VITRINE_CORS_PROXY` if set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(proxy) = std::env::var(CORS_PROXY_ENV) {
            self.apply_proxy_override(&proxy);
        }
        self
    }

    fn apply_proxy_override(&mut self, proxy: &str) {
        let proxy = proxy.trim();
        if !proxy.is_empty() {
            self.cors_proxy = Some(proxy.to_string());
        }
    }

    /// The proxy prefix, treating an empty string as absent.
    pub fn proxy(&self) -> Option<&str> {
        self.cors_proxy.as_deref().filter(|p| !p.trim().is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vitrine")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VitrineConfig> {
    let path = config_path()?;
    load_or_init_at(&path).map(VitrineConfig::with_env_overrides)
}

/// Same as [`load_or_init`] for an explicit path, without env overrides.
pub fn load_or_init_at(path: &Path) -> Result<VitrineConfig> {
    if !path.exists() {
        let default_cfg = VitrineConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VitrineConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = VitrineConfig::default();
        assert_eq!(cfg.catalog, "src/db/products.json");
        assert_eq!(cfg.image_dir, "src/img");
        assert!(cfg.cors_proxy.is_none());
        assert!(cfg.proxy().is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            catalog = "https://shop.example.com/products.json"
            image_dir = "/static/img"
            cors_proxy = "https://api.allorigins.win/raw?url="
            connect_timeout_secs = 10
        "#;
        let cfg: VitrineConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.catalog, "https://shop.example.com/products.json");
        assert_eq!(cfg.image_dir, "/static/img");
        assert_eq!(cfg.proxy(), Some("https://api.allorigins.win/raw?url="));
        assert_eq!(cfg.connect_timeout_secs, Some(10));
        assert!(cfg.user_agent.is_none());
    }

    #[test]
    fn blank_proxy_is_treated_as_absent() {
        let cfg = VitrineConfig {
            cors_proxy: Some("  ".to_string()),
            ..VitrineConfig::default()
        };
        assert!(cfg.proxy().is_none());
    }

    #[test]
    fn proxy_override_ignores_empty_value() {
        let mut cfg = VitrineConfig::default();
        cfg.apply_proxy_override("");
        assert!(cfg.cors_proxy.is_none());
        cfg.apply_proxy_override(" https://relay.example/?u= ");
        assert_eq!(cfg.proxy(), Some("https://relay.example/?u="));
    }

    #[test]
    fn load_or_init_at_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, VitrineConfig::default());
        assert!(path.exists());

        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again, cfg);
    }

    #[test]
    fn load_or_init_at_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "catalog = [").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
