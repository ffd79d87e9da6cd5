//! Application configuration loaded from environment variables.
//!
//! Every endpoint base is overridable so tests can point the services at a
//! local mock server. Defaults match the live GOG endpoints.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Auth endpoint base (token exchange)
    pub auth_url: String,
    /// Catalog data base (product and build documents)
    pub catalog_url: String,
    /// Gameplay endpoint base (achievements)
    pub gameplay_url: String,
    /// Embed endpoint base (owned games)
    pub embed_url: String,
    /// Static images base (artwork rewriting)
    pub images_url: String,
    /// Locale sent with achievement requests (`X-Gog-Lc`)
    pub locale: String,
    /// Directory holding the cache documents (auths/products/catalog)
    pub cache_dir: PathBuf,
    /// Debounce delay before pending catalog entries are persisted
    pub flush_delay_ms: u64,
    /// Refresh-token override; skips the registry lookup when set
    pub refresh_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            auth_url: env_or("GOG_AUTH_URL", "https://auth.gog.com"),
            catalog_url: env_or("GOG_CATALOG_URL", "https://www.gogdb.org/data"),
            gameplay_url: env_or("GOG_GAMEPLAY_URL", "https://gameplay.gog.com"),
            embed_url: env_or("GOG_EMBED_URL", "https://embed.gog.com"),
            images_url: env_or("GOG_IMAGES_URL", "https://images.gog-statics.com"),
            locale: env_or("GOG_LOCALE", "en"),
            cache_dir: match env::var("GALAXY_CACHE_DIR") {
                Ok(dir) => PathBuf::from(dir),
                Err(_) => default_cache_dir()?,
            },
            flush_delay_ms: env::var("GALAXY_FLUSH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            refresh_token: env::var("GOG_REFRESH_TOKEN").ok(),
        })
    }

    /// Config for tests: every endpoint points at `base_url`, cache files go
    /// to `cache_dir`, and the debounce delay is short.
    pub fn test_default(base_url: &str, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            auth_url: base_url.to_string(),
            catalog_url: base_url.to_string(),
            gameplay_url: base_url.to_string(),
            embed_url: base_url.to_string(),
            images_url: "https://images.gog-statics.com".to_string(),
            locale: "en".to_string(),
            cache_dir: cache_dir.into(),
            flush_delay_ms: 50,
            refresh_token: Some("test_refresh_token".to_string()),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Cache files live next to the executable, matching the desktop build.
fn default_cache_dir() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(|_| ConfigError::CacheDir)?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .ok_or(ConfigError::CacheDir)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine cache directory (set GALAXY_CACHE_DIR)")]
    CacheDir,
}
