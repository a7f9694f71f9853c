use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_ANILIST_URL: &str = "https://graphql.anilist.co";

/// Runtime settings for the engine, read from the environment
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Remote catalog GraphQL endpoint
    pub anilist_url: String,
    /// Client-side pacing for the remote catalog
    pub anilist_requests_per_second: f64,
    pub anilist_burst: u32,
    /// Inventory backend GraphQL endpoint, pulls are not committed without it
    pub inventory_url: Option<String>,
    pub inventory_secret: Option<String>,
    /// Directory holding builtin manifests (`*.json`)
    pub packs_dir: Option<PathBuf>,
    pub gacha_enabled: bool,
    pub search_max_results: usize,
    /// Cache remote records by id
    pub cache_remote: bool,
    /// How long a cached remote record stays fresh
    pub cache_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            anilist_url: DEFAULT_ANILIST_URL.to_string(),
            // AniList: 30 req/min (degraded state) = 0.5 req/sec
            anilist_requests_per_second: 0.5,
            anilist_burst: 2,
            inventory_url: None,
            inventory_secret: None,
            packs_dir: None,
            gacha_enabled: true,
            search_max_results: 1,
            cache_remote: false,
            cache_ttl_secs: 3600,
        }
    }
}

impl EngineConfig {
    /// Load `.env` (if any) and read every setting, falling back to defaults
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            anilist_url: env::var("ANILIST_URL").unwrap_or(defaults.anilist_url),
            anilist_requests_per_second: parse_var("ANILIST_RPS")?
                .unwrap_or(defaults.anilist_requests_per_second),
            anilist_burst: parse_var("ANILIST_BURST")?.unwrap_or(defaults.anilist_burst),
            inventory_url: env::var("INVENTORY_URL").ok(),
            inventory_secret: env::var("INVENTORY_SECRET").ok(),
            packs_dir: env::var("PACKS_DIR").ok().map(PathBuf::from),
            gacha_enabled: parse_var("GACHA_ENABLED")?.unwrap_or(defaults.gacha_enabled),
            search_max_results: parse_var("SEARCH_MAX_RESULTS")?
                .unwrap_or(defaults.search_max_results),
            cache_remote: parse_var("CACHE_REMOTE")?.unwrap_or(defaults.cache_remote),
            cache_ttl_secs: parse_var("CACHE_TTL_SECS")?.unwrap_or(defaults.cache_ttl_secs),
        }
        .validated()?)
    }

    fn validated(self) -> AppResult<Self> {
        if self.anilist_requests_per_second <= 0.0 {
            return Err(AppError::ConfigError(
                "ANILIST_RPS must be greater than zero".to_string(),
            ));
        }

        if self.search_max_results == 0 {
            return Err(AppError::ConfigError(
                "SEARCH_MAX_RESULTS must be at least 1".to_string(),
            ));
        }

        if self.cache_remote && self.cache_ttl_secs == 0 {
            return Err(AppError::ConfigError(
                "CACHE_TTL_SECS must be at least 1 when CACHE_REMOTE is set".to_string(),
            ));
        }

        Ok(self)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::ConfigError(format!("Invalid value for {}: '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}
