//! Configuration Module
//!
//! Handles loading gateway configuration from environment variables.

use std::env;

/// Default upstream API root.
pub const DEFAULT_HOSTAWAY_BASE_URL: &str = "https://api.hostaway.com/v1";

/// Default Redis location when `REDIS_URL` is unset.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Which cache store backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Remote Redis server
    Redis,
    /// In-process store, lost on restart
    Memory,
}

impl CacheBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Redis connection string, None when `REDIS_URL` is unset
    pub redis_url: Option<String>,
    /// Cache store selection
    pub cache_backend: CacheBackend,
    /// Hostaway account id, sent as `client_id`
    pub hostaway_account_id: Option<String>,
    /// Hostaway API key, sent as `client_secret`
    pub hostaway_api_key: Option<String>,
    /// Hostaway API root
    pub hostaway_base_url: String,
    /// Requests allowed per client per window
    pub rate_limit_max: u32,
    /// Rate limit window in seconds
    pub rate_limit_window_secs: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `REDIS_URL` - Redis connection string (default: `redis://127.0.0.1:6379`)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `HOSTAWAY_ACCOUNT_ID` / `HOSTAWAY_API_KEY` - upstream credentials
    /// - `HOSTAWAY_BASE_URL` - upstream root (default: `https://api.hostaway.com/v1`)
    /// - `RATE_LIMIT_MAX` - requests per window (default: 100)
    /// - `RATE_LIMIT_WINDOW_SECS` - window length (default: 60)
    /// - `CLEANUP_INTERVAL` - cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            redis_url: non_empty_var("REDIS_URL"),
            cache_backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| CacheBackend::parse(&v))
                .unwrap_or(defaults.cache_backend),
            hostaway_account_id: non_empty_var("HOSTAWAY_ACCOUNT_ID"),
            hostaway_api_key: non_empty_var("HOSTAWAY_API_KEY"),
            hostaway_base_url: non_empty_var("HOSTAWAY_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.hostaway_base_url),
            rate_limit_max: parse_var("RATE_LIMIT_MAX").unwrap_or(defaults.rate_limit_max),
            rate_limit_window_secs: parse_var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or(defaults.rate_limit_window_secs),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Redis URL to connect to, falling back to the local default.
    pub fn redis_url_or_default(&self) -> &str {
        self.redis_url.as_deref().unwrap_or(DEFAULT_REDIS_URL)
    }

    /// Presence of each secret-bearing variable, for startup logging.
    pub fn presence_report(&self) -> [(&'static str, &'static str); 3] {
        [
            ("REDIS_URL", presence(&self.redis_url)),
            ("HOSTAWAY_ACCOUNT_ID", presence(&self.hostaway_account_id)),
            ("HOSTAWAY_API_KEY", presence(&self.hostaway_api_key)),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            redis_url: None,
            cache_backend: CacheBackend::Redis,
            hostaway_account_id: None,
            hostaway_api_key: None,
            hostaway_base_url: DEFAULT_HOSTAWAY_BASE_URL.to_string(),
            rate_limit_max: 100,
            rate_limit_window_secs: 60,
            cleanup_interval: 60,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "Set"
    } else {
        "Missing"
    }
}
