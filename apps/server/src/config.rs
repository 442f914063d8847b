use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use tsx_dividends_core::{
    constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_FETCH_WINDOW_DAYS},
    CacheSettings,
};
use tsx_dividends_market_data::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub upstream_url: String,
    pub user_agent: String,
    pub fetch_window_days: u32,
    /// Zero keeps the listing until an explicit refresh
    pub cache_ttl_secs: u64,
    pub token_timeout: Duration,
    pub data_timeout: Duration,
    pub request_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            upstream_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_window_days: DEFAULT_FETCH_WINDOW_DAYS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS as u64,
            token_timeout: Duration::from_millis(5000),
            data_timeout: Duration::from_millis(10000),
            request_timeout: Duration::from_millis(30000),
            cors_allow: vec!["*".to_string()],
            static_dir: "static".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("TSX_LISTEN_ADDR") {
            Ok(addr) => addr.trim().to_string(),
            Err(_) => format!("0.0.0.0:{}", env_or("PORT", "8080").trim()),
        };
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address '{}'", listen_addr))?;

        let cors_allow = env_or("TSX_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            upstream_url: env_or("TSX_UPSTREAM_URL", &defaults.upstream_url),
            user_agent: env_or("TSX_USER_AGENT", &defaults.user_agent),
            fetch_window_days: env_parse("TSX_FETCH_WINDOW_DAYS", defaults.fetch_window_days),
            cache_ttl_secs: env_parse("TSX_CACHE_TTL_SECS", defaults.cache_ttl_secs),
            token_timeout: Duration::from_millis(env_parse("TSX_TOKEN_TIMEOUT_MS", 5000)),
            data_timeout: Duration::from_millis(env_parse("TSX_DATA_TIMEOUT_MS", 10000)),
            request_timeout: Duration::from_millis(env_parse("TSX_REQUEST_TIMEOUT_MS", 30000)),
            cors_allow,
            static_dir: env_or("TSX_STATIC_DIR", &defaults.static_dir),
        })
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.upstream_url.clone(),
            user_agent: self.user_agent.clone(),
            token_timeout: self.token_timeout,
            data_timeout: self.data_timeout,
        }
    }

    pub fn cache_settings(&self) -> CacheSettings {
        let ttl = match self.cache_ttl_secs {
            0 => None,
            secs => Some(chrono::Duration::seconds(secs.min(i64::MAX as u64) as i64)),
        };
        CacheSettings {
            fetch_window_days: self.fetch_window_days,
            ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_settings_zero_ttl_disables_expiry() {
        let config = Config {
            cache_ttl_secs: 0,
            ..Config::default()
        };
        assert!(config.cache_settings().ttl.is_none());

        let config = Config::default();
        assert_eq!(
            config.cache_settings().ttl,
            Some(chrono::Duration::seconds(3600))
        );
        assert_eq!(config.cache_settings().fetch_window_days, 60);
    }

    #[test]
    fn provider_config_carries_upstream_settings() {
        let config = Config {
            upstream_url: "http://localhost:9999".to_string(),
            token_timeout: Duration::from_millis(250),
            ..Config::default()
        };
        let provider = config.provider_config();
        assert_eq!(provider.base_url, "http://localhost:9999");
        assert_eq!(provider.token_timeout, Duration::from_millis(250));
        assert_eq!(provider.data_timeout, Duration::from_secs(10));
    }
}
