use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Complete connector configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

/// HTTP surface the host talks to
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Email provider REST API
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Campaign list pages fetched before giving up on a provider that never
    /// returns an empty page
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_base_url() -> String {
    "https://api.freshmail.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_pages() -> u32 {
    1000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            max_pages: default_max_pages(),
        }
    }
}

impl UpstreamConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Cache lifetimes (seconds)
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_list_ttl")]
    pub list_ttl_seconds: u64,
    #[serde(default = "default_report_ttl")]
    pub report_ttl_seconds: u64,
    /// How often the binary sweeps expired entries
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

fn default_list_ttl() -> u64 {
    60
}

fn default_report_ttl() -> u64 {
    3600
}

fn default_sweep_interval() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_ttl_seconds: default_list_ttl(),
            report_ttl_seconds: default_report_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl CacheConfig {
    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_seconds)
    }

    pub fn report_ttl(&self) -> Duration {
        Duration::from_secs(self.report_ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Label language used when a request names none or an unknown one
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

impl ConnectorConfig {
    /// Overlay `MAILSTATS_*` env vars. Values that fail to parse are ignored.
    pub fn apply_env(mut self) -> Self {
        if let Some(n) = env_parse("MAILSTATS_PORT") {
            self.server.port = n;
        }
        if let Ok(v) = std::env::var("MAILSTATS_BASE_URL") {
            if !v.is_empty() {
                self.upstream.base_url = v;
            }
        }
        if let Some(n) = env_parse("MAILSTATS_REQUEST_TIMEOUT_SECONDS") {
            self.upstream.request_timeout_seconds = n;
        }
        if let Some(n) = env_parse("MAILSTATS_MAX_PAGES") {
            self.upstream.max_pages = n;
        }
        if let Some(n) = env_parse("MAILSTATS_LIST_TTL_SECONDS") {
            self.cache.list_ttl_seconds = n;
        }
        if let Some(n) = env_parse("MAILSTATS_REPORT_TTL_SECONDS") {
            self.cache.report_ttl_seconds = n;
        }
        if let Some(n) = env_parse("MAILSTATS_SWEEP_INTERVAL_SECONDS") {
            self.cache.sweep_interval_seconds = n;
        }
        if let Ok(v) = std::env::var("MAILSTATS_DEFAULT_LANGUAGE") {
            if !v.is_empty() {
                self.locale.default_language = v;
            }
        }
        self
    }

    /// Load from the TOML file named by `MAILSTATS_CONFIG` (defaults when
    /// unset), then overlay env vars.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var("MAILSTATS_CONFIG") {
            Ok(path) if !path.is_empty() => load_config(&path)?,
            _ => Self::default(),
        };
        Ok(base.apply_env())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Load configuration from TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConnectorConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ConnectorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}
