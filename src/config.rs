use crate::feed::FixtureQuery;
use crate::error::Result;
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const DEFAULT_API_HOST: &str = "v3.football.api-sports.io";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    /// Upstream queries in priority order; earlier sources win duplicate matches
    #[serde(default = "default_sources")]
    pub sources: Vec<FixtureQuery>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the fixtures API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as `x-rapidapi-key`
    #[serde(default)]
    pub api_key: String,
    /// Sent as `x-rapidapi-host`
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum events taken from one provider response
    #[serde(default = "default_max_events")]
    pub max_events_per_source: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            api_host: default_api_host(),
            timeout_secs: default_timeout_secs(),
            max_events_per_source: default_max_events(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_max_events() -> usize {
    crate::feed::MAX_EVENTS_PER_SOURCE
}

fn default_sources() -> Vec<FixtureQuery> {
    vec![FixtureQuery::Live, FixtureQuery::TodayInPlay]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for a daily rolling log file; console only when unset
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        Self::load_with_env(config_dir.as_ref(), None)
    }

    /// `env` replaces the process environment when set
    fn load_with_env(config_dir: &Path, env: Option<Map<String, String>>) -> Result<Self> {

        let builder = Config::builder()
            // Start with default values
            .set_default("provider.base_url", DEFAULT_BASE_URL)?
            .set_default("provider.api_host", DEFAULT_API_HOST)?
            .set_default("provider.timeout_secs", default_timeout_secs() as i64)?
            .set_default(
                "provider.max_events_per_source",
                default_max_events() as i64,
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("KICKFEED_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (KICKFEED_PROVIDER__API_KEY, etc.)
            .add_source(
                Environment::with_prefix("KICKFEED")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Create a default configuration for CLI usage
    pub fn default_config() -> Self {
        Self {
            provider: ProviderConfig {
                api_key: std::env::var("API_FOOTBALL_KEY").unwrap_or_default(),
                ..ProviderConfig::default()
            },
            sources: default_sources(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.provider.api_key.trim().is_empty() {
            errors.push("provider.api_key is empty; upstream calls will be rejected".to_string());
        }

        if !(self.provider.base_url.starts_with("http://")
            || self.provider.base_url.starts_with("https://"))
        {
            errors.push(format!(
                "provider.base_url must be an http(s) URL, got '{}'",
                self.provider.base_url
            ));
        }

        if self.provider.timeout_secs == 0 {
            errors.push("provider.timeout_secs must be positive".to_string());
        }

        if self.provider.max_events_per_source == 0 {
            errors.push("provider.max_events_per_source must be positive".to_string());
        }

        if self.sources.is_empty() {
            errors.push("at least one source must be configured".to_string());
        }

        for (idx, source) in self.sources.iter().enumerate() {
            if let FixtureQuery::League { season, .. } = source {
                if *season < 1900 {
                    errors.push(format!("sources[{idx}]: season {season} is not a valid year"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
