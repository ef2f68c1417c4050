//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional `usports.toml`
//! in the configuration directory, then `USPORTS__*` environment variables
//! (`USPORTS__HTTP__TIMEOUT_SECONDS=30` sets `http.timeout_seconds`).

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::domain::Sport;

/// Name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "usports.toml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "USPORTS";

/// Default configuration values
pub mod defaults {
    /// Root of the statistics site
    pub const BASE_URL: &str = "https://universitysport.prestosports.com/sports";

    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 60;

    /// Maximum page fetches in flight at once
    pub const MAX_CONCURRENT_REQUESTS: usize = 16;

    /// Season identifier used when no override is configured
    pub const SEASON: &str = "2024-25";

    pub const LOG_LEVEL: &str = "info";

    /// Browser user agents rotated across requests
    pub const USER_AGENTS: [&str; 4] = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    ];
}

/// What a query does when some of its pages fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any page failure aborts the remaining pages and fails the query
    #[default]
    AllOrNothing,
    /// Failed pages are logged and left out
    BestEffort,
}

/// HTTP fetching settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_concurrent_requests: usize,
    pub user_agents: Vec<String>,
    pub failure_policy: FailurePolicy,
}

impl HttpConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_concurrent_requests: defaults::MAX_CONCURRENT_REQUESTS,
            user_agents: defaults::USER_AGENTS.iter().map(ToString::to_string).collect(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Also write logs to this file
    pub file: Option<String>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            file: None,
            module_filters: HashMap::new(),
        }
    }
}

/// Season identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Season id such as `2024-25`
    pub current: String,
    /// Per-sport season ids keyed by sport name (`ice_hockey`, `football`, ...)
    pub overrides: HashMap<String, String>,
}

impl SeasonConfig {
    pub fn season_for(&self, sport: Sport) -> &str {
        self.overrides
            .get(sport.as_str())
            .map_or(self.current.as_str(), String::as_str)
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            current: defaults::SEASON.to_string(),
            overrides: HashMap::new(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub season: SeasonConfig,
}

impl AppConfig {
    /// Load from the current directory and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load from `config_dir/usports.toml` (if present) and the environment
    pub fn load_from(config_dir: &Path) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::from(config_dir.join(CONFIG_FILE_NAME)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.http.base_url, defaults::BASE_URL);
        assert_eq!(config.http.timeout(), Duration::from_secs(60));
        assert_eq!(config.http.failure_policy, FailurePolicy::AllOrNothing);
        assert_eq!(config.season.season_for(Sport::Soccer), "2024-25");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.http.max_concurrent_requests, defaults::MAX_CONCURRENT_REQUESTS);
        assert_eq!(config.season.current, defaults::SEASON);
    }

    #[test]
    fn test_load_from_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[http]
timeout_seconds = 15
failure_policy = "best_effort"

[season]
current = "2023-24"

[season.overrides]
football = "2024-25"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.http.timeout_seconds, 15);
        assert_eq!(config.http.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(config.http.base_url, defaults::BASE_URL);
        assert_eq!(config.season.season_for(Sport::Basketball), "2023-24");
        assert_eq!(config.season.season_for(Sport::Football), "2024-25");
    }
}
