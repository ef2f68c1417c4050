//! Logging system configuration and initialization
//!
//! Console output always goes to stderr. JSON formatting and an additional
//! log file are optional. `RUST_LOG` takes precedence over the configured
//! level; otherwise noisy HTTP and HTML parsing crates are held at `warn`.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use chrono::Utc;
use once_cell::sync::Lazy;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::{self, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub use crate::infrastructure::config::LoggingConfig;

/// Keeps the file writer alive for the lifetime of the process
static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Crates whose logs are held back unless trace is requested
const QUIET_TARGETS: [&str; 5] = ["reqwest", "hyper", "hyper_util", "html5ever", "selectors"];

/// UTC timestamps with millisecond precision
struct UtcTimeFormatter;

impl FormatTime for UtcTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Build the level filter for a configuration, ignoring `RUST_LOG`
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.to_lowercase().contains("trace") {
        for target in QUIET_TARGETS {
            filter = filter.add_directive(format!("{target}=warn").parse()?);
        }
    }
    for (module, level) in &config.module_filters {
        filter = filter.add_directive(
            format!("{module}={level}")
                .parse()
                .map_err(|e| anyhow!("Invalid filter for module '{}': {}", module, e))?,
        );
    }
    Ok(filter)
}

/// Initialize logging; fails if a global subscriber is already installed
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(config)?,
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTimeFormatter)
        .with_target(false);
    layers.push(if config.json_format {
        console.json().boxed()
    } else {
        console.boxed()
    });

    if let Some(file) = &config.file {
        layers.push(file_layer(Path::new(file), config.json_format)?);
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    info!("JSON format: {}", config.json_format);
    if let Some(file) = &config.file {
        info!("Log file: {}", file);
    }
    Ok(())
}

fn file_layer(path: &Path, json_format: bool) -> Result<BoxedLayer> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .map_err(|e| anyhow!("Failed to create log directory {}: {}", directory.display(), e))?;

    let (writer, guard) = non_blocking(rolling::never(directory, file_name));
    if let Ok(mut guards) = LOG_GUARDS.lock() {
        guards.push(guard);
    }

    let layer = fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTimeFormatter)
        .with_ansi(false);
    Ok(if json_format {
        layer.json().with_target(true).boxed()
    } else {
        layer.with_target(false).boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_filter_quiets_http_crates() {
        let filter = build_filter(&LoggingConfig::default()).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("reqwest=warn"));
        assert!(rendered.contains("html5ever=warn"));
    }

    #[test]
    fn test_trace_level_keeps_everything() {
        let config = LoggingConfig {
            level: "trace".to_string(),
            ..LoggingConfig::default()
        };
        let rendered = build_filter(&config).unwrap().to_string();
        assert!(!rendered.contains("reqwest=warn"));
    }

    #[test]
    fn test_module_filters_are_applied() {
        let mut config = LoggingConfig::default();
        config
            .module_filters
            .insert("usports_stats".to_string(), "debug".to_string());
        let rendered = build_filter(&config).unwrap().to_string();
        assert!(rendered.contains("usports_stats=debug"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggingConfig {
            level: "loud=[".to_string(),
            ..LoggingConfig::default()
        };
        assert!(build_filter(&config).is_err());
    }
}
