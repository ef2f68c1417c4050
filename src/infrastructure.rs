//! Infrastructure layer - external collaborators of the pipeline
//!
//! Contains the network fetcher, HTML table parsing, text normalization,
//! configuration, logging and the static per-sport configuration data.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod normalize;
pub mod parsing;
pub mod sports;

pub use config::{AppConfig, FailurePolicy, HttpConfig, LoggingConfig, SeasonConfig};
pub use http_client::{HttpPageFetcher, PageFetcher};
pub use logging::{init_logging, init_logging_with_config};
pub use normalize::ParseOutcome;
pub use parsing::{RowParser, TableParser};
