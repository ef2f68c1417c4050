//! U Sports statistics
//!
//! Retrieves standings, team statistics and player statistics for Canadian
//! university sports from the league's statistics site. Pages are fetched
//! concurrently, their HTML tables are parsed into partial records, merged
//! by entity, and coerced into rectangular [`Dataset`]s.
//!
//! ```no_run
//! use usports_stats::{AppConfig, Sport, StatsService};
//!
//! # async fn run() -> usports_stats::StatsResult<()> {
//! let service = StatsService::new(AppConfig::load()?)?;
//! let teams = service.teams_combined(Sport::Basketball, Some("w"), "regular").await?;
//! println!("{}", teams.to_json());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::StatsService;
pub use domain::{Dataset, Gender, SeasonPhase, Sport, Value};
pub use error::{StatsError, StatsResult};
pub use infrastructure::{AppConfig, init_logging, init_logging_with_config};
