//! Caller-facing query surface
//!
//! Arguments arrive as strings (`"w"`, `"playoffs"`) and are validated
//! before any page is requested. Every query is independent; the service
//! holds no state between calls beyond its configuration and fetcher.

use std::sync::Arc;

use tracing::info;

use crate::application::coerce::fill_nullable;
use crate::application::orchestrator::FetchOrchestrator;
use crate::application::pipeline::QueryPipeline;
use crate::application::reconcile::{ConferenceMap, Reconciler, append_conference};
use crate::domain::{Dataset, Gender, SeasonPhase, Sport};
use crate::error::StatsResult;
use crate::infrastructure::sports::{player_stats_query, standings_query, team_stats_query};
use crate::infrastructure::{AppConfig, HttpPageFetcher, PageFetcher};

/// Validated query target: league code and season path segment
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    sport: Sport,
    code: String,
    season: String,
    phase: SeasonPhase,
}

/// Statistics queries for every supported sport
pub struct StatsService {
    config: AppConfig,
    pipeline: QueryPipeline,
}

impl StatsService {
    /// Service backed by the HTTP fetcher described by `config`
    pub fn new(config: AppConfig) -> StatsResult<Self> {
        let fetcher = HttpPageFetcher::new(config.http.clone())?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Service backed by any page source
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let orchestrator = FetchOrchestrator::new(
            fetcher,
            config.http.max_concurrent_requests,
            config.http.failure_policy,
        );
        let pipeline = QueryPipeline::new(orchestrator, &config.http.base_url);
        Self { config, pipeline }
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    fn target(&self, sport: Sport, gender: Option<&str>, season: &str) -> StatsResult<Target> {
        let gender = gender.map(str::parse::<Gender>).transpose()?;
        let phase: SeasonPhase = season.parse()?;
        let code = sport.code(gender)?;
        Ok(Target {
            sport,
            code,
            season: phase.url_fragment(self.config.season.season_for(sport)),
            phase,
        })
    }

    async fn fetch_standings(&self, target: &Target) -> StatsResult<Dataset> {
        self.pipeline
            .run(&standings_query(target.sport), &target.code, &target.season)
            .await
    }

    async fn fetch_team_stats(&self, target: &Target) -> StatsResult<Dataset> {
        self.pipeline
            .run(&team_stats_query(target.sport), &target.code, &target.season)
            .await
    }

    /// Regular-season standings with a `conference` column
    pub async fn standings(&self, sport: Sport, gender: Option<&str>) -> StatsResult<Dataset> {
        let target = self.target(sport, gender, SeasonPhase::Regular.as_str())?;
        info!("Fetching {} standings", target.code);

        let mut standings = self.fetch_standings(&target).await?;
        fill_nullable(&mut standings, &standings_query(sport));
        append_conference(&mut standings, &ConferenceMap::for_sport(sport));
        Ok(standings)
    }

    /// Team performance statistics with a `conference` column
    pub async fn team_stats(&self, sport: Sport, gender: Option<&str>, season: &str) -> StatsResult<Dataset> {
        let target = self.target(sport, gender, season)?;
        info!("Fetching {} {} team stats", target.code, target.phase);

        let mut stats = self.fetch_team_stats(&target).await?;
        append_conference(&mut stats, &ConferenceMap::for_sport(sport));
        Ok(stats)
    }

    pub async fn player_stats(&self, sport: Sport, gender: Option<&str>, season: &str) -> StatsResult<Dataset> {
        let target = self.target(sport, gender, season)?;
        info!("Fetching {} {} player stats", target.code, target.phase);

        self.pipeline
            .run(&player_stats_query(sport), &target.code, &target.season)
            .await
    }

    /// Standings joined with team statistics
    ///
    /// A blank standings games-played cell takes the statistics value.
    /// Playoffs and championships have no standings; their result is the
    /// team statistics alone. A `conference` column is appended either way.
    pub async fn teams_combined(&self, sport: Sport, gender: Option<&str>, season: &str) -> StatsResult<Dataset> {
        let target = self.target(sport, gender, season)?;
        info!("Fetching {} {} combined team data", target.code, target.phase);

        let mut combined = if target.phase.has_standings() {
            let (standings, stats) =
                tokio::try_join!(self.fetch_standings(&target), self.fetch_team_stats(&target))?;
            let mut combined = Reconciler::new().reconcile(&standings, &stats);
            fill_nullable(&mut combined, &standings_query(sport));
            combined
        } else {
            self.fetch_team_stats(&target).await?
        };
        append_conference(&mut combined, &ConferenceMap::for_sport(sport));
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTable;
    use crate::error::{FetchError, StatsError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for CountingFetcher {
        async fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::no_tables(url))
        }
    }

    fn service() -> (StatsService, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher::default());
        (StatsService::with_fetcher(AppConfig::default(), fetcher.clone()), fetcher)
    }

    #[tokio::test]
    async fn test_invalid_gender_fails_before_fetching() {
        let (service, fetcher) = service();

        let error = service
            .team_stats(Sport::Basketball, Some("x"), "regular")
            .await
            .unwrap_err();

        assert!(error.is_invalid_argument());
        assert!(error.to_string().contains("m, men, w, women"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_season_lists_options() {
        let (service, fetcher) = service();

        let error = service
            .player_stats(Sport::Soccer, Some("w"), "preseason")
            .await
            .unwrap_err();

        assert!(error.to_string().contains("regular, playoffs, championship"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_gender_is_rejected() {
        let (service, _) = service();
        let error = tokio_test::assert_err!(tokio_test::block_on(service.standings(Sport::IceHockey, None)));
        assert!(matches!(error, StatsError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces_as_fetch_error() {
        let (service, fetcher) = service();

        let error = service.team_stats(Sport::Football, None, "Regular").await.unwrap_err();

        assert!(error.is_fetch());
        assert!(fetcher.calls.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_target_uses_season_override() {
        let mut config = AppConfig::default();
        config.season.overrides.insert("football".to_string(), "2023-24".to_string());
        let service = StatsService::with_fetcher(config, Arc::new(CountingFetcher::default()));

        let target = service.target(Sport::Football, None, "championship").unwrap();

        assert_eq!(target.code, "fball");
        assert_eq!(target.season, "2023-24c");
    }
}
