//! Shared helpers for integration tests: a scripted page source and HTML
//! fixture builders shaped like the statistics site's tables
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use usports_stats::application::StatsService;
use usports_stats::domain::RawTable;
use usports_stats::error::FetchError;
use usports_stats::infrastructure::parsing::extract_tables;
use usports_stats::infrastructure::{AppConfig, FailurePolicy, PageFetcher};

enum Reply {
    Page(String),
    Fail,
}

/// Serves canned pages chosen by URL substring; the first matching route wins
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<(String, Reply)>,
    jitter_ms: u64,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, pattern: &str, html: String) -> Self {
        self.routes.push((pattern.to_string(), Reply::Page(html)));
        self
    }

    pub fn failing(mut self, pattern: &str) -> Self {
        self.routes.push((pattern.to_string(), Reply::Fail));
        self
    }

    /// Delays each response by up to `max_ms`, varying per URL
    pub fn with_jitter(mut self, max_ms: u64) -> Self {
        self.jitter_ms = max_ms;
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_tables(&self, url: &str) -> Result<Vec<RawTable>, FetchError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
        if self.jitter_ms > 0 {
            let delay = url.bytes().map(u64::from).sum::<u64>() % self.jitter_ms;
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let reply = self.routes.iter().find(|(pattern, _)| url.contains(pattern.as_str()));
        match reply {
            Some((_, Reply::Page(html))) => {
                let tables = extract_tables(html);
                if tables.is_empty() {
                    Err(FetchError::no_tables(url))
                } else {
                    Ok(tables)
                }
            }
            Some((_, Reply::Fail)) => Err(FetchError::status(url, 503)),
            None => Err(FetchError::no_tables(url)),
        }
    }
}

pub fn service(fetcher: Arc<ScriptedFetcher>) -> StatsService {
    StatsService::with_fetcher(AppConfig::default(), fetcher)
}

pub fn service_with_policy(fetcher: Arc<ScriptedFetcher>, policy: FailurePolicy) -> StatsService {
    let mut config = AppConfig::default();
    config.http.failure_policy = policy;
    StatsService::with_fetcher(config, fetcher)
}

pub fn document(tables: &[String]) -> String {
    format!("<html><body>\n{}\n</body></html>", tables.join("\n"))
}

fn cells(values: &[&str]) -> String {
    values.iter().map(|value| format!("<td>{value}</td>")).collect()
}

/// Header-only table, as published for a season with no games yet
pub fn empty_table() -> String {
    "<table><tr><th>Rk</th><th>Name</th></tr></table>".to_string()
}

/// Standings table: team names in marked header cells, then statistics
pub fn standings_table(rows: &[(&str, &[&str])]) -> String {
    let body: String = rows
        .iter()
        .map(|(team, stats)| {
            format!(
                "<tr><th class=\"team-name\"><a href=\"/team\">{team}</a></th>{}</tr>",
                cells(stats)
            )
        })
        .collect();
    format!("<table><tr><th>Team</th><th>GP</th></tr>{body}</table>")
}

/// Team statistics table: one header row, then rank, team, games played
/// and statistics
pub fn team_table(rows: &[(&str, &str, &[&str])]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(rank, (team, games, stats))| {
            format!(
                "<tr>{}{}</tr>",
                cells(&[(rank + 1).to_string().as_str(), *team, *games]),
                cells(stats)
            )
        })
        .collect();
    format!("<table><tr><th>Rk</th><th>Team</th><th>GP</th></tr>{body}</table>")
}

/// Player table: rank, name, school, then identity extras and statistics
pub fn player_table(rows: &[(&str, &str, &[&str])]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(rank, (name, school, rest))| {
            format!(
                "<tr>{}{}</tr>",
                cells(&[(rank + 1).to_string().as_str(), *name, *school]),
                cells(rest)
            )
        })
        .collect();
    format!("<table><tr><th>Rk</th><th>Name</th><th>Team</th></tr>{body}</table>")
}

/// Women's basketball standings for three schools
pub fn basketball_standings() -> String {
    document(&[standings_table(&[
        ("Carleton", &["10", "9", "1", "0", ".900", "800", "600"]),
        ("Ottawa", &["10", "6", "4", "0", ".600", "700", "650"]),
        ("Lakehead", &["10", "2", "8", "0", ".200", "600", "750"]),
    ])])
}

/// Women's basketball team statistics for the same three schools; the
/// games played for Carleton disagree with the standings
pub fn basketball_teams() -> String {
    const SHOOTING: &[&str] = &["300-700", "42.9%", "60-200", "30.0", "100-140", "71.4", "80.0"];
    document(&[
        team_table(&[
            ("Carleton", "8", SHOOTING),
            ("Ottawa", "10", SHOOTING),
            ("Lakehead", "10", SHOOTING),
        ]),
        team_table(&[
            ("Carleton", "8", &["12.0", "30.0", "42.0", "+8.5"]),
            ("Ottawa", "10", &["10.0", "28.0", "38.0", "+2.0"]),
            ("Lakehead", "10", &["9.0", "25.0", "34.0", "-6.0"]),
        ]),
    ])
}

/// Basketball players page: three season-total tables, then the shooting,
/// rebounding and fouls tables
pub fn basketball_players(rows: &[(&str, &str)]) -> String {
    let shooting: Vec<(&str, &str, &[&str])> = rows
        .iter()
        .map(|(name, school)| {
            (*name, *school, &["10", "9", "250", "40-90", "44.4", "10-30", "33.3", "20-25", "80.0", "110"][..])
        })
        .collect();
    let rebounding: Vec<(&str, &str, &[&str])> = rows
        .iter()
        .map(|(name, school)| (*name, *school, &["10", "9", "20", "40", "60", "25", "18", "12", "4"][..]))
        .collect();
    let fouls: Vec<(&str, &str, &[&str])> = rows
        .iter()
        .map(|(name, school)| (*name, *school, &["10", "9", "22", "1", "1.4"][..]))
        .collect();
    document(&[
        empty_table(),
        empty_table(),
        empty_table(),
        player_table(&shooting),
        player_table(&rebounding),
        player_table(&fouls),
    ])
}

/// Soccer players page: three field tables followed by two goalkeeper
/// tables. The keeper also appears on the field leaderboards.
pub fn soccer_players() -> String {
    document(&[
        player_table(&[
            ("Keeper A.", "UBC", &["12", "12", "0", "1", "1"]),
            ("Striker B.", "UBC", &["12", "11", "9", "3", "21"]),
        ]),
        player_table(&[
            ("Keeper A.", "UBC", &["12", "0", "0.0", "0", "0.0"]),
            ("Striker B.", "UBC", &["12", "40", "22.5", "20", "50.0"]),
        ]),
        player_table(&[
            ("Keeper A.", "UBC", &["12", "1", "0", "0", "0"]),
            ("Striker B.", "UBC", &["12", "2", "0", "1", "3"]),
        ]),
        player_table(&[("Keeper A.", "UBC", &["12", "12", "8", "61", ".884"])]),
        player_table(&[("Keeper A.", "UBC", &["12", "8", "2", "2", "5/1", "1080:00"])]),
    ])
}

/// Hockey players page: skater leaders, then goalie leaders
pub fn hockey_players() -> String {
    document(&[
        player_table(&[(
            "Winger C.",
            "McGill",
            &["20", "12", "10", "22", "8", "+5", "4", "1", "0", "3", "1", "1", "80"],
        )]),
        player_table(&[(
            "Goalie D.",
            "McGill",
            &["18", "17", "1050:30", "40", "2.28", "500", ".926", "12", "5", "1", ".694"],
        )]),
    ])
}
