//! Basketball pages

use super::{columns, player_layout, standings_spec, team_layout, team_stats_spec};
use crate::domain::{ColumnSpec, ColumnType, Combine, Dedupe, PageGroupSpec, QuerySpec, TableSchema, TableSelection};

/// Sort orders needed to see every player on the leaderboards
const PLAYER_SORT_CATEGORIES: [&str; 16] = [
    "pts", "min", "fgp", "fgp3", "fgpt3", "ftpt", "oreb", "dreb", "treb", "ast", "to", "stl", "blk",
    "pf", "dq", "ato",
];

/// Player pages open with three season-total tables before the stat tables
const PLAYER_TABLES_START: usize = 3;

pub fn standings() -> QuerySpec {
    standings_spec(vec![
        ColumnSpec::int("games_played"),
        ColumnSpec::int("total_wins"),
        ColumnSpec::int("total_losses"),
        ColumnSpec::int("ties"),
        ColumnSpec::float("win_percentage"),
        ColumnSpec::int("total_points"),
        ColumnSpec::int("total_points_against"),
    ])
    .dropping(&["ties"])
}

pub fn team_stats() -> QuerySpec {
    team_stats_spec(team_layout(), team_tables())
}

fn team_tables() -> Vec<TableSchema> {
    vec![
        TableSchema::new(vec![
            ColumnSpec::made("field_goal_made"),
            ColumnSpec::float("field_goal_percentage"),
            ColumnSpec::made("three_pointers_made"),
            ColumnSpec::float("three_point_percentage"),
            ColumnSpec::made("free_throws_made"),
            ColumnSpec::float("free_throw_percentage"),
            ColumnSpec::float("points_per_game"),
        ]),
        TableSchema::new(columns(
            &[
                "offensive_rebounds_per_game",
                "defensive_rebounds_per_game",
                "total_rebounds_per_game",
                "rebound_margin",
            ],
            ColumnSpec::float,
        )),
        TableSchema::new(columns(
            &["turnovers_per_game", "steals_per_game", "blocks_per_game", "assists_per_game"],
            ColumnSpec::float,
        )),
        TableSchema::new(columns(
            &["team_fouls_per_game", "offensive_efficiency", "net_efficiency"],
            ColumnSpec::float,
        )),
        TableSchema::new(vec![
            ColumnSpec::made("field_goal_made_against"),
            ColumnSpec::float("field_goal_percentage_against"),
            ColumnSpec::made("three_pointers_made_against"),
            ColumnSpec::float("three_point_percentage_against"),
            ColumnSpec::float("points_per_game_against"),
        ]),
        TableSchema::new(columns(
            &[
                "offensive_rebounds_per_game_against",
                "defensive_rebounds_per_game_against",
                "total_rebounds_per_game_against",
                "rebound_margin_against",
            ],
            ColumnSpec::float,
        )),
        TableSchema::new(columns(
            &[
                "turnovers_per_game_against",
                "steals_per_game_against",
                "blocks_per_game_against",
                "assists_per_game_against",
            ],
            ColumnSpec::float,
        )),
        TableSchema::new(columns(
            &["team_fouls_per_game_against", "defensive_efficiency", "net_efficiency_against"],
            ColumnSpec::float,
        )),
    ]
}

pub fn player_stats() -> QuerySpec {
    let group = PageGroupSpec::new(
        "players",
        TableSelection::FromStart(PLAYER_TABLES_START),
        player_layout(&[("games_played", ColumnType::Int), ("games_started", ColumnType::Int)]),
        player_tables(),
    )
    .with_variants(PLAYER_SORT_CATEGORIES.iter().map(|sort| {
        vec![
            ("pos", "sh".to_string()),
            ("r", "0".to_string()),
            ("sort", (*sort).to_string()),
        ]
    }))
    .with_key(&["player_name", "school", "games_played"]);

    QuerySpec::new(vec![group], Combine::Concat(Dedupe::Exact)).with_name_split("player_name")
}

fn player_tables() -> Vec<TableSchema> {
    vec![
        TableSchema::new(vec![
            ColumnSpec::int("minutes_played"),
            ColumnSpec::made("field_goal_made"),
            ColumnSpec::float("field_goal_percentage"),
            ColumnSpec::made("three_pointers_made"),
            ColumnSpec::float("three_pointers_percentage"),
            ColumnSpec::made("free_throws_made"),
            ColumnSpec::float("free_throws_percentage"),
            ColumnSpec::int("total_points"),
        ]),
        TableSchema::new(columns(
            &[
                "offensive_rebounds",
                "defensive_rebounds",
                "total_rebounds",
                "assists",
                "turnovers",
                "steals",
                "blocks",
            ],
            ColumnSpec::int,
        )),
        TableSchema::new(vec![
            ColumnSpec::int("personal_fouls"),
            ColumnSpec::int("disqualifications"),
            ColumnSpec::float("assist_to_turnover_ratio"),
        ]),
    ]
}
