//! Soccer pages
//!
//! Player pages list field players and goalkeepers in separate trailing
//! tables. Goalkeeper pages are processed first so a keeper who also shows
//! up on a field leaderboard keeps the `goalie` position.

use super::{columns, player_layout, position_sort_variants, standings_spec, team_layout, team_stats_spec};
use crate::domain::{
    ColumnSpec, ColumnType, Combine, Dedupe, PageGroupSpec, QuerySpec, TableSchema, TableSelection,
};

const FIELD_SORT_CATEGORIES: [(&str, &str); 7] = [
    ("sc", "p"),
    ("sc", "g"),
    ("sc", "a"),
    ("sh", "sh"),
    ("sh", "sog"),
    ("ms", "yc"),
    ("ms", "gw"),
];

const GOALIE_SORT_CATEGORIES: [(&str, &str); 4] = [("g", "sv"), ("g", "ga"), ("gext", "gow"), ("gext", "gm")];

/// Field tables sit fifth to third from the end, goalie tables last
const FIELD_TABLES_FROM_END: usize = 5;
const GOALIE_TABLES_FROM_END: usize = 2;

pub fn standings() -> QuerySpec {
    standings_spec(columns(
        &[
            "games_played",
            "total_wins",
            "total_losses",
            "ties",
            "goals_for",
            "goals_against",
            "points",
        ],
        ColumnSpec::int,
    ))
}

pub fn team_stats() -> QuerySpec {
    team_stats_spec(
        team_layout(),
        vec![
            TableSchema::new(vec![
                ColumnSpec::int("shots"),
                ColumnSpec::int("goals"),
                ColumnSpec::float("goals_per_game"),
                ColumnSpec::int("assists"),
                ColumnSpec::int("points"),
                ColumnSpec::float("shot_percentage"),
                ColumnSpec::float("shots_per_game"),
            ]),
            TableSchema::new(vec![
                ColumnSpec::int("goals_against"),
                ColumnSpec::float("goals_against_average"),
                ColumnSpec::int("saves"),
                ColumnSpec::int("shutouts"),
            ]),
            TableSchema::new(columns(&["yellow_cards", "red_cards", "corner_kicks"], ColumnSpec::int)),
        ],
    )
}

fn goalie_tables() -> Vec<TableSchema> {
    vec![
        TableSchema::new(vec![
            ColumnSpec::int("goalie_games_started"),
            ColumnSpec::int("goalie_goals_against"),
            ColumnSpec::int("goalie_saves"),
            ColumnSpec::float("goalie_save_percentage"),
        ]),
        TableSchema::new(vec![
            ColumnSpec::int("goalie_wins"),
            ColumnSpec::int("goalie_losses"),
            ColumnSpec::int("goalie_ties"),
            ColumnSpec::slash_first("goalie_shutouts"),
            ColumnSpec::clock("goalie_minutes_played"),
        ]),
    ]
}

fn field_tables() -> Vec<TableSchema> {
    vec![
        TableSchema::new(columns(&["games_started", "goals", "assists", "points"], ColumnSpec::int)),
        TableSchema::new(vec![
            ColumnSpec::int("shots"),
            ColumnSpec::float("shot_percentage"),
            ColumnSpec::int("shots_on_goal"),
            ColumnSpec::float("sog_percentage"),
        ]),
        TableSchema::new(columns(
            &["yellow_cards", "red_cards", "penalty_kicks", "game_winning_goals"],
            ColumnSpec::int,
        )),
    ]
}

pub fn player_stats() -> QuerySpec {
    let layout = player_layout(&[("games_played", ColumnType::Int)]);
    let key = ["player_name", "school", "games_played"];

    let goalies = PageGroupSpec::new(
        "players",
        TableSelection::FromEnd(GOALIE_TABLES_FROM_END),
        layout.clone(),
        goalie_tables(),
    )
    .with_variants(position_sort_variants(&GOALIE_SORT_CATEGORIES))
    .with_key(&key)
    .with_role("position", "goalie");

    let field = PageGroupSpec::new(
        "players",
        TableSelection::FromEnd(FIELD_TABLES_FROM_END),
        layout,
        field_tables(),
    )
    .with_variants(position_sort_variants(&FIELD_SORT_CATEGORIES))
    .with_key(&key)
    .with_role("position", "field");

    QuerySpec::new(
        vec![goalies, field],
        Combine::Merge(Dedupe::Subset(
            ["lastname_initials", "first_name", "school", "games_played"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        )),
    )
    .with_name_split("player_name")
    .with_role_inheritance("position", "goalie", &["player_name", "school"])
}
