//! Football pages
//!
//! Football is a single league with no gender in its site code. Its team
//! tables carry the most composite encodings: `comp-att-int` passing lines,
//! count-yards pairs, attendance with thousands separators and possession
//! clocks.

use super::{player_layout, position_sort_variants, standings_spec, team_layout, team_stats_spec};
use crate::domain::{ColumnSpec, Combine, Dedupe, PageGroupSpec, QuerySpec, TableSchema, TableSelection};

/// `(pos, sort)` pairs of the player leaderboards
const PLAYER_SORT_CATEGORIES: [(&str, &str); 6] = [
    ("pass", "pyds"),
    ("rush", "ryds"),
    ("rcv", "rcyds"),
    ("def", "tt"),
    ("def", "int"),
    ("kick", "fgm"),
];

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
        // Scoring breakdown
        TableSchema::new(vec![
            ColumnSpec::int("touchdowns"),
            ColumnSpec::int("field_goals"),
            ColumnSpec::int("extra_points"),
            ColumnSpec::int("two_point_conversions"),
            ColumnSpec::int("defensive_extra_points"),
            ColumnSpec::int("safeties"),
            ColumnSpec::int("points"),
            ColumnSpec::float("points_per_game"),
        ]),
        // Offense totals
        TableSchema::new(vec![
            ColumnSpec::int("rushing_yards"),
            ColumnSpec::int("passing_yards"),
            ColumnSpec::int("total_offense"),
            ColumnSpec::float("yards_per_game"),
        ]),
        // Passing
        TableSchema::new(vec![
            ColumnSpec::int("passing_yards"),
            ColumnSpec::triple("pass_completions", "pass_attempts", "pass_interceptions"),
            ColumnSpec::float("passing_yards_per_game"),
            ColumnSpec::float("yards_per_attempt"),
            ColumnSpec::float("yards_per_completion"),
            ColumnSpec::int("passing_touchdowns"),
        ]),
        // Rushing
        TableSchema::new(vec![
            ColumnSpec::int("rushing_yards"),
            ColumnSpec::int("rushing_attempts"),
            ColumnSpec::float("rushing_yards_per_game"),
            ColumnSpec::float("rushing_average"),
            ColumnSpec::int("rushing_touchdowns"),
        ]),
        // First downs
        TableSchema::new(vec![
            ColumnSpec::int("total_first_downs"),
            ColumnSpec::int("rushing_first_downs"),
            ColumnSpec::int("passing_first_downs"),
            ColumnSpec::int("penalty_first_downs"),
            ColumnSpec::float("first_downs_per_game"),
        ]),
        // Third and fourth down conversions
        TableSchema::new(vec![
            ColumnSpec::counter("third_down_conversions_made", "third_down_attempts"),
            ColumnSpec::float("third_down_conversion_percentage"),
            ColumnSpec::counter("fourth_down_conversions_made", "fourth_down_attempts"),
            ColumnSpec::float("fourth_down_conversion_percentage"),
        ]),
        // Returns
        TableSchema::new(vec![
            ColumnSpec::counter("kick_return_count", "kick_return_yards"),
            ColumnSpec::float("kickoff_return_average"),
            ColumnSpec::counter("punt_return_count", "punt_return_yards"),
            ColumnSpec::float("punt_return_average"),
        ]),
        // Kicking
        TableSchema::new(vec![
            ColumnSpec::counter("field_goal_made", "field_goal_attempt"),
            ColumnSpec::float("field_goal_percentage"),
            ColumnSpec::counter("extra_point_made", "extra_point_attempt"),
            ColumnSpec::float("extra_point_percentage"),
            ColumnSpec::counter("punt_count", "punt_yards"),
            ColumnSpec::float("punt_average"),
            ColumnSpec::counter("kickoff_count", "kickoff_yards"),
            ColumnSpec::float("kickoff_average"),
        ]),
        // Red zone
        TableSchema::new(vec![
            ColumnSpec::counter("scores_made", "scores_attempt"),
            ColumnSpec::float("red_zone_percentage"),
            ColumnSpec::counter("touchdowns_made", "touchdowns_attempt"),
            ColumnSpec::float("touchdown_percentage"),
        ]),
        // Turnovers and defense
        TableSchema::new(vec![
            ColumnSpec::counter("fumbles", "fumbles_lost"),
            ColumnSpec::int("fumble_recoveries"),
            ColumnSpec::int("interceptions"),
            ColumnSpec::last_segment("interception_yards"),
            ColumnSpec::float("interception_average"),
            ColumnSpec::int("interception_touchdowns"),
            ColumnSpec::float("tackles"),
            ColumnSpec::int("sacks"),
        ]),
        // Penalties
        TableSchema::new(vec![
            ColumnSpec::int("penalties"),
            ColumnSpec::float("penalties_per_game"),
            ColumnSpec::int("penalty_yards"),
            ColumnSpec::float("penalty_yards_per_game"),
        ]),
        // Aggregates
        TableSchema::new(vec![
            ColumnSpec::float("points_per_game"),
            ColumnSpec::int("points"),
            ColumnSpec::float("yards_per_game"),
            ColumnSpec::float("passing_yards_per_game"),
            ColumnSpec::float("rushing_yards_per_game"),
            ColumnSpec::float("tackles_per_game"),
            ColumnSpec::int("interceptions"),
            ColumnSpec::int("fumble_recoveries"),
            ColumnSpec::int("sacks"),
            ColumnSpec::int("touchdowns"),
        ]),
        // Possession and attendance
        TableSchema::new(vec![
            ColumnSpec::clock("time_of_possession"),
            ColumnSpec::thousands("home_attendance"),
            ColumnSpec::thousands("average_home_attendance"),
        ]),
    ]
}

pub fn player_stats() -> QuerySpec {
    let group = PageGroupSpec::new(
        "players",
        TableSelection::FromStart(0),
        player_layout(&[]),
        player_tables(),
    )
    .with_variants(position_sort_variants(&PLAYER_SORT_CATEGORIES))
    .with_key(&["player_name", "school"]);

    QuerySpec::new(vec![group], Combine::Concat(Dedupe::Exact))
        .with_required("player_name")
        .with_name_split("player_name")
}

fn player_tables() -> Vec<TableSchema> {
    vec![
        // Passing
        TableSchema::new(vec![
            ColumnSpec::int("games_played"),
            ColumnSpec::triple("pass_completions", "pass_attempts", "pass_interceptions"),
            ColumnSpec::float("pass_percentage"),
            ColumnSpec::int("passing_yards"),
            ColumnSpec::int("passing_touchdowns"),
            ColumnSpec::float("passing_yards_per_game"),
        ]),
        // Rushing
        TableSchema::new(vec![
            ColumnSpec::int("games_played"),
            ColumnSpec::int("rushing_attempts"),
            ColumnSpec::int("rushing_yards"),
            ColumnSpec::float("rushing_average"),
            ColumnSpec::int("rushing_touchdowns"),
            ColumnSpec::float("rushing_yards_per_game"),
        ]),
        // Receiving
        TableSchema::new(vec![
            ColumnSpec::int("games_played"),
            ColumnSpec::int("receptions"),
            ColumnSpec::int("receiving_yards"),
            ColumnSpec::float("receiving_average"),
            ColumnSpec::int("receiving_touchdowns"),
            ColumnSpec::float("receiving_yards_per_game"),
        ]),
        // Defense
        TableSchema::new(vec![
            ColumnSpec::int("games_played"),
            ColumnSpec::int("solo_tackles"),
            ColumnSpec::int("assisted_tackles"),
            ColumnSpec::float("total_tackles"),
            ColumnSpec::float("tackles_for_loss"),
            ColumnSpec::float("sacks"),
            ColumnSpec::int("interceptions"),
            ColumnSpec::int("forced_fumbles"),
        ]),
        // Kicking
        TableSchema::new(vec![
            ColumnSpec::int("games_played"),
            ColumnSpec::counter("field_goal_made", "field_goal_attempt"),
            ColumnSpec::float("field_goal_percentage"),
            ColumnSpec::counter("extra_point_made", "extra_point_attempt"),
            ColumnSpec::int("longest_field_goal"),
        ]),
    ]
}
