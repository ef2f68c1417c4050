//! Ice hockey pages

use super::{columns, player_layout, standings_spec, team_layout, team_stats_spec};
use crate::domain::{ColumnSpec, Combine, Dedupe, PageGroupSpec, QuerySpec, TableSchema, TableSelection};

const SKATER_SORT_CATEGORIES: [&str; 10] = ["g", "a", "p", "pim", "plusminus", "ppg", "shg", "gw", "gt", "hat"];
const GOALIE_SORT_CATEGORIES: [&str; 10] = ["ggs", "gm", "ga", "gaa", "sv", "svpt", "gow", "gol", "got", "gpwpt"];

/// Skater leaders are the first table of a players page, goalies the second
const SKATER_TABLE: usize = 0;
const GOALIE_TABLE: usize = 1;

pub fn standings() -> QuerySpec {
    standings_spec(columns(
        &[
            "games_played",
            "total_wins",
            "total_losses",
            "ties",
            "goals_for",
            "goals_against",
            "total_points",
        ],
        ColumnSpec::int,
    ))
    .dropping(&["ties"])
}

pub fn team_stats() -> QuerySpec {
    team_stats_spec(
        team_layout(),
        vec![TableSchema::new(vec![
            ColumnSpec::int("goals"),
            ColumnSpec::int("assists"),
            ColumnSpec::float("goals_per_game"),
            ColumnSpec::int("shots"),
            ColumnSpec::int("penalty_minutes"),
            ColumnSpec::int("power_play_goals"),
            ColumnSpec::int("power_play_opportunities"),
            ColumnSpec::float("power_play_percentage"),
            ColumnSpec::int("power_play_goals_against"),
            ColumnSpec::int("times_short_handed"),
            ColumnSpec::float("penalty_kill_percentage"),
            ColumnSpec::int("short_handed_goals"),
            ColumnSpec::int("short_handed_goals_against"),
            ColumnSpec::int("goals_against"),
            ColumnSpec::float("goals_against_average"),
            ColumnSpec::int("saves"),
            ColumnSpec::float("save_percentage"),
            ColumnSpec::int("empty_net_goals_against"),
        ])],
    )
}

fn leaderboard(role: &str, position: &str, sorts: &[&str], table: usize, schema: TableSchema) -> PageGroupSpec {
    PageGroupSpec::new("players", TableSelection::FromStart(table), player_layout(&[]), vec![schema])
        .with_variants(
            sorts
                .iter()
                .map(|sort| vec![("sort", (*sort).to_string()), ("pos", position.to_string())]),
        )
        .with_key(&["player_name", "school", "games_played"])
        .with_role("role", role)
}

pub fn player_stats() -> QuerySpec {
    let skaters = TableSchema::new(columns(
        &[
            "games_played",
            "goals",
            "assists",
            "points",
            "penalty_minutes",
            "plus_minus",
            "power_play_goals",
            "short_handed_goals",
            "empty_net_goals",
            "game_winning_goals",
            "game_tying_goals",
            "hat_tricks",
            "shots_on_goal",
        ],
        ColumnSpec::int,
    ));
    let goalies = TableSchema::new(vec![
        ColumnSpec::int("games_played"),
        ColumnSpec::int("games_started"),
        ColumnSpec::clock("minutes_played"),
        ColumnSpec::int("goals_against"),
        ColumnSpec::float("goals_against_average"),
        ColumnSpec::int("saves"),
        ColumnSpec::float("save_percentage"),
        ColumnSpec::int("wins"),
        ColumnSpec::int("losses"),
        ColumnSpec::int("ties"),
        ColumnSpec::float("win_percentage"),
    ]);

    QuerySpec::new(
        vec![
            leaderboard("skater", "sk", &SKATER_SORT_CATEGORIES, SKATER_TABLE, skaters),
            leaderboard("goalie", "g", &GOALIE_SORT_CATEGORIES, GOALIE_TABLE, goalies),
        ],
        Combine::Concat(Dedupe::Subset(
            ["lastname_initials", "first_name", "school", "games_played", "role"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        )),
    )
    .with_name_split("player_name")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_groups_are_tagged_by_role() {
        let spec = player_stats();
        let roles: Vec<_> = spec
            .groups
            .iter()
            .filter_map(|group| group.role.as_ref().map(|(_, value)| value.as_str()))
            .collect();
        assert_eq!(roles, ["skater", "goalie"]);
        assert_eq!(spec.groups[1].tables, TableSelection::FromStart(1));
    }

    #[test]
    fn test_player_schema_unions_skaters_and_goalies() {
        let columns = player_stats().output_schema().names();
        for column in ["plus_minus", "minutes_played", "save_percentage", "role"] {
            assert!(columns.contains(&column.to_string()), "{column}");
        }
    }
}
