//! Volleyball pages
//!
//! Volleyball rows count matches and sets played instead of games.

use super::{player_layout, position_sort_variants, standings_spec, team_stats_spec};
use crate::domain::{
    ColumnSpec, ColumnType, Combine, Dedupe, IdentityField, PageGroupSpec, QuerySpec, RowLayout,
    TableSchema, TableSelection,
};

const PLAYER_SORT_CATEGORIES: [(&str, &str); 6] = [
    ("of", "k"),
    ("of", "a"),
    ("of", "pts"),
    ("df", "d"),
    ("df", "bt"),
    ("sr", "sa"),
];

pub fn standings() -> QuerySpec {
    standings_spec(vec![
        ColumnSpec::int("games_played"),
        ColumnSpec::int("total_wins"),
        ColumnSpec::int("total_losses"),
        ColumnSpec::float("win_percentage"),
        ColumnSpec::int("sets_for"),
        ColumnSpec::int("sets_against"),
        ColumnSpec::int("points"),
    ])
}

pub fn team_stats() -> QuerySpec {
    let layout = RowLayout::positional(
        1,
        vec![
            IdentityField::new("team_name", 1, ColumnType::Text),
            IdentityField::new("matches_played", 2, ColumnType::Int),
            IdentityField::new("sets_played", 3, ColumnType::Int),
        ],
        4,
    );
    team_stats_spec(layout, stat_tables(false)).dropping(&["serve_attempts"])
}

/// Offense, defense and serve/receive tables; player pages also report
/// attacks per set
fn stat_tables(players: bool) -> Vec<TableSchema> {
    let mut offense = vec![
        ColumnSpec::int("kills"),
        ColumnSpec::float("kills_per_set"),
        ColumnSpec::int("errors"),
        ColumnSpec::int("total_attacks"),
    ];
    if players {
        offense.push(ColumnSpec::float("total_attacks_per_set"));
    }
    offense.extend([
        ColumnSpec::float("hitting_percentage"),
        ColumnSpec::int("assists"),
        ColumnSpec::float("assists_per_set"),
        ColumnSpec::float("points"),
        ColumnSpec::float("points_per_set"),
    ]);

    vec![
        TableSchema::new(offense),
        TableSchema::new(vec![
            ColumnSpec::int("digs"),
            ColumnSpec::float("digs_per_set"),
            ColumnSpec::int("block_solos"),
            ColumnSpec::int("block_assists"),
            ColumnSpec::float("total_blocks"),
            ColumnSpec::float("blocks_per_set"),
        ]),
        TableSchema::new(vec![
            ColumnSpec::int("serve_attempts"),
            ColumnSpec::int("service_aces"),
            ColumnSpec::float("service_aces_per_set"),
            ColumnSpec::int("service_errors"),
            ColumnSpec::int("receptions"),
            ColumnSpec::int("reception_errors"),
        ]),
    ]
}

pub fn player_stats() -> QuerySpec {
    let group = PageGroupSpec::new(
        "players",
        TableSelection::FromStart(0),
        player_layout(&[("matches_played", ColumnType::Int), ("sets_played", ColumnType::Int)]),
        stat_tables(true),
    )
    .with_variants(position_sort_variants(&PLAYER_SORT_CATEGORIES))
    .with_key(&["player_name", "school", "matches_played"]);

    QuerySpec::new(
        vec![group],
        Combine::Concat(Dedupe::Subset(
            ["lastname_initials", "first_name", "school", "matches_played", "sets_played"]
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
    fn test_team_stats_drops_serve_attempts() {
        let spec = team_stats();
        let columns = spec.output_schema().names();
        assert_eq!(&columns[..3], ["team_name", "matches_played", "sets_played"]);
        assert!(!columns.contains(&"serve_attempts".to_string()));
        assert_eq!(spec.placeholder_field.as_deref(), Some("matches_played"));
    }

    #[test]
    fn test_players_keep_attack_rate() {
        let columns = player_stats().output_schema().names();
        assert!(columns.contains(&"total_attacks_per_set".to_string()));
        assert!(columns.contains(&"serve_attempts".to_string()));
    }
}
