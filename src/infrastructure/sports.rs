//! Per-sport query configuration
//!
//! Every sport is pure data: page groups, table schemas, row layouts and
//! combination rules. The generic pipeline in
//! [`application`](crate::application) runs them all the same way.

pub mod basketball;
pub mod conferences;
pub mod football;
pub mod ice_hockey;
pub mod soccer;
pub mod volleyball;

use crate::domain::{
    ColumnSpec, ColumnType, Combine, Dedupe, IdentityField, PageGroupSpec, QuerySpec, RowLayout,
    Sport, TableSchema, TableSelection,
};

pub use conferences::{base_conferences, conference_overrides};

/// Standings of a sport's regular season
pub fn standings_query(sport: Sport) -> QuerySpec {
    match sport {
        Sport::Basketball => basketball::standings(),
        Sport::Football => football::standings(),
        Sport::IceHockey => ice_hockey::standings(),
        Sport::Soccer => soccer::standings(),
        Sport::Volleyball => volleyball::standings(),
    }
}

/// Team performance statistics (no win/loss record)
pub fn team_stats_query(sport: Sport) -> QuerySpec {
    match sport {
        Sport::Basketball => basketball::team_stats(),
        Sport::Football => football::team_stats(),
        Sport::IceHockey => ice_hockey::team_stats(),
        Sport::Soccer => soccer::team_stats(),
        Sport::Volleyball => volleyball::team_stats(),
    }
}

pub fn player_stats_query(sport: Sport) -> QuerySpec {
    match sport {
        Sport::Basketball => basketball::player_stats(),
        Sport::Football => football::player_stats(),
        Sport::IceHockey => ice_hockey::player_stats(),
        Sport::Soccer => soccer::player_stats(),
        Sport::Volleyball => volleyball::player_stats(),
    }
}

/// Team table row: rank, team name, games played, then statistics
pub(crate) fn team_layout() -> RowLayout {
    RowLayout::positional(
        1,
        vec![
            IdentityField::new("team_name", 1, ColumnType::Text),
            IdentityField::new("games_played", 2, ColumnType::Int),
        ],
        3,
    )
}

/// Single `teams` page whose tables are merged by team name
pub(crate) fn team_stats_spec(layout: RowLayout, tables: Vec<TableSchema>) -> QuerySpec {
    let placeholder = layout
        .identity
        .get(1)
        .map_or_else(|| "games_played".to_string(), |field| field.name.clone());
    let group = PageGroupSpec::new("teams", TableSelection::FromStart(0), layout, tables)
        .with_key(&["team_name"]);
    QuerySpec::new(vec![group], Combine::Concat(Dedupe::None)).with_placeholder(&placeholder)
}

/// Single `standings` page; every table read with the same columns
pub(crate) fn standings_spec(columns: Vec<ColumnSpec>) -> QuerySpec {
    let group = PageGroupSpec::new(
        "standings",
        TableSelection::All,
        RowLayout::marked("team_name"),
        vec![TableSchema::new(columns)],
    )
    .with_key(&["team_name"]);
    QuerySpec::new(vec![group], Combine::Concat(Dedupe::Exact))
        .with_required("team_name")
        .with_nullable("games_played")
}

/// Player row identity: rank, name, school, then `extra` fields in order
pub(crate) fn player_layout(extra: &[(&str, ColumnType)]) -> RowLayout {
    let mut identity = vec![
        IdentityField::new("player_name", 1, ColumnType::Text),
        IdentityField::new("school", 2, ColumnType::Text),
    ];
    for (offset, (name, ty)) in extra.iter().enumerate() {
        identity.push(IdentityField::new(name, 3 + offset, *ty));
    }
    RowLayout::positional(0, identity, 3 + extra.len())
}

/// One URL variant per `(pos, sort)` pair
pub(crate) fn position_sort_variants(pairs: &[(&str, &str)]) -> Vec<Vec<(&'static str, String)>> {
    pairs
        .iter()
        .map(|(position, sort)| vec![("pos", (*position).to_string()), ("sort", (*sort).to_string())])
        .collect()
}

pub(crate) fn columns(names: &[&str], build: fn(&str) -> ColumnSpec) -> Vec<ColumnSpec> {
    names.iter().map(|name| build(name)).collect()
}
