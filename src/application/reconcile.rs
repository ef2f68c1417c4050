//! Standings and team statistics reconciliation
//!
//! Standings and performance statistics come from different pages that
//! agree on the team name but disagree on auxiliary columns such as games
//! played. The reconciler left-joins them with standings as the authority.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Conference, Dataset, Sport, Value};
use crate::infrastructure::sports::{base_conferences, conference_overrides};

pub const TEAM_COLUMN: &str = "team_name";
pub const CONFERENCE_COLUMN: &str = "conference";

/// Label written for teams missing from the lookup table
pub const UNMAPPED_CONFERENCE: &str = "nan";

/// Team name to conference lookup for one sport
#[derive(Debug, Clone)]
pub struct ConferenceMap {
    entries: HashMap<&'static str, Conference>,
}

impl ConferenceMap {
    /// Base mapping with the sport's overrides applied on top
    pub fn for_sport(sport: Sport) -> Self {
        let entries = base_conferences()
            .iter()
            .chain(conference_overrides(sport))
            .copied()
            .collect();
        Self { entries }
    }

    pub fn get(&self, team: &str) -> Option<Conference> {
        self.entries.get(team).copied()
    }

    pub fn label(&self, team: &str) -> &'static str {
        self.get(team).map_or(UNMAPPED_CONFERENCE, Conference::as_str)
    }
}

/// Appends a `conference` column derived from `team_name`
pub fn append_conference(dataset: &mut Dataset, conferences: &ConferenceMap) {
    let Some(team_index) = dataset.column_index(TEAM_COLUMN) else {
        dataset.append_column(CONFERENCE_COLUMN, |_| Value::from(UNMAPPED_CONFERENCE));
        return;
    };
    dataset.append_column(CONFERENCE_COLUMN, |row| {
        let label = row[team_index]
            .as_str()
            .map_or(UNMAPPED_CONFERENCE, |team| conferences.label(team));
        Value::from(label)
    });
}

/// Left join of standings with team statistics on `team_name`
#[derive(Debug, Clone, Default)]
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    /// Every standings row is kept; stats rows without a standings row are
    /// dropped. Columns present in both take the standings value unless it
    /// is null.
    pub fn reconcile(&self, standings: &Dataset, stats: &Dataset) -> Dataset {
        let extra: Vec<(usize, &String)> = stats
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, column)| !standings.has_column(column))
            .collect();
        let shared: Vec<(usize, usize)> = standings
            .columns()
            .iter()
            .enumerate()
            .filter_map(|(index, column)| stats.column_index(column).map(|other| (index, other)))
            .collect();

        let mut columns = standings.columns().to_vec();
        columns.extend(extra.iter().map(|(_, column)| (*column).clone()));
        let mut combined = Dataset::empty(columns);

        let mut unmatched = 0usize;
        for (row_index, row) in standings.rows().iter().enumerate() {
            let partner = standings
                .value(row_index, TEAM_COLUMN)
                .and_then(Value::as_str)
                .and_then(|team| stats.find_row(TEAM_COLUMN, team));

            let mut joined = row.clone();
            match partner {
                Some(stats_row) => {
                    for &(own, other) in &shared {
                        if joined[own].is_null() {
                            joined[own] = stats_row[other].clone();
                        }
                    }
                    joined.extend(extra.iter().map(|&(index, _)| stats_row[index].clone()));
                }
                None => unmatched += 1,
            }
            combined.push_row(joined);
        }

        if unmatched > 0 {
            debug!("{} standings rows had no matching stats row", unmatched);
        }
        combined
    }
}
