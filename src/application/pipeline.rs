//! Generic fetch, parse, merge and finalize pipeline
//!
//! A [`QuerySpec`] says which pages to fetch and how to read them. The
//! pipeline turns it into URLs, parses every page inside its fetch task,
//! then combines the page results in launch order into one dataset.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::application::coerce::Finalizer;
use crate::application::merge::EntityMerger;
use crate::application::orchestrator::FetchOrchestrator;
use crate::domain::{
    Combine, Dataset, Dedupe, PageGroupSpec, PartialRecord, QuerySpec, RawTable, RoleInheritance,
    TableSelection,
};
use crate::error::StatsResult;
use crate::infrastructure::parsing::{RowParser, TableParser, select_tables};

/// One page to fetch and the group that reads it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub group: usize,
    pub url: String,
}

/// Records parsed from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecords {
    pub group: usize,
    pub records: Vec<PartialRecord>,
}

/// Builds every page URL of a query
///
/// URLs have the shape `{base}/{sport_code}/{season}/{page}?{variant}`,
/// grouped in query order and in variant order within a group.
pub fn page_requests(
    base_url: &str,
    spec: &QuerySpec,
    sport_code: &str,
    season_fragment: &str,
) -> Result<Vec<PageRequest>, url::ParseError> {
    let base = base_url.trim_end_matches('/');
    let mut requests = Vec::new();

    for (group_index, group) in spec.groups.iter().enumerate() {
        let page = Url::parse(&format!("{base}/{sport_code}/{season_fragment}/{}", group.page))?;
        if group.variants.is_empty() {
            requests.push(PageRequest {
                group: group_index,
                url: page.to_string(),
            });
            continue;
        }
        for variant in &group.variants {
            let mut url = page.clone();
            url.query_pairs_mut().extend_pairs(variant);
            requests.push(PageRequest {
                group: group_index,
                url: url.to_string(),
            });
        }
    }
    Ok(requests)
}

/// A page group with its row parsers built
#[derive(Debug, Clone)]
pub struct GroupReader {
    selection: TableSelection,
    parsers: Vec<RowParser>,
    merger: EntityMerger,
    role: Option<(String, String)>,
}

impl GroupReader {
    pub fn new(group: &PageGroupSpec) -> StatsResult<Self> {
        let parsers = group
            .schemas
            .iter()
            .map(|schema| RowParser::new(group.layout.clone(), schema.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            selection: group.tables,
            parsers,
            merger: EntityMerger::new(&group.key_fields),
            role: group.role.clone(),
        })
    }

    /// Parses the selected tables of one page
    ///
    /// Tables of a page are merged by the group key, except with
    /// [`TableSelection::All`] where every table contributes its own rows.
    pub fn read_page(&self, url: &str, tables: &[RawTable]) -> Vec<PartialRecord> {
        let mut records = Vec::new();
        for (schema_index, table) in select_tables(self.selection, tables, self.parsers.len()) {
            let parsed = self.parsers[schema_index].parse_table(table);
            if self.selection == TableSelection::All {
                records.extend(parsed);
            } else {
                records = self.merger.merge(records, parsed);
            }
        }

        if let Some((column, value)) = &self.role {
            for record in &mut records {
                record.insert(column.as_str(), value.as_str());
            }
        }
        debug!("Read {} records from {}", records.len(), url);
        records
    }
}

/// Tags later records with a role once the same entity was seen with it
fn inherit_role(rule: &RoleInheritance, pages: &mut [PageRecords]) {
    let mut holders = HashSet::new();
    for record in pages.iter_mut().flat_map(|page| page.records.iter_mut()) {
        let key = record.identity_key(&rule.match_fields);
        if record.get(&rule.column) == Some(rule.value.as_str()) {
            holders.insert(key);
        } else if holders.contains(&key) {
            record.insert(rule.column.as_str(), rule.value.as_str());
        }
    }
}

fn stack(parts: Vec<Dataset>, dedupe: &Dedupe, columns: Vec<String>) -> Dataset {
    if parts.is_empty() {
        return Dataset::empty(columns);
    }
    let mut combined = Dataset::concat(parts);
    match dedupe {
        Dedupe::None => {}
        Dedupe::Exact => combined.drop_duplicates(None),
        Dedupe::Subset(fields) => combined.drop_duplicates(Some(fields.as_slice())),
    }
    combined
}

/// Combines page results, given in launch order, into the query's dataset
pub fn assemble(spec: &QuerySpec, mut pages: Vec<PageRecords>) -> Dataset {
    if let Some(rule) = &spec.role_inheritance {
        inherit_role(rule, &mut pages);
    }

    let finalizer = Finalizer::new(spec);
    let columns = finalizer.schema().names();

    match &spec.combine {
        Combine::Concat(dedupe) => {
            let parts = pages
                .into_iter()
                .map(|page| finalizer.finalize(page.records))
                .collect();
            stack(parts, dedupe, columns)
        }
        Combine::Merge(dedupe) => {
            let mut by_group: Vec<Vec<Vec<PartialRecord>>> = vec![Vec::new(); spec.groups.len()];
            for page in pages {
                if let Some(batches) = by_group.get_mut(page.group) {
                    batches.push(page.records);
                }
            }
            let parts = spec
                .groups
                .iter()
                .zip(by_group)
                .filter(|(_, batches)| !batches.is_empty())
                .map(|(group, batches)| {
                    let merger = EntityMerger::new(&group.key_fields).with_protected(&spec.protected_fields);
                    finalizer.finalize(merger.merge_all(batches))
                })
                .collect();
            stack(parts, dedupe, columns)
        }
    }
}

/// Runs queries against the configured site
pub struct QueryPipeline {
    orchestrator: FetchOrchestrator,
    base_url: String,
}

impl QueryPipeline {
    pub fn new(orchestrator: FetchOrchestrator, base_url: &str) -> Self {
        Self {
            orchestrator,
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches and parses every page of `spec`, then assembles the dataset
    pub async fn run(&self, spec: &QuerySpec, sport_code: &str, season_fragment: &str) -> StatsResult<Dataset> {
        let requests = page_requests(&self.base_url, spec, sport_code, season_fragment)?;
        let readers: Arc<Vec<GroupReader>> = Arc::new(
            spec.groups
                .iter()
                .map(GroupReader::new)
                .collect::<StatsResult<_>>()?,
        );
        let group_of: Vec<usize> = requests.iter().map(|request| request.group).collect();
        let urls: Vec<String> = requests.into_iter().map(|request| request.url).collect();

        info!("Running query for {} {} over {} pages", sport_code, season_fragment, urls.len());
        let pages = self
            .orchestrator
            .execute(&urls, move |index, url, tables| {
                let group = group_of[index];
                PageRecords {
                    group,
                    records: readers[group].read_page(url, &tables),
                }
            })
            .await?;

        let dataset = assemble(spec, pages);
        info!("Query for {} {} produced {} rows", sport_code, season_fragment, dataset.len());
        Ok(dataset)
    }
}
