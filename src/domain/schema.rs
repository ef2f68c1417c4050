//! Table schemas and row layouts
//!
//! A [`TableSchema`] names the statistic columns of one HTML table in cell
//! order, together with the rule that turns each raw cell into one or more
//! output fields. A [`RowLayout`] says where a row's identity cells sit and
//! where the statistic cells start.

use serde::{Deserialize, Serialize};

/// Target type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    Text,
}

impl ColumnType {
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

/// How a raw cell is decomposed into output fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Cell text is used as-is, minus a trailing `%`
    Plain,
    /// `made-attempted` counter; the second number lands in `derived`
    Counter { derived: String },
    /// Three dash-separated numbers spread over three columns
    Triple { second: String, third: String },
    /// Keeps only the segment after the last dash
    LastSegment,
    /// Drops thousands separators
    Thousands,
    /// `MM:SS` converted to decimal minutes
    Clock,
    /// `a/b` keeps `a`
    SlashFirst,
}

/// One statistic cell of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
    pub rule: FieldRule,
}

impl ColumnSpec {
    fn with_rule(name: &str, ty: ColumnType, rule: FieldRule) -> Self {
        Self {
            name: name.to_string(),
            ty,
            rule,
        }
    }

    pub fn int(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Int, FieldRule::Plain)
    }

    pub fn float(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Float, FieldRule::Plain)
    }

    pub fn text(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Text, FieldRule::Plain)
    }

    /// Counter whose attempted half is named by swapping `made` for `attempted`
    pub fn made(name: &str) -> Self {
        Self::counter(name, &name.replace("made", "attempted"))
    }

    pub fn counter(name: &str, derived: &str) -> Self {
        Self::with_rule(
            name,
            ColumnType::Int,
            FieldRule::Counter {
                derived: derived.to_string(),
            },
        )
    }

    pub fn triple(name: &str, second: &str, third: &str) -> Self {
        Self::with_rule(
            name,
            ColumnType::Int,
            FieldRule::Triple {
                second: second.to_string(),
                third: third.to_string(),
            },
        )
    }

    pub fn last_segment(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Int, FieldRule::LastSegment)
    }

    pub fn thousands(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Int, FieldRule::Thousands)
    }

    pub fn clock(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Float, FieldRule::Clock)
    }

    pub fn slash_first(name: &str) -> Self {
        Self::with_rule(name, ColumnType::Int, FieldRule::SlashFirst)
    }

    /// Output fields this cell produces, in order
    pub fn output_columns(&self) -> Vec<(&str, ColumnType)> {
        let mut columns = vec![(self.name.as_str(), self.ty)];
        match &self.rule {
            FieldRule::Counter { derived } => columns.push((derived.as_str(), self.ty)),
            FieldRule::Triple { second, third } => {
                columns.push((second.as_str(), self.ty));
                columns.push((third.as_str(), self.ty));
            }
            _ => {}
        }
        columns
    }
}

/// Ordered statistic columns of one HTML table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Identity cell read by position from every row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityField {
    pub name: String,
    pub cell: usize,
    pub ty: ColumnType,
}

impl IdentityField {
    pub fn new(name: &str, cell: usize, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            cell,
            ty,
        }
    }
}

/// Where identity and statistic cells sit in a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    /// Leading rows skipped by position
    pub header_rows: usize,
    /// Identity cells, indexed into the row's `td` cells
    pub identity: Vec<IdentityField>,
    /// Column that receives the text of the row's `th.team-name` link
    pub marked_name: Option<String>,
    /// Index of the `td` cell holding the first schema column
    pub stats_offset: usize,
}

impl RowLayout {
    /// Layout with identity cells at fixed positions
    pub fn positional(header_rows: usize, identity: Vec<IdentityField>, stats_offset: usize) -> Self {
        Self {
            header_rows,
            identity,
            marked_name: None,
            stats_offset,
        }
    }

    /// Layout whose name lives in a marked header cell and whose `td` cells
    /// are all statistics
    pub fn marked(name_column: &str) -> Self {
        Self {
            header_rows: 0,
            identity: Vec::new(),
            marked_name: Some(name_column.to_string()),
            stats_offset: 0,
        }
    }

    /// Rows with fewer `td` cells than this are skipped
    pub fn min_cells(&self) -> usize {
        self.identity
            .iter()
            .map(|field| field.cell + 1)
            .max()
            .unwrap_or(1)
    }
}

/// Ordered, typed column list of a finished dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSchema {
    columns: Vec<(String, ColumnType)>,
}

impl DatasetSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column unless one with the same name exists; the first
    /// declared type wins
    pub fn push(&mut self, name: &str, ty: ColumnType) {
        if self.type_of(name).is_none() {
            self.columns.push((name.to_string(), ty));
        }
    }

    pub fn extend_from_table(&mut self, table: &TableSchema) {
        for column in &table.columns {
            for (name, ty) in column.output_columns() {
                self.push(name, ty);
            }
        }
    }

    pub fn remove(&mut self, names: &[String]) {
        self.columns.retain(|(name, _)| !names.contains(name));
    }

    pub fn type_of(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, ty)| *ty)
    }

    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
