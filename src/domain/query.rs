//! Declarative description of a statistics query
//!
//! Each sport is described entirely by values of these types: which pages
//! to fetch, which tables on each page to read, how rows are laid out and
//! how the per-page results are combined into one dataset.

use crate::domain::schema::{ColumnType, DatasetSchema, RowLayout, TableSchema};

/// Which tables of a page are read, paired in order with the group's schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSelection {
    /// Tables from this index onward
    FromStart(usize),
    /// The last `n` tables
    FromEnd(usize),
    /// Every table, each read with the first schema and appended without merging
    All,
}

/// One family of pages that share a table layout
#[derive(Debug, Clone)]
pub struct PageGroupSpec {
    /// Last path segment, e.g. `players`
    pub page: String,
    /// Query parameters, one URL per entry; an empty list yields a single bare URL
    pub variants: Vec<Vec<(String, String)>>,
    pub tables: TableSelection,
    pub layout: RowLayout,
    pub schemas: Vec<TableSchema>,
    /// Fields joined into the merge key of this group's records
    pub key_fields: Vec<String>,
    /// Column and value stamped on every record of this group
    pub role: Option<(String, String)>,
}

impl PageGroupSpec {
    pub fn new(page: &str, tables: TableSelection, layout: RowLayout, schemas: Vec<TableSchema>) -> Self {
        Self {
            page: page.to_string(),
            variants: Vec::new(),
            tables,
            layout,
            schemas,
            key_fields: Vec::new(),
            role: None,
        }
    }

    pub fn with_variants<I, P>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = (&'static str, String)>,
    {
        self.variants = variants
            .into_iter()
            .map(|pairs| pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
            .collect();
        self
    }

    pub fn with_key(mut self, fields: &[&str]) -> Self {
        self.key_fields = fields.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_role(mut self, column: &str, value: &str) -> Self {
        self.role = Some((column.to_string(), value.to_string()));
        self
    }
}

/// Duplicate handling after per-page datasets are stacked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dedupe {
    None,
    Exact,
    Subset(Vec<String>),
}

/// How per-page results become one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combine {
    /// Each page is finalized on its own, then pages are stacked
    Concat(Dedupe),
    /// Records of every page in a group are merged by identity key; each
    /// group is finalized once, then groups are stacked
    Merge(Dedupe),
}

/// A role value that sticks to an entity once any page has assigned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInheritance {
    pub column: String,
    pub value: String,
    pub match_fields: Vec<String>,
}

/// Complete description of one query for one sport
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub groups: Vec<PageGroupSpec>,
    pub combine: Combine,
    /// Rows whose value here is `-` are dropped before coercion
    pub placeholder_field: Option<String>,
    /// Rows missing this field are dropped before coercion
    pub required_field: Option<String>,
    /// Full-name field split into `lastname_initials` and `first_name`
    pub name_split: Option<String>,
    pub dropped_columns: Vec<String>,
    pub role_inheritance: Option<RoleInheritance>,
    /// Fields the merger never overwrites once present
    pub protected_fields: Vec<String>,
    /// Numeric fields that stay null when blank until the caller fills them
    pub nullable_fields: Vec<String>,
}

impl QuerySpec {
    pub fn new(groups: Vec<PageGroupSpec>, combine: Combine) -> Self {
        Self {
            groups,
            combine,
            placeholder_field: None,
            required_field: None,
            name_split: None,
            dropped_columns: Vec::new(),
            role_inheritance: None,
            protected_fields: Vec::new(),
            nullable_fields: Vec::new(),
        }
    }

    pub fn with_placeholder(mut self, field: &str) -> Self {
        self.placeholder_field = Some(field.to_string());
        self
    }

    pub fn with_required(mut self, field: &str) -> Self {
        self.required_field = Some(field.to_string());
        self
    }

    pub fn with_name_split(mut self, field: &str) -> Self {
        self.name_split = Some(field.to_string());
        self
    }

    pub fn with_nullable(mut self, field: &str) -> Self {
        self.nullable_fields.push(field.to_string());
        self
    }

    pub fn dropping(mut self, columns: &[&str]) -> Self {
        self.dropped_columns = columns.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_role_inheritance(mut self, column: &str, value: &str, match_fields: &[&str]) -> Self {
        self.role_inheritance = Some(RoleInheritance {
            column: column.to_string(),
            value: value.to_string(),
            match_fields: match_fields.iter().map(ToString::to_string).collect(),
        });
        self.protected_fields.push(column.to_string());
        self
    }

    /// Output columns every dataset of this query carries, even when empty
    ///
    /// Order: split name parts, identity fields, statistic columns in table
    /// order, then role columns. Dropped columns are removed.
    pub fn output_schema(&self) -> DatasetSchema {
        let mut schema = DatasetSchema::new();
        if self.name_split.is_some() {
            schema.push(LASTNAME_COLUMN, ColumnType::Text);
            schema.push(FIRST_NAME_COLUMN, ColumnType::Text);
        }
        for group in &self.groups {
            if let Some(name) = &group.layout.marked_name {
                schema.push(name, ColumnType::Text);
            }
            for field in &group.layout.identity {
                if self.name_split.as_deref() != Some(field.name.as_str()) {
                    schema.push(&field.name, field.ty);
                }
            }
        }
        for group in &self.groups {
            for table in &group.schemas {
                schema.extend_from_table(table);
            }
        }
        for group in &self.groups {
            if let Some((column, _)) = &group.role {
                schema.push(column, ColumnType::Text);
            }
        }
        schema.remove(&self.dropped_columns);
        schema
    }
}

pub const LASTNAME_COLUMN: &str = "lastname_initials";
pub const FIRST_NAME_COLUMN: &str = "first_name";
