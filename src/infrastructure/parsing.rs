//! HTML table parsing
//!
//! Pages are cut into raw `<table>` fragments once, right after they are
//! fetched. Each fragment is later read row by row into
//! [`PartialRecord`](crate::domain::PartialRecord)s according to a
//! [`RowLayout`](crate::domain::RowLayout) and a
//! [`TableSchema`](crate::domain::TableSchema).

pub mod page;
pub mod table_parser;

pub use page::{extract_tables, select_tables};
pub use table_parser::RowParser;

use crate::domain::RawTable;

/// Parser over one raw table fragment
pub trait TableParser {
    type Output;

    fn parse_table(&self, table: &RawTable) -> Self::Output;
}
