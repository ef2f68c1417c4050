//! Domain module - leagues, table schemas, records and datasets
//!
//! This module holds the pure data model of the pipeline. Nothing here
//! performs I/O; the infrastructure layer fills these types from HTML and
//! the application layer combines them into finished datasets.
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod dataset;
pub mod league;
pub mod query;
pub mod record;
pub mod schema;

pub use dataset::{Dataset, Value};
pub use league::{Conference, Gender, SeasonPhase, Sport};
pub use query::{Combine, Dedupe, PageGroupSpec, QuerySpec, RoleInheritance, TableSelection};
pub use record::{IdentityKey, PartialRecord, RawTable};
pub use schema::{ColumnSpec, ColumnType, DatasetSchema, FieldRule, IdentityField, RowLayout, TableSchema};
