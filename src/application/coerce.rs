//! Type coercion and dataset finalization
//!
//! Coercion is total: a numeric column never keeps text and never fails.
//! Placeholders and unparseable values become zero so one gap in a row
//! does not cost the rest of it. Fields a query marks nullable stay null
//! when blank so a join can still fill them; [`fill_nullable`] zeroes them
//! afterwards.

use tracing::debug;

use crate::domain::query::{FIRST_NAME_COLUMN, LASTNAME_COLUMN};
use crate::domain::{ColumnType, Dataset, DatasetSchema, PartialRecord, QuerySpec, Value};
use crate::infrastructure::normalize::split_name;

/// Raw markers that stand for "no value" in numeric columns
const NUMERIC_SENTINELS: [&str; 3] = ["-", "nan", ""];

/// Marker the site prints for a team or player that has not played
pub const PLACEHOLDER: &str = "-";

/// Converts one raw cell into a typed value
pub fn coerce_value(raw: Option<&str>, ty: ColumnType) -> Value {
    match ty {
        ColumnType::Text => raw.map_or(Value::Null, Value::from),
        ColumnType::Int => Value::Int(parse_int(raw.unwrap_or_default())),
        ColumnType::Float => Value::Float(parse_float(raw.unwrap_or_default())),
    }
}

fn is_blank(raw: Option<&str>) -> bool {
    raw.is_none_or(|text| NUMERIC_SENTINELS.contains(&text.trim()))
}

fn numeric_text(raw: &str) -> &str {
    let trimmed = raw.trim();
    if NUMERIC_SENTINELS.contains(&trimmed) { "0" } else { trimmed }
}

fn parse_int(raw: &str) -> i64 {
    let text = numeric_text(raw);
    if let Ok(value) = text.parse::<i64>() {
        return value;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

fn parse_float(raw: &str) -> f64 {
    match numeric_text(raw).parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Builds a rectangular dataset with exactly the columns of `schema`
///
/// Fields a record carries that the schema does not declare are ignored.
pub fn coerce(records: &[PartialRecord], schema: &DatasetSchema) -> Dataset {
    coerce_rows(records, schema, &[])
}

fn coerce_rows(records: &[PartialRecord], schema: &DatasetSchema, nullable: &[String]) -> Dataset {
    let mut dataset = Dataset::empty(schema.names());
    for record in records {
        let row = schema
            .iter()
            .map(|(name, ty)| {
                let raw = record.get(name);
                if ty.is_numeric() && is_blank(raw) && nullable.iter().any(|field| field == name) {
                    Value::Null
                } else {
                    coerce_value(raw, ty)
                }
            })
            .collect();
        dataset.push_row(row);
    }
    dataset
}

/// Zero-fills whatever the query's nullable fields still hold as null
pub fn fill_nullable(dataset: &mut Dataset, spec: &QuerySpec) {
    let schema = spec.output_schema();
    for field in &spec.nullable_fields {
        if let Some(ty) = schema.type_of(field) {
            dataset.fill_null(field, &coerce_value(None, ty));
        }
    }
}

/// Applies a query's row filters and derived fields, then coerces
pub struct Finalizer<'a> {
    spec: &'a QuerySpec,
    schema: DatasetSchema,
}

impl<'a> Finalizer<'a> {
    pub fn new(spec: &'a QuerySpec) -> Self {
        Self {
            spec,
            schema: spec.output_schema(),
        }
    }

    pub const fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Filters, derives split-name fields and coerces to the output schema
    pub fn finalize(&self, records: Vec<PartialRecord>) -> Dataset {
        let before = records.len();
        let kept: Vec<PartialRecord> = records
            .into_iter()
            .filter(|record| self.keeps(record))
            .map(|record| self.split_names(record))
            .collect();

        if kept.len() < before {
            debug!("Dropped {} placeholder or incomplete rows", before - kept.len());
        }
        coerce_rows(&kept, &self.schema, &self.spec.nullable_fields)
    }

    fn keeps(&self, record: &PartialRecord) -> bool {
        if let Some(field) = &self.spec.placeholder_field {
            if record.get(field) == Some(PLACEHOLDER) {
                return false;
            }
        }
        match &self.spec.required_field {
            Some(field) => record.is_present(field),
            None => true,
        }
    }

    fn split_names(&self, mut record: PartialRecord) -> PartialRecord {
        if let Some(field) = &self.spec.name_split {
            if let Some(full_name) = record.get(field) {
                let (last, first) = split_name(full_name);
                record.insert(LASTNAME_COLUMN, last);
                record.insert(FIRST_NAME_COLUMN, first);
            }
        }
        record
    }
}
