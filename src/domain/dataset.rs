//! Rectangular, typed result tables

use std::collections::HashSet;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One typed cell of a finished dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Representation used for duplicate detection; floats compare by bits
    fn dedup_token(&self) -> String {
        match self {
            Self::Int(value) => format!("i{value}"),
            Self::Float(value) => format!("f{}", value.to_bits()),
            Self::Text(value) => format!("t{value}"),
            Self::Null => "n".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Named columns with equally wide rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Dataset with the given columns and no rows
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|values| values.get(index))
    }

    pub fn column_values(&self, column: &str) -> Vec<&Value> {
        self.column_index(column)
            .map(|index| self.rows.iter().map(|row| &row[index]).collect())
            .unwrap_or_default()
    }

    /// First row whose text value in `column` equals `needle`
    pub fn find_row(&self, column: &str, needle: &str) -> Option<&[Value]> {
        let index = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| row[index].as_str() == Some(needle))
            .map(Vec::as_slice)
    }

    /// Adds a column computed from each existing row
    pub fn append_column<F>(&mut self, name: &str, mut compute: F)
    where
        F: FnMut(&[Value]) -> Value,
    {
        for row in &mut self.rows {
            let value = compute(row);
            row.push(value);
        }
        self.columns.push(name.to_string());
    }

    /// Replaces nulls in `column` with `value`
    pub fn fill_null(&mut self, column: &str, value: &Value) {
        let Some(index) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            if row[index].is_null() {
                row[index] = value.clone();
            }
        }
    }

    pub fn drop_columns(&mut self, names: &[String]) {
        let keep: Vec<bool> = self.columns.iter().map(|c| !names.contains(c)).collect();
        for row in &mut self.rows {
            let mut index = 0;
            row.retain(|_| {
                let kept = keep[index];
                index += 1;
                kept
            });
        }
        self.columns.retain(|column| !names.contains(column));
    }

    /// Stacks datasets row-wise, aligning by column name
    ///
    /// Columns are ordered by first appearance; cells a source lacks are null.
    pub fn concat(parts: Vec<Self>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for part in &parts {
            for column in &part.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut combined = Self::empty(columns);
        for part in parts {
            let mapping: Vec<usize> = part
                .columns
                .iter()
                .filter_map(|column| combined.column_index(column))
                .collect();
            for row in part.rows {
                let mut aligned = vec![Value::Null; combined.columns.len()];
                for (value, &target) in row.into_iter().zip(&mapping) {
                    aligned[target] = value;
                }
                combined.rows.push(aligned);
            }
        }
        combined
    }

    /// Removes rows whose values over `subset` (or all columns) were already
    /// seen; the first occurrence is kept
    pub fn drop_duplicates(&mut self, subset: Option<&[String]>) {
        let indices: Vec<usize> = match subset {
            Some(names) => names.iter().filter_map(|n| self.column_index(n)).collect(),
            None => (0..self.columns.len()).collect(),
        };
        let mut seen = HashSet::new();
        self.rows.retain(|row| {
            let token: Vec<String> = indices.iter().map(|&i| row[i].dedup_token()).collect();
            seen.insert(token)
        });
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        struct Row<'a>(&'a [String], &'a [Value]);

        impl Serialize for Row<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (column, value) in self.0.iter().zip(self.1) {
                    map.serialize_entry(column, value)?;
                }
                map.end()
            }
        }

        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Row(&self.columns, row))?;
        }
        seq.end()
    }
}
