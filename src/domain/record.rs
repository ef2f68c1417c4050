//! Raw tables and partially assembled records

use std::collections::BTreeMap;
use std::fmt;

/// Serialized markup of one `<table>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable(String);

impl RawTable {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn markup(&self) -> &str {
        &self.0
    }
}

/// Field-name to raw-string map for one entity, built up as pages arrive
///
/// Values stay textual until the dataset is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRecord {
    fields: BTreeMap<String, String>,
}

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// A field is present when it exists with a non-empty value
    pub fn is_present(&self, field: &str) -> bool {
        self.get(field).is_some_and(|value| !value.is_empty())
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Key built from the given fields; a missing field contributes an
    /// empty segment
    pub fn identity_key(&self, key_fields: &[String]) -> IdentityKey {
        IdentityKey(
            key_fields
                .iter()
                .map(|field| self.get(field).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("_"),
        )
    }

    /// Copies every present field of `incoming` over this record, leaving
    /// fields listed in `protected` alone once they are present here
    pub fn overlay(&mut self, incoming: &Self, protected: &[String]) {
        for (field, value) in incoming.fields() {
            if value.is_empty() {
                continue;
            }
            if self.is_present(field) && protected.iter().any(|p| p == field) {
                continue;
            }
            self.insert(field, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PartialRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Merge key of a record, its identity fields joined by `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
