//! Record merging across pages
//!
//! Several pages describe the same entity with different statistic
//! columns. The merger folds them into one record per identity key,
//! keeping the order in which keys were first seen.

use std::collections::HashMap;

use crate::domain::{IdentityKey, PartialRecord};

/// Merges partial records that share an identity key
#[derive(Debug, Clone, Default)]
pub struct EntityMerger {
    key_fields: Vec<String>,
    protected: Vec<String>,
}

impl EntityMerger {
    pub fn new(key_fields: &[String]) -> Self {
        Self {
            key_fields: key_fields.to_vec(),
            protected: Vec::new(),
        }
    }

    /// Fields that keep their first present value
    pub fn with_protected(mut self, fields: &[String]) -> Self {
        self.protected = fields.to_vec();
        self
    }

    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }

    /// Folds `incoming` into `running`
    ///
    /// Records of `incoming` whose key already exists overlay the earlier
    /// record; new keys are appended in arrival order. Two records in the
    /// same batch with the same key are merged too.
    pub fn merge(&self, running: Vec<PartialRecord>, incoming: Vec<PartialRecord>) -> Vec<PartialRecord> {
        let mut merged = running;
        let mut index: HashMap<IdentityKey, usize> = merged
            .iter()
            .enumerate()
            .map(|(position, record)| (record.identity_key(&self.key_fields), position))
            .collect();

        for record in incoming {
            let key = record.identity_key(&self.key_fields);
            match index.get(&key) {
                Some(&position) => merged[position].overlay(&record, &self.protected),
                None => {
                    index.insert(key, merged.len());
                    merged.push(record);
                }
            }
        }
        merged
    }

    /// Merges a sequence of batches left to right
    pub fn merge_all<I>(&self, batches: I) -> Vec<PartialRecord>
    where
        I: IntoIterator<Item = Vec<PartialRecord>>,
    {
        batches
            .into_iter()
            .fold(Vec::new(), |running, batch| self.merge(running, batch))
    }
}
