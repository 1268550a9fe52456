//! Supporter cache module
//!
//! This module provides the `SupporterCache` struct which maintains the
//! per-entity aggregate records while the input feeds are imported.
//!
//! The SupporterCache is responsible for:
//! - Creating a record the first time an entity key is seen
//! - Handing every later mention of that key the same record, so repeated
//!   mentions merge instead of duplicating
//! - Preserving first-seen order for deterministic report output

use crate::types::SupporterRecord;
use std::collections::HashMap;

/// Deduplicating store of supporter records, keyed by entity
///
/// The cache maintains exactly one record per distinct entity key. Records
/// are kept in the order their keys were first seen; iteration yields them
/// in that order regardless of how often each key recurred afterwards.
pub struct SupporterCache {
    /// Records in first-seen order
    records: Vec<SupporterRecord>,
    /// Map of entity keys to positions in `records`
    index: HashMap<String, usize>,
}

impl SupporterCache {
    /// Create a new SupporterCache with no records
    ///
    /// # Returns
    ///
    /// A new SupporterCache with an empty record list
    pub fn new() -> Self {
        SupporterCache {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get or create the record for the specified entity
    ///
    /// If a record already exists for the entity, returns a mutable
    /// reference to it. If no record exists, creates an empty record,
    /// appends it in first-seen order, and returns it.
    ///
    /// # Arguments
    ///
    /// * `entity` - The entity key to get or create a record for
    ///
    /// # Returns
    ///
    /// A mutable reference to the record for the specified entity
    pub fn get_or_create(&mut self, entity: &str) -> &mut SupporterRecord {
        if let Some(&position) = self.index.get(entity) {
            &mut self.records[position]
        } else {
            let position = self.records.len();
            self.index.insert(entity.to_string(), position);
            self.records.push(SupporterRecord::new(entity));
            &mut self.records[position]
        }
    }

    /// Look up the record for an entity without creating one
    ///
    /// # Arguments
    ///
    /// * `entity` - The entity key to look up
    ///
    /// # Returns
    ///
    /// A reference to the record, or `None` if the key was never seen
    pub fn get(&self, entity: &str) -> Option<&SupporterRecord> {
        self.index.get(entity).map(|&position| &self.records[position])
    }

    /// Check whether an entity key has been seen
    pub fn contains(&self, entity: &str) -> bool {
        self.index.contains_key(entity)
    }

    /// Number of distinct entities seen so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no entities have been seen yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in first-seen order
    ///
    /// # Returns
    ///
    /// An iterator over references to the records, ordered by when each
    /// entity key first appeared in the inputs
    pub fn iter(&self) -> impl Iterator<Item = &SupporterRecord> {
        self.records.iter()
    }
}

impl Default for SupporterCache {
    fn default() -> Self {
        Self::new()
    }
}
