//! # Record Store
//!
//! Mapping from sequence id to content record. Every entry's
//! `sequence_id` equals its key.

use std::collections::BTreeMap;

use super::errors::{RegistryError, RegistryResult};
use super::types::{ContentRecord, SequenceId};

#[derive(Debug, Default)]
pub struct RecordStore {
    records: BTreeMap<SequenceId, ContentRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: SequenceId) -> Option<&ContentRecord> {
        self.records.get(&id)
    }

    /// Inserts a new record; fails if the id is already present.
    pub fn insert(&mut self, record: ContentRecord) -> RegistryResult<()> {
        let id = record.sequence_id;
        if self.records.contains_key(&id) {
            return Err(RegistryError::AlreadyExists(id));
        }
        self.records.insert(id, record);
        Ok(())
    }

    /// Replaces an existing record; fails if the id is absent.
    pub fn update(&mut self, record: ContentRecord) -> RegistryResult<()> {
        match self.records.get_mut(&record.sequence_id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RegistryError::NotFound(record.sequence_id)),
        }
    }

    /// Removes an existing record; fails if the id is absent.
    pub fn remove(&mut self, id: SequenceId) -> RegistryResult<ContentRecord> {
        self.records.remove(&id).ok_or(RegistryError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.values()
    }
}
