//! In-memory baseline store.
//!
//! Shared across concurrent evaluator instances in one process. The map-level
//! write lock serializes writers per key, which is all the at-most-one-writer
//! guarantee requires.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::types::{BaselineKey, BaselineRecord};
use super::BaselineStore;
use crate::error::StoreError;

#[derive(Default)]
pub struct MemoryBaselineStore {
    records: RwLock<HashMap<BaselineKey, BaselineRecord>>,
}

impl MemoryBaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl BaselineStore for MemoryBaselineStore {
    fn get(&self, key: &BaselineKey) -> Result<Option<BaselineRecord>, StoreError> {
        Ok(self.records.read().get(key).cloned())
    }

    fn put(
        &self,
        key: &BaselineKey,
        record: BaselineRecord,
    ) -> Result<BaselineRecord, StoreError> {
        self.records.write().insert(*key, record.clone());
        Ok(record)
    }

    fn delete(&self, key: &BaselineKey) -> Result<bool, StoreError> {
        Ok(self.records.write().remove(key).is_some())
    }
}
