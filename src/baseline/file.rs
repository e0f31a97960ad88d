//! File-backed baseline store.
//!
//! One pretty-printed JSON file per (tenant, dataset) key under a data
//! directory, so concurrent evaluator processes sharing the directory observe
//! the same baseline. Writes take a per-key mutex within the process and land
//! via rename of a temp file in the same directory, so a reader never sees a
//! half-written record and concurrent processes resolve to last-writer-wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use uuid::Uuid;

use super::types::{BaselineKey, BaselineRecord};
use super::BaselineStore;
use crate::error::StoreError;

pub struct FileBaselineStore {
    root: PathBuf,
    write_locks: Mutex<HashMap<BaselineKey, Arc<Mutex<()>>>>,
}

impl FileBaselineStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Default data directory, `<local data dir>/driftguard/baselines`.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("driftguard")
            .join("baselines")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &BaselineKey) -> PathBuf {
        self.root.join(key.storage_name())
    }

    fn key_lock(&self, key: &BaselineKey) -> Arc<Mutex<()>> {
        let mut locks = self.write_locks.lock();
        locks.entry(*key).or_default().clone()
    }
}

impl BaselineStore for FileBaselineStore {
    fn get(&self, key: &BaselineKey) -> Result<Option<BaselineRecord>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path)?;
        let record: BaselineRecord = serde_json::from_slice(&data)?;
        Ok(Some(record))
    }

    fn put(
        &self,
        key: &BaselineKey,
        record: BaselineRecord,
    ) -> Result<BaselineRecord, StoreError> {
        let lock = self.key_lock(key);
        let _guard = lock.lock();

        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_vec_pretty(&record)?;

        // Rename within the same directory is atomic, so a concurrent `get`
        // observes either the old record or the new one, never a torn file.
        // The unique temp name keeps writers in other processes from
        // interleaving into the same scratch file.
        let tmp = self
            .root
            .join(format!("{}.{}.tmp", key.storage_name(), Uuid::new_v4()));
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, self.path_for(key)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        info!(
            key = %key,
            rows = record.row_count,
            columns = record.columns.len(),
            "saved baseline"
        );
        Ok(record)
    }

    fn delete(&self, key: &BaselineKey) -> Result<bool, StoreError> {
        let lock = self.key_lock(key);
        let _guard = lock.lock();

        let path = self.path_for(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        info!(key = %key, "deleted baseline");
        Ok(true)
    }
}
