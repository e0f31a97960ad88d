//! Baseline store
//!
//! Persists the reference snapshot (and its metadata) per (tenant, dataset)
//! key, with exactly one live baseline per dataset. The store is the sole
//! source of "has a baseline ever been established" truth; the evaluator
//! never infers it from any other signal.
//!
//! # Architecture
//! - `types.rs`: `BaselineKey`, `BaselineRecord`
//! - `memory.rs`: in-memory store (parking_lot)
//! - `file.rs`: one JSON file per key under a data directory

pub mod file;
pub mod memory;
pub mod types;
#[cfg(test)]
mod tests;

pub use types::{BaselineKey, BaselineRecord};

use crate::error::StoreError;

/// Keyed baseline persistence.
///
/// `put` is the only write path and replaces any existing record for the key,
/// so there is always at most one live baseline per dataset. Implementations
/// must serialize writes per key; reads need no locking.
pub trait BaselineStore: Send + Sync {
    fn get(&self, key: &BaselineKey) -> Result<Option<BaselineRecord>, StoreError>;

    /// Replaces any existing record for `key` and returns the stored record.
    fn put(&self, key: &BaselineKey, record: BaselineRecord)
        -> Result<BaselineRecord, StoreError>;

    /// Returns whether a record existed.
    fn delete(&self, key: &BaselineKey) -> Result<bool, StoreError>;
}
