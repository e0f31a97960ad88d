use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::snapshot::DatasetSnapshot;

/// (tenant, dataset) pair a baseline is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaselineKey {
    pub tenant_id: Uuid,
    pub dataset_id: Uuid,
}

impl BaselineKey {
    pub fn new(tenant_id: Uuid, dataset_id: Uuid) -> Self {
        Self {
            tenant_id,
            dataset_id,
        }
    }

    /// File name the file-backed store uses for this key.
    pub fn storage_name(&self) -> String {
        format!("{}__{}.json", self.tenant_id, self.dataset_id)
    }
}

impl fmt::Display for BaselineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.dataset_id)
    }
}

/// The persisted reference snapshot plus the metadata the monitors compare
/// against. `columns` and `schema` always describe the snapshot the record
/// was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub snapshot: DatasetSnapshot,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub schema: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,

    /// Rolling row counts for the volume z-score, oldest first, bounded by
    /// the configured retention.
    #[serde(default)]
    pub volume_history: Vec<u64>,

    /// Per-column value distributions, established lazily the first time a
    /// distribution monitor targets the column.
    #[serde(default)]
    pub column_distributions: HashMap<String, HashMap<String, u64>>,
}

impl BaselineRecord {
    /// Build a record from a reference snapshot. Metadata is derived from the
    /// snapshot itself, which keeps the columns-match-snapshot invariant by
    /// construction. The volume history is seeded with the snapshot's count.
    pub fn from_snapshot(snapshot: DatasetSnapshot) -> Self {
        let row_count = snapshot.row_count();
        let columns = snapshot.column_names();
        let schema = snapshot.schema_map();
        Self {
            snapshot,
            row_count,
            columns,
            schema,
            created_at: Utc::now(),
            volume_history: vec![row_count as u64],
            column_distributions: HashMap::new(),
        }
    }

    /// Append a row count observation, evicting the oldest entries once the
    /// retention cap is exceeded.
    pub fn record_volume(&mut self, count: u64, retention: usize) {
        self.volume_history.push(count);
        if self.volume_history.len() > retention {
            let excess = self.volume_history.len() - retention;
            self.volume_history.drain(0..excess);
        }
    }

    pub fn column_distribution(&self, column: &str) -> Option<&HashMap<String, u64>> {
        self.column_distributions.get(column)
    }

    pub fn set_column_distribution(&mut self, column: &str, distribution: HashMap<String, u64>) {
        self.column_distributions
            .insert(column.to_string(), distribution);
    }
}
