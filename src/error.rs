//! Error handling
//!
//! Fatal errors abort the whole run before any monitor executes; per-monitor
//! failures are never surfaced here. They are folded into the result stream
//! as `severity = error` entries by the evaluator.

use thiserror::Error;

/// Configuration errors. Surfaced before any fetch occurs; the run never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid monitor configuration: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("monitor {index}: missing monitor type")]
    MissingKind { index: usize },

    #[error("monitor {index}: unknown monitor type '{kind}'")]
    UnknownKind { index: usize, kind: String },

    #[error("monitor {index} ('{name}'): column is required for distribution monitors")]
    MissingColumn { index: usize, name: String },

    #[error("monitor {index} ('{name}'): threshold must be non-negative, got {threshold}")]
    NegativeThreshold {
        index: usize,
        name: String,
        threshold: f64,
    },
}

/// Snapshot retrieval errors (connectivity, authorization, query failure).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch current snapshot of {table}: {reason}")]
    Current { table: String, reason: String },

    #[error("failed to fetch reference snapshot of {table} at {offset_days} day(s) back: {reason}")]
    Reference {
        table: String,
        offset_days: u32,
        reason: String,
    },
}

/// Baseline store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("baseline store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("baseline store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fatal drift-run errors. Anything here means the run status is `failed`
/// and no partial results are produced.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Reference fetch succeeded but returned no rows (table too new,
    /// history purged). No monitor can meaningfully execute without it.
    #[error("reference snapshot of {table} at {offset_days} day(s) back contained no rows")]
    InsufficientReferenceData { table: String, offset_days: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
