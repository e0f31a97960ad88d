//! Engine-wide constants.

/// Maximum number of rows retained in a [`DatasetSnapshot`](crate::DatasetSnapshot).
/// Snapshots are bounded samples; anything beyond the cap is dropped at
/// construction time.
pub const MAX_SAMPLE_ROWS: usize = 10_000;

/// Default time-travel offset (days) for the reference snapshot.
pub const DEFAULT_TIME_TRAVEL_DAYS: u32 = 1;

/// Default retention for the rolling volume history, in entries.
/// One entry per run, so with daily runs this is roughly 30 days of history.
pub const DEFAULT_BASELINE_DAYS: usize = 30;

/// Default thresholds per monitor kind.
pub const DEFAULT_SCHEMA_THRESHOLD: f64 = 0.0; // any change is drift
pub const DEFAULT_VOLUME_THRESHOLD: f64 = 3.0; // z-score
pub const DEFAULT_DISTRIBUTION_THRESHOLD: f64 = 0.25; // PSI
pub const DEFAULT_DATASET_THRESHOLD: f64 = 0.1; // drifted-column share

/// PSI above which a single column counts as drifted in a dataset-level
/// monitor. Matches the conventional "significant change" PSI band.
pub const COLUMN_PSI_THRESHOLD: f64 = 0.25;

/// Smoothing epsilon applied to every proportion in the PSI computation so
/// that absent categories never produce `log(0)` or a division by zero.
pub const PSI_EPSILON: f64 = 1e-4;
