//! driftguard - Drift Detection Engine
//!
//! Decides, for a monitored table, whether its current data has statistically
//! diverged from a reference ("baseline") snapshot.
//!
//! # Architecture
//! - `stats/` - Pure statistical tests (PSI, categorical association, z-score, schema diff)
//! - `monitor/` - Monitor configuration model + YAML parser
//! - `baseline/` - Keyed baseline store (in-memory and file-backed)
//! - `fetch` - Reference fetcher collaborator interface (time travel)
//! - `evaluate/` - Drift evaluator (statistical engine + mock test double)
//! - `result` - Per-monitor results and run-level aggregates
//!
//! # Failure Strategy
//! Config and snapshot-fetch failures abort the whole run; a failure inside a
//! single monitor is folded into its `DriftResult` with `severity = error` and
//! never hides the remaining monitors. The engine performs no retries.

pub mod constants;
pub mod error;
pub mod snapshot;
pub mod stats;
pub mod monitor;
pub mod baseline;
pub mod fetch;
pub mod result;
pub mod evaluate;

pub use error::{ConfigError, DriftError, FetchError, StoreError};
pub use snapshot::{ColumnDef, DatasetSnapshot, TableRef};
pub use monitor::{MonitorKind, MonitorSpec, StatTest};
pub use monitor::parser::{parse_monitor_config, ParsedConfig};
pub use baseline::{BaselineKey, BaselineRecord, BaselineStore};
pub use baseline::memory::MemoryBaselineStore;
pub use baseline::file::FileBaselineStore;
pub use fetch::{ReferenceData, ReferenceFetcher, StaticFetcher};
pub use result::{DriftResult, DriftRunResult, RunStatus, Severity};
pub use evaluate::{build_evaluator, DriftEvaluator, DriftRunRequest, EvaluatorBackend};
pub use evaluate::statistical::StatisticalEvaluator;
pub use evaluate::mock::MockEvaluator;
