//! Statistical drift evaluator
//!
//! Orchestrates one run: fetches the current and reference snapshots, loads
//! or establishes the baseline, runs each configured monitor against the
//! statistical test library, applies thresholds, and classifies severity.
//!
//! Monitors are evaluated in configuration order and independently: a failure
//! inside one monitor becomes a `severity = error` result and never aborts
//! the run. Only the snapshot fetches (and an empty reference) are fatal.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};

use super::{DriftEvaluator, DriftRunRequest};
use crate::baseline::{BaselineKey, BaselineRecord, BaselineStore};
use crate::constants::{COLUMN_PSI_THRESHOLD, DEFAULT_BASELINE_DAYS};
use crate::error::DriftError;
use crate::fetch::ReferenceFetcher;
use crate::monitor::{MonitorKind, MonitorSpec};
use crate::result::{DriftResult, DriftRunResult, RunStatus, Severity};
use crate::snapshot::DatasetSnapshot;
use crate::stats::{psi, schema_diff, zscore};

pub struct StatisticalEvaluator {
    fetcher: Arc<dyn ReferenceFetcher>,
    store: Arc<dyn BaselineStore>,
    /// Volume history retention, in entries.
    baseline_days: usize,
}

impl StatisticalEvaluator {
    pub fn new(fetcher: Arc<dyn ReferenceFetcher>, store: Arc<dyn BaselineStore>) -> Self {
        Self {
            fetcher,
            store,
            baseline_days: DEFAULT_BASELINE_DAYS,
        }
    }

    pub fn with_baseline_days(mut self, baseline_days: usize) -> Self {
        self.baseline_days = baseline_days.max(1);
        self
    }

    fn evaluate_monitor(
        &self,
        spec: &MonitorSpec,
        current: &DatasetSnapshot,
        record: &mut BaselineRecord,
        first_run: bool,
        dirty: &mut bool,
    ) -> DriftResult {
        let outcome = match spec.kind {
            MonitorKind::Schema => Ok(detect_schema_drift(spec, current, record, first_run)),
            MonitorKind::Volume => Ok(self.detect_volume_drift(spec, current, record, first_run, dirty)),
            MonitorKind::Distribution => detect_distribution_drift(spec, current, record, dirty),
            MonitorKind::Dataset => Ok(detect_dataset_drift(spec, current, record, first_run)),
        };

        match outcome {
            Ok(result) => result,
            Err(reason) => {
                error!(
                    monitor = %spec.name,
                    kind = %spec.kind,
                    %reason,
                    "monitor evaluation failed"
                );
                DriftResult::failure(
                    &spec.name,
                    spec.kind,
                    format!("{} drift detection failed: {}", spec.kind, reason),
                )
            }
        }
    }

    fn detect_volume_drift(
        &self,
        spec: &MonitorSpec,
        current: &DatasetSnapshot,
        record: &mut BaselineRecord,
        first_run: bool,
        dirty: &mut bool,
    ) -> DriftResult {
        let current_count = current.row_count() as u64;
        let baseline_count = record.row_count as u64;

        if first_run {
            let mut details = serde_json::Map::new();
            details.insert("current_count".into(), json!(current_count));
            details.insert("baseline_count".into(), json!(baseline_count));
            return DriftResult {
                monitor_name: spec.name.clone(),
                drift_type: spec.kind,
                detected: false,
                severity: Severity::Info,
                metric_value: Some(baseline_count as f64),
                threshold: Some(spec.threshold),
                details,
                message: format!("Baseline established with {} rows", baseline_count),
            };
        }

        let z = if record.volume_history.len() >= 2 {
            let history: Vec<f64> = record.volume_history.iter().map(|c| *c as f64).collect();
            zscore(current_count as f64, &history)
        } else {
            // Not enough history for a stdev; approximate with a scaled
            // relative change.
            let pct_change = (current_count as f64 - baseline_count as f64).abs()
                / (baseline_count.max(1) as f64)
                * 100.0;
            pct_change / 10.0
        };

        let detected = z.abs() > spec.threshold;

        record.record_volume(current_count, self.baseline_days);
        *dirty = true;

        let mut details = serde_json::Map::new();
        details.insert("current_count".into(), json!(current_count));
        details.insert("baseline_count".into(), json!(baseline_count));
        details.insert("z_score".into(), json!(z));

        DriftResult {
            monitor_name: spec.name.clone(),
            drift_type: spec.kind,
            detected,
            severity: if detected {
                Severity::Warning
            } else {
                Severity::Info
            },
            metric_value: Some(z.abs()),
            threshold: Some(spec.threshold),
            details,
            message: if detected {
                format!(
                    "Volume drift detected: Z-score {:.2} exceeds threshold {}",
                    z, spec.threshold
                )
            } else {
                format!("Volume stable: {} rows (Z-score: {:.2})", current_count, z)
            },
        }
    }
}

impl DriftEvaluator for StatisticalEvaluator {
    fn evaluate(&self, request: &DriftRunRequest) -> Result<DriftRunResult, DriftError> {
        let mut run = DriftRunResult::new(request.dataset_id);

        info!(
            run_id = %run.run_id,
            dataset_id = %request.dataset_id,
            table = %request.table,
            monitors = request.config.monitors.len(),
            "starting drift detection"
        );

        let current = self.fetcher.fetch_current(&request.table)?;
        let reference = self
            .fetcher
            .fetch_reference(&request.table, request.config.time_travel_days)?;

        if reference.snapshot.is_empty() {
            return Err(DriftError::InsufficientReferenceData {
                table: request.table.qualified_name(),
                offset_days: request.config.time_travel_days,
            });
        }

        run.status = RunStatus::Running;

        let key = BaselineKey::new(request.tenant_id, request.dataset_id);
        let existing = self.store.get(&key)?;
        let first_run = existing.is_none();
        let mut record = match existing {
            Some(record) => record,
            None => {
                info!(key = %key, "no baseline found, establishing from reference snapshot");
                BaselineRecord::from_snapshot(reference.snapshot.clone())
            }
        };
        let mut dirty = first_run;

        for spec in &request.config.monitors {
            let mut result =
                self.evaluate_monitor(spec, &current, &mut record, first_run, &mut dirty);
            if reference.time_travel_fallback {
                result
                    .details
                    .insert("time_travel_fallback".into(), json!(true));
            }
            run.push(result);
        }

        if dirty {
            // A failed save is not fatal this late: every monitor has already
            // produced its result. The next run re-establishes instead.
            if let Err(e) = self.store.put(&key, record) {
                error!(key = %key, error = %e, "failed to persist baseline");
            }
        }

        run.complete();
        info!(
            run_id = %run.run_id,
            total = run.total_monitors(),
            drifted = run.drift_detected_count(),
            "drift detection completed"
        );
        Ok(run)
    }
}

fn detect_schema_drift(
    spec: &MonitorSpec,
    current: &DatasetSnapshot,
    record: &BaselineRecord,
    first_run: bool,
) -> DriftResult {
    if first_run {
        let mut details = serde_json::Map::new();
        details.insert("columns".into(), json!(record.columns.len()));
        return DriftResult {
            monitor_name: spec.name.clone(),
            drift_type: spec.kind,
            detected: false,
            severity: Severity::Info,
            metric_value: None,
            threshold: Some(spec.threshold),
            details,
            message: format!("Baseline established with {} columns", record.columns.len()),
        };
    }

    let diff = schema_diff(&record.schema, &current.schema_map());
    let detected = !diff.is_empty();

    let mut details = serde_json::Map::new();
    details.insert("added".into(), json!(diff.added));
    details.insert("removed".into(), json!(diff.removed));
    details.insert("modified".into(), json!(diff.modified));

    DriftResult {
        monitor_name: spec.name.clone(),
        drift_type: spec.kind,
        detected,
        severity: if detected {
            Severity::Critical
        } else {
            Severity::Info
        },
        metric_value: None,
        threshold: Some(spec.threshold),
        message: if detected {
            format!(
                "Schema drift: {} added, {} removed, {} modified",
                diff.added.len(),
                diff.removed.len(),
                diff.modified.len()
            )
        } else {
            "No schema drift detected".to_string()
        },
        details,
    }
}

fn detect_distribution_drift(
    spec: &MonitorSpec,
    current: &DatasetSnapshot,
    record: &mut BaselineRecord,
    dirty: &mut bool,
) -> Result<DriftResult, String> {
    let column = spec
        .column
        .as_deref()
        .ok_or_else(|| "column name required for distribution drift detection".to_string())?;

    let current_dist = current
        .value_distribution(column)
        .ok_or_else(|| format!("column '{}' not found in current snapshot", column))?;

    if current_dist.is_empty() {
        return Ok(DriftResult {
            monitor_name: spec.name.clone(),
            drift_type: spec.kind,
            detected: false,
            severity: Severity::Info,
            metric_value: None,
            threshold: Some(spec.threshold),
            details: serde_json::Map::new(),
            message: format!("No data found for column {}", column),
        });
    }

    // Column baselines are established lazily: the first monitor to target a
    // column snapshots its distribution out of the stored baseline sample.
    let baseline_dist = match record.column_distribution(column) {
        Some(dist) => dist.clone(),
        None => {
            let established = record
                .snapshot
                .value_distribution(column)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| current_dist.clone());
            let unique_values = established.len();
            record.set_column_distribution(column, established);
            *dirty = true;

            let mut details = serde_json::Map::new();
            details.insert("column".into(), json!(column));
            details.insert("unique_values".into(), json!(unique_values));
            return Ok(DriftResult {
                monitor_name: spec.name.clone(),
                drift_type: spec.kind,
                detected: false,
                severity: Severity::Info,
                metric_value: None,
                threshold: Some(spec.threshold),
                details,
                message: format!(
                    "Baseline established for column {} with {} unique values",
                    column, unique_values
                ),
            });
        }
    };
    let value = psi(&baseline_dist, &current_dist);
    let detected = value > spec.threshold;

    let mut details = serde_json::Map::new();
    details.insert("column".into(), json!(column));
    details.insert("psi".into(), json!(value));
    details.insert("current_unique_values".into(), json!(current_dist.len()));
    details.insert("baseline_unique_values".into(), json!(baseline_dist.len()));

    Ok(DriftResult {
        monitor_name: spec.name.clone(),
        drift_type: spec.kind,
        detected,
        severity: if detected {
            Severity::Warning
        } else {
            Severity::Info
        },
        metric_value: Some(value),
        threshold: Some(spec.threshold),
        details,
        message: if detected {
            format!(
                "Distribution drift detected: PSI {:.4} exceeds threshold {}",
                value, spec.threshold
            )
        } else {
            format!("Distribution stable for {} (PSI: {:.4})", column, value)
        },
    })
}

fn detect_dataset_drift(
    spec: &MonitorSpec,
    current: &DatasetSnapshot,
    record: &BaselineRecord,
    first_run: bool,
) -> DriftResult {
    if first_run {
        let mut details = serde_json::Map::new();
        details.insert("columns".into(), json!(record.columns.len()));
        return DriftResult {
            monitor_name: spec.name.clone(),
            drift_type: spec.kind,
            detected: false,
            severity: Severity::Info,
            metric_value: None,
            threshold: Some(spec.threshold),
            details,
            message: format!(
                "Baseline established with {} columns; dataset drift evaluated from the next run",
                record.columns.len()
            ),
        };
    }

    // Share of columns whose individual PSI crosses the per-column band.
    let mut compared = 0usize;
    let mut drifted = 0usize;
    for column in &record.columns {
        let baseline_dist = match record.snapshot.value_distribution(column) {
            Some(d) if !d.is_empty() => d,
            _ => continue,
        };
        let current_dist = match current.value_distribution(column) {
            Some(d) if !d.is_empty() => d,
            _ => continue,
        };
        compared += 1;
        if psi(&baseline_dist, &current_dist) > COLUMN_PSI_THRESHOLD {
            drifted += 1;
        }
    }

    let share = if compared > 0 {
        drifted as f64 / compared as f64
    } else {
        0.0
    };
    // Inclusive comparison: a share sitting exactly on the threshold counts
    // as dataset-level drift.
    let detected = compared > 0 && share >= spec.threshold;

    let mut details = serde_json::Map::new();
    details.insert("drifted_columns_count".into(), json!(drifted));
    details.insert("columns_compared".into(), json!(compared));
    details.insert("drift_share".into(), json!(share));

    DriftResult {
        monitor_name: spec.name.clone(),
        drift_type: spec.kind,
        detected,
        severity: if detected {
            Severity::Critical
        } else {
            Severity::Info
        },
        metric_value: Some(share),
        threshold: Some(spec.threshold),
        details,
        message: format!(
            "Dataset drift: {} of {} columns drifted ({:.1}%)",
            drifted,
            compared,
            share * 100.0
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
