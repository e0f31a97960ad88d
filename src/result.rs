//! Result model
//!
//! The structured, serializable outcome of a drift run: ordered per-monitor
//! results plus run-level aggregates. Aggregates are computed over `results`
//! on every call, never cached, so they cannot go stale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::monitor::MonitorKind;

/// Per-result severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
    /// The monitor's own computation failed; the run continued without it.
    Error,
}

/// Run lifecycle: `pending -> running -> {completed, failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One monitor's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftResult {
    pub monitor_name: String,
    pub drift_type: MonitorKind,
    pub detected: bool,
    pub severity: Severity,
    pub metric_value: Option<f64>,
    pub threshold: Option<f64>,
    #[serde(default)]
    pub details: Map<String, Value>,
    pub message: String,
}

impl DriftResult {
    /// Per-monitor failure, recovered into the result stream so one bad
    /// column never hides results for the rest of the table.
    pub fn failure(
        monitor_name: impl Into<String>,
        drift_type: MonitorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            monitor_name: monitor_name.into(),
            drift_type,
            detected: false,
            severity: Severity::Error,
            metric_value: None,
            threshold: None,
            details: Map::new(),
            message: message.into(),
        }
    }
}

/// The aggregate outcome of one drift run. `results` keeps monitor
/// configuration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftRunResult {
    pub run_id: Uuid,
    pub dataset_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: RunStatus,
    pub results: Vec<DriftResult>,
}

impl DriftRunResult {
    pub fn new(dataset_id: Uuid) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            dataset_id,
            started_at: Utc::now(),
            completed_at: None,
            status: RunStatus::Pending,
            results: Vec::new(),
        }
    }

    pub fn total_monitors(&self) -> usize {
        self.results.len()
    }

    pub fn drift_detected_count(&self) -> usize {
        self.results.iter().filter(|r| r.detected).count()
    }

    pub fn push(&mut self, result: DriftResult) {
        self.results.push(result);
    }

    /// Stamp the run completed.
    pub fn complete(&mut self) {
        self.status = RunStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Stamp the run failed. Already-produced results remain valid and may
    /// be surfaced as a partial run.
    pub fn fail(&mut self) {
        self.status = RunStatus::Failed;
        self.completed_at = Some(Utc::now());
    }

    /// Wire shape, with the computed aggregates included.
    pub fn to_json(&self) -> Value {
        json!({
            "run_id": self.run_id,
            "dataset_id": self.dataset_id,
            "started_at": self.started_at,
            "completed_at": self.completed_at,
            "status": self.status,
            "total_monitors": self.total_monitors(),
            "drift_detected_count": self.drift_detected_count(),
            "results": self.results,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, detected: bool) -> DriftResult {
        DriftResult {
            monitor_name: name.to_string(),
            drift_type: MonitorKind::Volume,
            detected,
            severity: if detected {
                Severity::Warning
            } else {
                Severity::Info
            },
            metric_value: Some(1.0),
            threshold: Some(3.0),
            details: Map::new(),
            message: String::new(),
        }
    }

    #[test]
    fn test_counts_are_live() {
        let mut run = DriftRunResult::new(Uuid::new_v4());
        assert_eq!(run.total_monitors(), 0);
        assert_eq!(run.drift_detected_count(), 0);

        run.push(result("a", true));
        run.push(result("b", false));
        run.push(DriftResult::failure("c", MonitorKind::Schema, "boom"));

        assert_eq!(run.total_monitors(), 3);
        assert_eq!(run.drift_detected_count(), 1);
        assert!(run.drift_detected_count() <= run.total_monitors());
    }

    #[test]
    fn test_lifecycle_stamps() {
        let mut run = DriftRunResult::new(Uuid::new_v4());
        assert_eq!(run.status, RunStatus::Pending);
        assert!(run.completed_at.is_none());

        run.status = RunStatus::Running;
        run.complete();
        assert_eq!(run.status, RunStatus::Completed);
        assert!(run.completed_at.is_some());
    }

    #[test]
    fn test_cancelled_run_keeps_partial_results() {
        let mut run = DriftRunResult::new(Uuid::new_v4());
        run.status = RunStatus::Running;
        run.push(result("a", true));
        run.push(result("b", false));

        run.fail();
        assert_eq!(run.status, RunStatus::Failed);
        assert!(run.completed_at.is_some());

        // Already-produced results survive and the aggregates stay live.
        assert_eq!(run.total_monitors(), 2);
        assert_eq!(run.drift_detected_count(), 1);
        assert_eq!(run.to_json()["status"], "failed");
    }

    #[test]
    fn test_wire_shape_includes_aggregates() {
        let mut run = DriftRunResult::new(Uuid::new_v4());
        run.push(result("a", true));
        run.complete();

        let wire = run.to_json();
        assert_eq!(wire["total_monitors"], 1);
        assert_eq!(wire["drift_detected_count"], 1);
        assert_eq!(wire["status"], "completed");
        assert_eq!(wire["results"][0]["monitor_name"], "a");
        assert_eq!(wire["results"][0]["severity"], "warning");
        assert_eq!(wire["results"][0]["drift_type"], "volume");
    }

    #[test]
    fn test_failure_result_shape() {
        let failure = DriftResult::failure("bad", MonitorKind::Distribution, "no such column");
        assert!(!failure.detected);
        assert_eq!(failure.severity, Severity::Error);
        assert_eq!(failure.message, "no such column");
        assert!(failure.metric_value.is_none());
    }
}
