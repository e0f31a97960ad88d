//! Mock evaluator
//!
//! Randomized test double for wiring up callers without a warehouse behind
//! them. Each monitor independently drifts with 30% probability and reports
//! a uniform metric in `[0, 0.5)`. Never touches the fetcher or the store.

use rand::Rng;
use serde_json::json;
use tracing::info;

use super::{DriftEvaluator, DriftRunRequest};
use crate::error::DriftError;
use crate::result::{DriftResult, DriftRunResult, RunStatus, Severity};

#[derive(Debug, Default)]
pub struct MockEvaluator;

impl MockEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl DriftEvaluator for MockEvaluator {
    fn evaluate(&self, request: &DriftRunRequest) -> Result<DriftRunResult, DriftError> {
        let mut run = DriftRunResult::new(request.dataset_id);
        run.status = RunStatus::Running;

        info!(
            run_id = %run.run_id,
            monitors = request.config.monitors.len(),
            "running mock drift detection"
        );

        let mut rng = rand::thread_rng();
        for spec in &request.config.monitors {
            let detected = rng.gen_bool(0.3);
            let mut details = serde_json::Map::new();
            details.insert("mock".into(), json!(true));

            run.push(DriftResult {
                monitor_name: spec.name.clone(),
                drift_type: spec.kind,
                detected,
                severity: if detected {
                    Severity::Warning
                } else {
                    Severity::Info
                },
                metric_value: Some(rng.gen_range(0.0..0.5)),
                threshold: Some(spec.threshold),
                details,
                message: format!(
                    "Mock {} drift {}",
                    spec.kind,
                    if detected { "detected" } else { "not detected" }
                ),
            });
        }

        run.complete();
        Ok(run)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::parser::ParsedConfig;
    use crate::monitor::{MonitorKind, MonitorSpec};
    use crate::snapshot::TableRef;
    use uuid::Uuid;

    fn request() -> DriftRunRequest {
        DriftRunRequest {
            tenant_id: Uuid::new_v4(),
            dataset_id: Uuid::new_v4(),
            table: TableRef::new("ORDERS"),
            config: ParsedConfig {
                time_travel_days: 1,
                monitors: vec![
                    MonitorSpec {
                        name: "schema_monitor".to_string(),
                        kind: MonitorKind::Schema,
                        column: None,
                        threshold: 0.0,
                        stat_test: None,
                    },
                    MonitorSpec {
                        name: "volume_monitor".to_string(),
                        kind: MonitorKind::Volume,
                        column: None,
                        threshold: 3.0,
                        stat_test: None,
                    },
                ],
                warnings: Vec::new(),
            },
        }
    }

    #[test]
    fn test_mock_produces_one_result_per_monitor() {
        let run = MockEvaluator::new().evaluate(&request()).unwrap();

        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.total_monitors(), 2);
        assert_eq!(run.results[0].monitor_name, "schema_monitor");
        assert_eq!(run.results[1].drift_type, MonitorKind::Volume);
        for result in &run.results {
            let metric = result.metric_value.unwrap();
            assert!((0.0..0.5).contains(&metric));
            assert!(result.message.starts_with("Mock "));
            assert_eq!(result.details["mock"], serde_json::json!(true));
        }
    }

    #[test]
    fn test_mock_severity_tracks_detection() {
        // Enough runs to see both outcomes with overwhelming probability.
        let evaluator = MockEvaluator::new();
        let req = request();
        for _ in 0..50 {
            let run = evaluator.evaluate(&req).unwrap();
            for result in &run.results {
                if result.detected {
                    assert_eq!(result.severity, Severity::Warning);
                } else {
                    assert_eq!(result.severity, Severity::Info);
                }
            }
        }
    }
}
