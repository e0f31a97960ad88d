//! Drift evaluator
//!
//! One interface, two implementing variants selected by configuration:
//! the statistical engine (`statistical`) and an explicit randomized test
//! double (`mock`). Mock behavior lives behind the trait, never as a branch
//! inside the real evaluator.

pub mod mock;
pub mod statistical;

use std::sync::Arc;

use uuid::Uuid;

use crate::baseline::BaselineStore;
use crate::error::DriftError;
use crate::fetch::ReferenceFetcher;
use crate::monitor::parser::ParsedConfig;
use crate::result::DriftRunResult;
use crate::snapshot::TableRef;

/// Everything one drift run needs: the identity of the dataset, the table to
/// sample, and the already-parsed monitor configuration (parse failures never
/// start a run).
#[derive(Debug, Clone)]
pub struct DriftRunRequest {
    pub tenant_id: Uuid,
    pub dataset_id: Uuid,
    pub table: TableRef,
    pub config: ParsedConfig,
}

/// The single entry point the orchestration layer calls and then
/// persists/alerts on.
pub trait DriftEvaluator: Send + Sync {
    fn evaluate(&self, request: &DriftRunRequest) -> Result<DriftRunResult, DriftError>;
}

/// Backend selection for [`build_evaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluatorBackend {
    #[default]
    Statistical,
    Mock,
}

/// Build an evaluator for the selected backend. The mock backend ignores the
/// fetcher and store entirely.
pub fn build_evaluator(
    backend: EvaluatorBackend,
    fetcher: Arc<dyn ReferenceFetcher>,
    store: Arc<dyn BaselineStore>,
) -> Box<dyn DriftEvaluator> {
    match backend {
        EvaluatorBackend::Statistical => {
            Box::new(statistical::StatisticalEvaluator::new(fetcher, store))
        }
        EvaluatorBackend::Mock => Box::new(mock::MockEvaluator::new()),
    }
}
