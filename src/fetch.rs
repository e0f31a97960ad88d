//! Reference fetcher collaborator interface
//!
//! The evaluator depends on two operations it does not implement: fetching
//! the table's current state, and fetching its state as of some days in the
//! past ("time travel"). A backend that cannot honor time travel (e.g. a
//! local emulator with no history) may fall back to current data, but must
//! flag it: drift computed that way is definitionally unreliable, and the
//! flag is propagated into every result's `details`.

use tracing::warn;

use crate::error::FetchError;
use crate::snapshot::{DatasetSnapshot, TableRef};

/// A reference snapshot plus whether time travel was actually honored.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub snapshot: DatasetSnapshot,
    /// True when the backend returned current data instead of history.
    pub time_travel_fallback: bool,
}

pub trait ReferenceFetcher: Send + Sync {
    fn fetch_current(&self, table: &TableRef) -> Result<DatasetSnapshot, FetchError>;

    fn fetch_reference(
        &self,
        table: &TableRef,
        offset_days: u32,
    ) -> Result<ReferenceData, FetchError>;
}

/// Fixed-snapshot fetcher, the in-crate test double.
///
/// Covers the three interesting behaviors: distinct reference data, a forced
/// fallback to current data, and fetch failure.
pub struct StaticFetcher {
    current: Option<DatasetSnapshot>,
    reference: Option<DatasetSnapshot>,
    time_travel_fallback: bool,
}

impl StaticFetcher {
    pub fn new(current: DatasetSnapshot, reference: DatasetSnapshot) -> Self {
        Self {
            current: Some(current),
            reference: Some(reference),
            time_travel_fallback: false,
        }
    }

    /// Backend with no history: the reference fetch returns the current
    /// snapshot and flags the fallback.
    pub fn fallback_to_current(current: DatasetSnapshot) -> Self {
        Self {
            current: Some(current),
            reference: None,
            time_travel_fallback: true,
        }
    }

    /// Fetcher whose every call fails, for exercising fatal-fetch paths.
    pub fn unavailable() -> Self {
        Self {
            current: None,
            reference: None,
            time_travel_fallback: false,
        }
    }
}

impl ReferenceFetcher for StaticFetcher {
    fn fetch_current(&self, table: &TableRef) -> Result<DatasetSnapshot, FetchError> {
        self.current.clone().ok_or_else(|| FetchError::Current {
            table: table.qualified_name(),
            reason: "no snapshot available".to_string(),
        })
    }

    fn fetch_reference(
        &self,
        table: &TableRef,
        offset_days: u32,
    ) -> Result<ReferenceData, FetchError> {
        if self.time_travel_fallback {
            warn!(
                table = %table,
                offset_days,
                "time travel not supported, using current data as reference"
            );
            let snapshot = self.fetch_current(table)?;
            return Ok(ReferenceData {
                snapshot,
                time_travel_fallback: true,
            });
        }

        let snapshot = self
            .reference
            .clone()
            .ok_or_else(|| FetchError::Reference {
                table: table.qualified_name(),
                offset_days,
                reason: "no historical snapshot available".to_string(),
            })?;
        Ok(ReferenceData {
            snapshot,
            time_travel_fallback: false,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
