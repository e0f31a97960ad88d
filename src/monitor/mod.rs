//! Monitor model
//!
//! Typed monitor specifications parsed out of the monitor-list configuration.
//! The set of monitor kinds is closed; an unknown kind is a configuration
//! error, never a runtime one.

pub mod parser;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATASET_THRESHOLD, DEFAULT_DISTRIBUTION_THRESHOLD, DEFAULT_SCHEMA_THRESHOLD,
    DEFAULT_VOLUME_THRESHOLD,
};

/// Closed set of drift monitor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorKind {
    Schema,
    Volume,
    Distribution,
    Dataset,
}

impl MonitorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorKind::Schema => "schema",
            MonitorKind::Volume => "volume",
            MonitorKind::Distribution => "distribution",
            MonitorKind::Dataset => "dataset",
        }
    }

    /// Kind-specific default threshold, substituted when the configuration
    /// omits one.
    pub fn default_threshold(&self) -> f64 {
        match self {
            MonitorKind::Schema => DEFAULT_SCHEMA_THRESHOLD,
            MonitorKind::Volume => DEFAULT_VOLUME_THRESHOLD,
            MonitorKind::Distribution => DEFAULT_DISTRIBUTION_THRESHOLD,
            MonitorKind::Dataset => DEFAULT_DATASET_THRESHOLD,
        }
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonitorKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "schema" => Ok(MonitorKind::Schema),
            "volume" => Ok(MonitorKind::Volume),
            "distribution" => Ok(MonitorKind::Distribution),
            "dataset" => Ok(MonitorKind::Dataset),
            _ => Err(()),
        }
    }
}

/// Statistical tests a distribution monitor may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatTest {
    Ks,
    ChiSquare,
    Z,
    Wasserstein,
    Psi,
    JensenShannon,
}

impl StatTest {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatTest::Ks => "ks",
            StatTest::ChiSquare => "chisquare",
            StatTest::Z => "z",
            StatTest::Wasserstein => "wasserstein",
            StatTest::Psi => "psi",
            StatTest::JensenShannon => "jensenshannon",
        }
    }
}

impl FromStr for StatTest {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ks" => Ok(StatTest::Ks),
            "chisquare" => Ok(StatTest::ChiSquare),
            "z" => Ok(StatTest::Z),
            "wasserstein" => Ok(StatTest::Wasserstein),
            "psi" => Ok(StatTest::Psi),
            "jensenshannon" => Ok(StatTest::JensenShannon),
            _ => Err(()),
        }
    }
}

/// One configured drift check. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSpec {
    /// Unique within a run; auto-generated when absent.
    pub name: String,
    pub kind: MonitorKind,
    /// Required iff `kind == Distribution`.
    pub column: Option<String>,
    /// Always non-negative; kind default substituted when omitted.
    pub threshold: f64,
    /// Only meaningful for distribution monitors.
    pub stat_test: Option<StatTest>,
}

// ============================================================================
// TESTS
// ============================================================================
