//! Categorical association (approximate chi-square)
//!
//! Chi-square-style statistic over per-category expected-vs-observed counts.
//! The p-value is NOT an exact chi-square CDF lookup: significance is judged
//! against hard-coded critical-value bands extrapolated from the df=1..3
//! table. This is a documented approximation kept for output compatibility;
//! swapping in an exact distribution function would change which inputs cross
//! a given threshold.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Qualitative interpretation of the association statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Association {
    NoSignificantChange,
    ModerateChange,
    SignificantChange,
    InsufficientCategories,
    InsufficientData,
}

/// Statistic plus approximate p-value and label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssociationOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub label: Association,
}

/// Chi-square-style categorical drift statistic.
///
/// Expected count for a category is `baseline_share * current_total`;
/// degrees of freedom = |union of categories| - 1.
pub fn categorical_association(
    baseline: &HashMap<String, u64>,
    current: &HashMap<String, u64>,
) -> AssociationOutcome {
    let all_categories: BTreeSet<&String> = baseline.keys().chain(current.keys()).collect();

    if all_categories.len() < 2 {
        return AssociationOutcome {
            statistic: 0.0,
            p_value: 1.0,
            label: Association::InsufficientCategories,
        };
    }

    let baseline_total: u64 = baseline.values().sum();
    let current_total: u64 = current.values().sum();

    if baseline_total == 0 || current_total == 0 {
        return AssociationOutcome {
            statistic: 0.0,
            p_value: 1.0,
            label: Association::InsufficientData,
        };
    }

    let mut statistic = 0.0;
    for category in &all_categories {
        let baseline_count = baseline.get(*category).copied().unwrap_or(0) as f64;
        let current_count = current.get(*category).copied().unwrap_or(0) as f64;

        let expected = baseline_count / baseline_total as f64 * current_total as f64;
        if expected > 0.0 {
            statistic += (current_count - expected).powi(2) / expected;
        }
    }

    let df = all_categories.len() - 1;

    // Extrapolated critical values: df=1 -> 3.84 (0.05) / 6.63 (0.01),
    // df=2 -> 5.99 / 9.21, df=3 -> 7.81 / 11.34.
    let critical_05 = 3.84 + (df as f64 - 1.0) * 2.0;
    let critical_01 = 6.63 + (df as f64 - 1.0) * 2.5;

    let (p_value, label) = if statistic < critical_05 {
        (0.1, Association::NoSignificantChange)
    } else if statistic < critical_01 {
        (0.05, Association::ModerateChange)
    } else {
        (0.01, Association::SignificantChange)
    };

    AssociationOutcome {
        statistic,
        p_value,
        label,
    }
}

// ============================================================================
// TESTS
// ============================================================================
