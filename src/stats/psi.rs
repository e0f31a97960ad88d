//! Population Stability Index
//!
//! PSI measures how much a discrete distribution has shifted from a baseline.
//!
//! Interpretation:
//! - PSI < 0.1: no significant change
//! - 0.1 <= PSI < 0.25: moderate change
//! - PSI >= 0.25: significant change

use std::collections::{BTreeSet, HashMap};

use crate::constants::PSI_EPSILON;

/// PSI over two value -> count mappings (categorical values, or pre-bucketed
/// numeric values).
///
/// Each side's counts are normalized to proportions of its own total, so two
/// distributions whose counts differ by a constant factor score ~0. An empty
/// baseline or current distribution yields 0.0: no evidence of drift rather
/// than an error.
pub fn psi(baseline: &HashMap<String, u64>, current: &HashMap<String, u64>) -> f64 {
    if baseline.is_empty() || current.is_empty() {
        return 0.0;
    }

    let all_values: BTreeSet<&String> = baseline.keys().chain(current.keys()).collect();

    let baseline_total = baseline.values().sum::<u64>().max(1) as f64;
    let current_total = current.values().sum::<u64>().max(1) as f64;

    let mut psi = 0.0;
    for value in all_values {
        let baseline_pct =
            baseline.get(value).copied().unwrap_or(0) as f64 / baseline_total + PSI_EPSILON;
        let current_pct =
            current.get(value).copied().unwrap_or(0) as f64 / current_total + PSI_EPSILON;
        psi += (current_pct - baseline_pct) * (current_pct / baseline_pct).ln();
    }

    psi.abs()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_identical_distributions() {
        let dist = counts(&[("a", 100), ("b", 200), ("c", 50)]);
        assert!(psi(&dist, &dist) < 1e-9);
    }

    #[test]
    fn test_scaled_counts_are_equivalent() {
        // Proportions unchanged, totals tripled.
        let baseline = counts(&[("a", 10), ("b", 30), ("c", 60)]);
        let current = counts(&[("a", 30), ("b", 90), ("c", 180)]);
        assert!(psi(&baseline, &current) < 1e-9);
    }

    #[test]
    fn test_disjoint_distributions_score_high() {
        let baseline = counts(&[("a", 100), ("b", 100)]);
        let current = counts(&[("x", 100), ("y", 100)]);
        assert!(psi(&baseline, &current) > 1.0);
    }

    #[test]
    fn test_monotonic_under_interpolation() {
        // Walk from the baseline toward a disjoint distribution; PSI should
        // never decrease along the way.
        let baseline = counts(&[("a", 100), ("b", 100)]);
        let mut previous = 0.0;
        for step in 0..=10u64 {
            let moved = step * 10;
            let current = counts(&[
                ("a", 100 - moved),
                ("b", 100 - moved),
                ("x", moved),
                ("y", moved),
            ]);
            let value = psi(&baseline, &current);
            assert!(
                value + 1e-12 >= previous,
                "psi decreased at step {}: {} < {}",
                step,
                value,
                previous
            );
            previous = value;
        }
    }

    #[test]
    fn test_empty_sides_yield_zero() {
        let dist = counts(&[("a", 10)]);
        assert_eq!(psi(&HashMap::new(), &dist), 0.0);
        assert_eq!(psi(&dist, &HashMap::new()), 0.0);
        assert_eq!(psi(&HashMap::new(), &HashMap::new()), 0.0);
    }

    #[test]
    fn test_clear_shift_exceeds_default_threshold() {
        let baseline = counts(&[("pending", 50), ("completed", 50)]);
        let current = counts(&[("pending", 5), ("completed", 95)]);
        assert!(psi(&baseline, &current) > 0.25);
    }
}
