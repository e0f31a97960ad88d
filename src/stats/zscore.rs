//! Z-score for scalar anomaly detection (volume drift).

/// Standard z-score of `current` against `historical` values, using the
/// Bessel-corrected sample standard deviation.
///
/// With fewer than 2 historical points there is no stdev to speak of, so a
/// scaled relative difference against the single-point mean stands in. A zero
/// stdev yields 0.0 when the value sits on the mean, otherwise +/- infinity.
pub fn zscore(current: f64, historical: &[f64]) -> f64 {
    if historical.is_empty() {
        return 0.0;
    }

    let n = historical.len();
    let mean = historical.iter().sum::<f64>() / n as f64;

    if n < 2 {
        if mean == 0.0 {
            return if current == 0.0 { 0.0 } else { f64::INFINITY };
        }
        // Scale to approximate a z-score.
        return (current - mean).abs() / mean * 3.0;
    }

    let variance = historical
        .iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    let std = variance.sqrt();

    if std == 0.0 {
        if current == mean {
            return 0.0;
        }
        return if current > mean {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }

    (current - mean) / std
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        assert_eq!(zscore(42.0, &[]), 0.0);
    }

    #[test]
    fn test_single_point_relative_approximation() {
        // |120 - 100| / 100 * 3 = 0.6
        let z = zscore(120.0, &[100.0]);
        assert!((z - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_single_zero_point() {
        assert_eq!(zscore(0.0, &[0.0]), 0.0);
        assert!(zscore(5.0, &[0.0]).is_infinite());
    }

    #[test]
    fn test_standard_computation() {
        // mean 100, sample stdev of [90, 100, 110] = 10
        let history = [90.0, 100.0, 110.0];
        let z = zscore(120.0, &history);
        assert!((z - 2.0).abs() < 1e-12);

        let z = zscore(80.0, &history);
        assert!((z + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_stdev() {
        let history = [100.0, 100.0, 100.0];
        assert_eq!(zscore(100.0, &history), 0.0);
        assert_eq!(zscore(150.0, &history), f64::INFINITY);
        assert_eq!(zscore(50.0, &history), f64::NEG_INFINITY);
    }
}
