// Statistical helpers used by the summarizer
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;

/// Sort a copy of the values in ascending order
fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Median of values that are already sorted
fn sorted_median(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Compute mean of values; 0 for no values
pub fn compute_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute median of values; 0 for no values
pub fn compute_median(values: &[f64]) -> f64 {
    sorted_median(&sorted(values))
}

/// Compute population standard deviation of values
pub fn compute_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = compute_mean(values);
    let variance = values.iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Compute minimum of values; 0 for no values
pub fn compute_min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().fold(f64::INFINITY, |a, &b| a.min(b))
}

/// Compute maximum of values; 0 for no values
pub fn compute_max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b))
}

/// Compute `[Q1, Q2, Q3]` by halving.
///
/// Q1 is the median of the first `floor(n/2)` sorted values and Q3 the median
/// of the values from index `ceil(n/2)` on, so for even `n` the middle pair
/// belongs to neither half. `[1, 2, 3, 4]` gives `[1.5, 2.5, 3.5]`.
pub fn compute_quartiles(values: &[f64]) -> [f64; 3] {
    let sorted = sorted(values);
    let n = sorted.len();

    let lower = &sorted[..n / 2];
    let upper = &sorted[(n + 1) / 2..];

    [sorted_median(lower), sorted_median(&sorted), sorted_median(upper)]
}

/// Compute the Pearson correlation coefficient of paired values.
///
/// Returns NaN when there are no pairs or either side has zero variance.
pub fn compute_correlation(values1: &[f64], values2: &[f64]) -> f64 {
    if values1.is_empty() || values1.len() != values2.len() {
        return f64::NAN;
    }

    let mean1 = compute_mean(values1);
    let mean2 = compute_mean(values2);

    let mut numerator = 0.0;
    let mut denom1 = 0.0;
    let mut denom2 = 0.0;

    for (&x, &y) in values1.iter().zip(values2) {
        let diff1 = x - mean1;
        let diff2 = y - mean2;

        numerator += diff1 * diff2;
        denom1 += diff1 * diff1;
        denom2 += diff2 * diff2;
    }

    // 0/0 yields NaN for constant columns
    numerator / (denom1.sqrt() * denom2.sqrt())
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(compute_median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(compute_median(&[5.0, 1.0, 3.0]), 3.0);
        assert_eq!(compute_median(&[]), 0.0);
    }

    #[test]
    fn test_quartiles_by_halving() {
        assert_eq!(compute_quartiles(&[1.0, 2.0, 3.0, 4.0]), [1.5, 2.5, 3.5]);
        assert_eq!(compute_quartiles(&[5.0, 1.0, 4.0, 2.0, 3.0]), [1.5, 3.0, 4.5]);
        assert_eq!(compute_quartiles(&[7.0]), [0.0, 7.0, 0.0]);
        assert_eq!(compute_quartiles(&[]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_population_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(compute_mean(&values), 5.0);
        assert_eq!(compute_std_dev(&values), 2.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(compute_min(&[3.0, -1.0, 2.0]), -1.0);
        assert_eq!(compute_max(&[3.0, -1.0, 2.0]), 3.0);
        assert_eq!(compute_min(&[]), 0.0);
    }

    #[test]
    fn test_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        assert!((compute_correlation(&x, &y) + 1.0).abs() < 1e-12);
        assert!(compute_correlation(&x, &[1.0, 1.0, 1.0, 1.0]).is_nan());
        assert!(compute_correlation(&[], &[]).is_nan());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 3), 0.123);
        assert_eq!(round_to(-0.99999, 3), -1.0);
    }
}
