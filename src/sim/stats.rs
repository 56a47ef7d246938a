//! Distribution summary for loss-rate samples.

use serde::Serialize;

/// Arithmetic summary of a sample list. Every field is 0.0 for an empty
/// population (the aggregator's zero-trials convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divisor n, not n-1).
    pub stdev: f64,
}

pub fn summarize(samples: &[f64]) -> DistributionSummary {
    if samples.is_empty() {
        return DistributionSummary::default();
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    DistributionSummary {
        mean,
        median,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        stdev: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "expected {b}, got {a}");
    }

    #[test]
    fn empty_samples_summarize_to_zeros() {
        assert_eq!(summarize(&[]), DistributionSummary::default());
    }

    #[test]
    fn single_sample_is_its_own_summary() {
        let summary = summarize(&[0.25]);
        approx_eq(summary.mean, 0.25, 1e-12);
        approx_eq(summary.median, 0.25, 1e-12);
        approx_eq(summary.min, 0.25, 1e-12);
        approx_eq(summary.max, 0.25, 1e-12);
        approx_eq(summary.stdev, 0.0, 1e-12);
    }

    #[test]
    fn median_averages_middle_pair_for_even_counts() {
        let summary = summarize(&[0.4, 0.1, 0.3, 0.2]);
        approx_eq(summary.median, 0.25, 1e-12);
    }

    #[test]
    fn population_stdev_matches_known_value() {
        // Population stdev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = summarize(&samples);
        approx_eq(summary.mean, 5.0, 1e-12);
        approx_eq(summary.stdev, 2.0, 1e-12);
    }

    #[test]
    fn summary_is_order_insensitive() {
        let forward = summarize(&[0.1, 0.5, 0.9, 0.3]);
        let shuffled = summarize(&[0.9, 0.3, 0.1, 0.5]);
        assert_eq!(forward, shuffled);
    }
}
