//! Monte-Carlo estimators.
//!
//! Every accessor draws its own fresh batch of `sample_count` values and
//! reduces it, so repeated calls disagree by sampling noise and converge
//! to the true statistic only as the batch grows. Nothing is cached and
//! no seed state is held between calls.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::hash::Hash;

use crate::traits::Samplable;
use crate::variate::Variate;

/// Batch size the documentation examples use when none is called out.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Confidence level the documentation examples use when none is called out.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

impl<T: Samplable + Into<f64>> Variate<T> {
    fn batch(&self, sample_count: usize) -> Vec<f64> {
        self.samples().take(sample_count).map(Into::into).collect()
    }

    fn sorted_batch(&self, sample_count: usize) -> Vec<f64> {
        let mut values = self.batch(sample_count);
        values.sort_by(f64::total_cmp);
        values
    }

    /// Arithmetic mean of a fresh batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use aleator::Variate;
    ///
    /// let load_kw = Variate::normal(3.0, 0.4);
    /// assert!((load_kw.expected_value(5000) - 3.0).abs() < 0.1);
    /// ```
    pub fn expected_value(&self, sample_count: usize) -> f64 {
        mean(&self.batch(sample_count))
    }

    /// Population variance, two-pass: mean first, squared deviations second.
    pub fn variance(&self, sample_count: usize) -> f64 {
        let values = self.batch(sample_count);
        let mu = mean(&values);
        values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64
    }

    /// Square root of [`variance`](Self::variance), on its own batch.
    pub fn standard_deviation(&self, sample_count: usize) -> f64 {
        self.variance(sample_count).sqrt()
    }

    /// Third standardized moment of one batch.
    pub fn skewness(&self, sample_count: usize) -> f64 {
        standardized_moment(&self.batch(sample_count), 3)
    }

    /// Excess kurtosis: fourth standardized moment of one batch, minus 3.
    pub fn kurtosis(&self, sample_count: usize) -> f64 {
        standardized_moment(&self.batch(sample_count), 4) - 3.0
    }

    /// Empirical quantile: sorts one batch and picks `round(q * (n - 1))`.
    ///
    /// `q` is clamped into `[0, 1]`.
    pub fn quantile(&self, q: f64, sample_count: usize) -> f64 {
        let values = self.sorted_batch(sample_count);
        if values.is_empty() {
            return f64::NAN;
        }
        let last = values.len() - 1;
        let idx = (q.clamp(0.0, 1.0) * last as f64).round() as usize;
        values[idx.min(last)]
    }

    /// The 0.5 quantile.
    pub fn median(&self, sample_count: usize) -> f64 {
        self.quantile(0.5, sample_count)
    }

    /// Fraction of a fresh batch at or below `value`.
    pub fn cdf(&self, value: f64, sample_count: usize) -> f64 {
        let values = self.batch(sample_count);
        if values.is_empty() {
            return f64::NAN;
        }
        let below = values.iter().filter(|v| **v <= value).count();
        below as f64 / values.len() as f64
    }

    /// Equal-tailed interval from one sorted batch.
    ///
    /// Each tail holds `(1 - confidence) / 2` of the batch; the bounds are
    /// the order statistics at the tail indices, clamped to the batch.
    pub fn confidence_interval(&self, confidence: f64, sample_count: usize) -> (f64, f64) {
        let values = self.sorted_batch(sample_count);
        if values.is_empty() {
            return (f64::NAN, f64::NAN);
        }
        let tail = (1.0 - confidence.clamp(0.0, 1.0)) / 2.0;
        let last = values.len() - 1;
        let lower = (tail * last as f64).round() as usize;
        let upper = ((1.0 - tail) * last as f64).round() as usize;
        (values[lower.min(last)], values[upper.min(last)])
    }
}

impl<T: Samplable + Hash + Eq> Variate<T> {
    /// Frequency map over a fresh batch.
    pub fn histogram(&self, sample_count: usize) -> HashMap<T, usize> {
        let mut counts = HashMap::new();
        for value in self.samples().take(sample_count) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// Most frequent value in a fresh batch, or `None` for an empty batch.
    ///
    /// Ties go to whichever value was drawn first.
    pub fn mode(&self, sample_count: usize) -> Option<T> {
        let drawn = self.take_samples(sample_count);
        let mut counts: HashMap<T, usize> = HashMap::new();
        for value in &drawn {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        // Only a strictly higher count replaces the running best, so the
        // earliest-drawn value survives ties.
        let mut best: Option<(T, usize)> = None;
        for value in drawn {
            let count = counts[&value];
            match &best {
                Some((_, best_count)) if *best_count >= count => {}
                _ => best = Some((value, count)),
            }
        }
        best.map(|(value, _)| value)
    }

    /// Empirical Shannon entropy in bits, from the batch frequency map.
    pub fn entropy(&self, sample_count: usize) -> f64 {
        let counts = self.histogram(sample_count);
        let total: usize = counts.values().sum();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        counts
            .values()
            .map(|count| {
                let p = *count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn standardized_moment(values: &[f64], order: i32) -> f64 {
    let mu = mean(values);
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / n;
    let sd = variance.sqrt();
    if sd == 0.0 {
        // A zero-spread batch has no standardized moments; report 0.
        return 0.0;
    }
    values.iter().map(|v| ((v - mu) / sd).powi(order)).sum::<f64>() / n
}
