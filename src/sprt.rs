//! Sequential probability ratio testing over uncertain booleans.
//!
//! Asking a `Variate<bool>` for a plain truth value forces a statistical
//! decision: how strong is the evidence that the underlying probability
//! clears a threshold? The SPRT answers adaptively. It keeps sampling only
//! while the evidence is ambiguous, stopping the moment the likelihood
//! ratio crosses a bound derived from the requested error rates, so clear
//! cases settle in a handful of draws.

use crate::variate::Variate;

/// Error-rate and budget knobs for [`Variate::sprt`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprtConfig {
    /// Type I error rate: accepting when the true probability is below the
    /// threshold.
    pub alpha: f64,
    /// Type II error rate: rejecting when the true probability is above it.
    pub beta: f64,
    /// Draw budget before the frequency fallback decides.
    pub max_samples: usize,
}

impl Default for SprtConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            beta: 0.05,
            max_samples: 10_000,
        }
    }
}

/// Outcome of one sequential test.
#[derive(Debug, Clone, PartialEq)]
pub struct SprtResult {
    /// Whether the evidence supports the probability exceeding the
    /// threshold.
    pub decision: bool,
    /// Fraction of `true` draws over the samples actually taken.
    pub observed: f64,
    /// Draws consumed before stopping.
    pub samples_used: usize,
    /// `true` when a ratio bound stopped the test; `false` when the draw
    /// budget ran out and the frequency fallback decided.
    pub converged: bool,
}

impl Variate<bool> {
    /// Runs the sequential probability ratio test against `exceeds`.
    ///
    /// Each draw multiplies a running likelihood ratio by
    /// `exceeds / (1 - exceeds)` on `true` and by its reciprocal on
    /// `false`. The test accepts once the ratio reaches
    /// `(1 - beta) / alpha` and rejects once it falls to
    /// `beta / (1 - alpha)`. If neither bound is hit within
    /// `max_samples` draws, the observed frequency decides and the result
    /// is marked non-converged.
    ///
    /// `exceeds` is clamped away from 0 and 1 so the ratio factors stay
    /// finite. At `exceeds` = 0.5 both factors are 1, the ratio never
    /// moves, and the decision always comes from the frequency fallback.
    ///
    /// # Examples
    ///
    /// ```
    /// use aleator::{SprtConfig, Variate};
    ///
    /// let breaker_trips = Variate::bernoulli(0.9);
    /// let result = breaker_trips.sprt(0.7, &SprtConfig::default());
    /// assert!(result.decision);
    /// ```
    pub fn sprt(&self, exceeds: f64, config: &SprtConfig) -> SprtResult {
        let p = exceeds.clamp(1e-9, 1.0 - 1e-9);
        let accept_bound = (1.0 - config.beta) / config.alpha;
        let reject_bound = config.beta / (1.0 - config.alpha);
        let success_factor = p / (1.0 - p);
        let failure_factor = (1.0 - p) / p;

        let mut ratio = 1.0;
        let mut successes = 0usize;
        let mut samples = 0usize;
        while samples < config.max_samples {
            samples += 1;
            if self.sample() {
                successes += 1;
                ratio *= success_factor;
            } else {
                ratio *= failure_factor;
            }

            if ratio >= accept_bound {
                return SprtResult {
                    decision: true,
                    observed: successes as f64 / samples as f64,
                    samples_used: samples,
                    converged: true,
                };
            }
            if ratio <= reject_bound {
                return SprtResult {
                    decision: false,
                    observed: successes as f64 / samples as f64,
                    samples_used: samples,
                    converged: true,
                };
            }
        }

        let observed = successes as f64 / samples as f64;
        SprtResult {
            decision: observed > p,
            observed,
            samples_used: samples,
            converged: false,
        }
    }

    /// [`sprt`](Self::sprt) with the default error rates, reduced to its
    /// decision.
    ///
    /// # Examples
    ///
    /// ```
    /// use aleator::{Compare, Variate};
    ///
    /// let load_kw = Variate::normal(55.0, 5.0);
    /// let overload = load_kw.gt(60.0);
    ///
    /// // Shed load only when overload is near certain.
    /// assert!(!overload.probability_exceeds(0.95));
    /// ```
    pub fn probability_exceeds(&self, exceeds: f64) -> bool {
        self.probability_exceeds_with(exceeds, &SprtConfig::default())
    }

    /// [`sprt`](Self::sprt) under a caller-supplied config, reduced to its
    /// decision.
    pub fn probability_exceeds_with(&self, exceeds: f64, config: &SprtConfig) -> bool {
        self.sprt(exceeds, config).decision
    }

    /// More-likely-than-not: [`probability_exceeds`](Self::probability_exceeds)
    /// at 0.5.
    ///
    /// # Examples
    ///
    /// ```
    /// use aleator::{Compare, Variate};
    ///
    /// let indoor = Variate::normal(10.0, 2.0);
    /// if indoor.gt(8.0).implicit_conditional() {
    ///     // More likely warm than not.
    /// }
    /// ```
    pub fn implicit_conditional(&self) -> bool {
        self.probability_exceeds(0.5)
    }

    /// Plain Monte-Carlo estimate of the underlying probability.
    pub fn estimate_probability(&self, sample_count: usize) -> f64 {
        let hits = self.samples().take(sample_count).filter(|outcome| *outcome).count();
        hits as f64 / sample_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_truth_accepts_in_a_handful_of_draws() {
        let always = Variate::point(true);
        let result = always.sprt(0.7, &SprtConfig::default());
        assert!(result.decision);
        assert!(result.converged);
        assert!(result.samples_used < 10);
        assert!((result.observed - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn certain_falsehood_rejects_in_a_handful_of_draws() {
        let never = Variate::point(false);
        let result = never.sprt(0.7, &SprtConfig::default());
        assert!(!result.decision);
        assert!(result.converged);
        assert!(result.samples_used < 10);
        assert!(result.observed.abs() < f64::EPSILON);
    }

    #[test]
    fn high_thresholds_still_converge_for_certain_truth() {
        let always = Variate::point(true);
        assert!(always.probability_exceeds(0.95));
    }

    #[test]
    fn biased_coins_clear_the_half_threshold() {
        assert!(Variate::bernoulli(0.8).probability_exceeds(0.5));
        assert!(!Variate::bernoulli(0.2).probability_exceeds(0.5));
    }

    #[test]
    fn half_threshold_always_falls_back_to_frequency() {
        let coin = Variate::bernoulli(0.9);
        let config = SprtConfig {
            max_samples: 200,
            ..SprtConfig::default()
        };
        let result = coin.sprt(0.5, &config);
        assert!(!result.converged);
        assert_eq!(result.samples_used, 200);
        assert!(result.decision);
    }

    #[test]
    fn config_defaults_match_their_documentation() {
        let config = SprtConfig::default();
        assert!((config.alpha - 0.05).abs() < f64::EPSILON);
        assert!((config.beta - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.max_samples, 10_000);
    }

    #[test]
    fn implicit_conditional_follows_the_point_mass() {
        assert!(Variate::point(true).implicit_conditional());
        assert!(!Variate::point(false).implicit_conditional());
    }

    #[test]
    fn estimated_probability_tracks_the_true_rate() {
        let coin = Variate::bernoulli(0.7);
        let estimate = coin.estimate_probability(2000);
        assert!((estimate - 0.7).abs() < 0.05);
    }
}
