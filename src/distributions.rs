//! Distribution factories.
//!
//! Every constructor returns a [`Variate`] whose leaf sampler runs one of
//! the algorithms in [`crate::draw`]. Factories that can receive unusable
//! input (empty tables, mismatched weights, non-positive shape parameters)
//! validate up front and return [`Result`], so no caller ever holds a
//! degenerate distribution.

#![allow(clippy::cast_precision_loss)]

use std::collections::HashMap;
use std::hash::Hash;

use crate::draw;
use crate::error::{Result, VariateError};
use crate::traits::Samplable;
use crate::variate::Variate;

impl<T: Samplable> Variate<T> {
    /// A point mass: every draw is `value`.
    pub fn point(value: T) -> Self {
        Variate::new(move || value.clone())
    }

    /// A mixture: each draw picks a component by weight, then samples it.
    ///
    /// `None` weights mean a uniform pick. A single-component mixture is
    /// returned unchanged, so it shares the component's leaves.
    ///
    /// # Errors
    ///
    /// [`VariateError::EmptyComponents`] without components,
    /// [`VariateError::WeightCountMismatch`] when the lists disagree, and
    /// [`VariateError::InvalidWeights`] when the weights cannot be
    /// normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use aleator::Variate;
    ///
    /// let morning = Variate::normal(7.5, 0.5);
    /// let evening = Variate::normal(18.0, 1.0);
    /// let peak_hour = Variate::mixture(vec![morning, evening], Some(vec![0.4, 0.6]))?;
    ///
    /// let h = peak_hour.expected_value(4000);
    /// assert!(h > 10.0 && h < 18.0);
    /// # Ok::<(), aleator::VariateError>(())
    /// ```
    pub fn mixture(components: Vec<Variate<T>>, weights: Option<Vec<f64>>) -> Result<Self> {
        if components.is_empty() {
            return Err(VariateError::EmptyComponents);
        }
        if let Some(w) = &weights {
            if w.len() != components.len() {
                return Err(VariateError::WeightCountMismatch {
                    components: components.len(),
                    weights: w.len(),
                });
            }
        }
        if components.len() == 1 {
            let mut components = components;
            return Ok(components.remove(0));
        }

        let normalized = match weights {
            Some(w) => normalize_weights(&w)?,
            None => vec![1.0 / components.len() as f64; components.len()],
        };
        let cumulative: Vec<f64> = normalized
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect();

        Ok(Variate::new(move || {
            let u = draw::uniform_unit();
            let idx = cumulative
                .iter()
                .position(|bound| u <= *bound)
                .unwrap_or(cumulative.len() - 1);
            components[idx].sample()
        }))
    }

    /// Uniform resampling from observed data.
    ///
    /// # Errors
    ///
    /// [`VariateError::EmptyData`] when `data` is empty.
    pub fn empirical(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(VariateError::EmptyData);
        }
        Ok(Variate::new(move || data[draw::index(data.len())].clone()))
    }
}

impl<T: Samplable + Hash + Eq> Variate<T> {
    /// Weighted draw over discrete outcomes via a cumulative table.
    ///
    /// Weights are normalized, so they need not sum to one.
    ///
    /// # Errors
    ///
    /// [`VariateError::EmptyProbabilities`] for an empty map and
    /// [`VariateError::InvalidWeights`] when the weights cannot be
    /// normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use aleator::Variate;
    ///
    /// let mut tariff = HashMap::new();
    /// tariff.insert("off-peak", 0.7);
    /// tariff.insert("peak", 0.3);
    /// let band = Variate::categorical(&tariff)?;
    /// assert!(tariff.contains_key(&band.sample()));
    /// # Ok::<(), aleator::VariateError>(())
    /// ```
    pub fn categorical(outcomes: &HashMap<T, f64>) -> Result<Self> {
        if outcomes.is_empty() {
            return Err(VariateError::EmptyProbabilities);
        }
        let normalized = normalize_weights(&outcomes.values().copied().collect::<Vec<_>>())?;
        let mut cumulative = Vec::with_capacity(outcomes.len());
        let mut acc = 0.0;
        for (value, weight) in outcomes.keys().zip(normalized) {
            acc += weight;
            cumulative.push((value.clone(), acc));
        }

        Ok(Variate::new(move || {
            let u = draw::uniform_unit();
            for (value, bound) in &cumulative {
                if u <= *bound {
                    return value.clone();
                }
            }
            // Float rounding can leave the last bound a hair under 1.
            cumulative[cumulative.len() - 1].0.clone()
        }))
    }
}

impl Variate<f64> {
    /// Uniform over `[min, max)`.
    pub fn uniform(min: f64, max: f64) -> Self {
        Variate::new(move || draw::uniform(min, max))
    }

    /// Gaussian via the Box-Muller transform.
    ///
    /// # Examples
    ///
    /// ```
    /// use aleator::Variate;
    ///
    /// let indoor = Variate::normal(21.0, 1.5);
    /// assert!((indoor.expected_value(2000) - 21.0).abs() < 0.5);
    /// ```
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Variate::new(move || draw::normal(mean, std_dev))
    }

    /// Exponential with the given rate, via inverse CDF.
    pub fn exponential(rate: f64) -> Self {
        Variate::new(move || draw::exponential(rate))
    }

    /// Log-normal: `exp` of a `Normal(mu, sigma)` draw.
    pub fn log_normal(mu: f64, sigma: f64) -> Self {
        Variate::new(move || draw::normal(mu, sigma).exp())
    }

    /// Kumaraswamy on `(0, 1)` with shape parameters `a` and `b`, via
    /// inverse CDF.
    ///
    /// # Errors
    ///
    /// [`VariateError::InvalidParameter`] unless both shapes are positive
    /// and finite.
    pub fn kumaraswamy(a: f64, b: f64) -> Result<Self> {
        ensure_positive("a", a)?;
        ensure_positive("b", b)?;
        Ok(Variate::new(move || draw::kumaraswamy(a, b)))
    }

    /// Rayleigh with the given scale, via inverse CDF.
    ///
    /// # Errors
    ///
    /// [`VariateError::InvalidParameter`] unless `scale` is positive and
    /// finite.
    pub fn rayleigh(scale: f64) -> Result<Self> {
        ensure_positive("scale", scale)?;
        Ok(Variate::new(move || draw::rayleigh(scale)))
    }
}

impl Variate<bool> {
    /// Bernoulli: `true` with probability `probability`.
    ///
    /// ```
    /// use aleator::Variate;
    ///
    /// let cloudy = Variate::bernoulli(0.3);
    /// let rate = cloudy.estimate_probability(2000);
    /// assert!((rate - 0.3).abs() < 0.05);
    /// ```
    pub fn bernoulli(probability: f64) -> Self {
        Variate::new(move || draw::bernoulli(probability))
    }
}

impl Variate<u32> {
    /// Binomial: successes across `trials` independent Bernoulli draws.
    pub fn binomial(trials: u32, probability: f64) -> Self {
        Variate::new(move || draw::binomial(trials, probability))
    }

    /// Poisson via Knuth's multiplicative method.
    pub fn poisson(lambda: f64) -> Self {
        Variate::new(move || draw::poisson(lambda))
    }

    /// Geometric: trials up to and including the first success.
    ///
    /// `probability` must lie in `(0, 1]`; a zero success probability makes
    /// every draw loop forever.
    pub fn geometric(probability: f64) -> Self {
        Variate::new(move || draw::geometric(probability))
    }
}

fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VariateError::InvalidParameter {
            parameter,
            value,
            constraint: "must be positive and finite",
        });
    }
    Ok(())
}

fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(VariateError::InvalidWeights {
            reason: "weights must be finite and nonnegative",
        });
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(VariateError::InvalidWeights {
            reason: "weights must sum to a positive value",
        });
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_draws_stay_in_range_with_centered_mean() {
        let x = Variate::uniform(0.0, 10.0);
        for value in x.samples().take(1000) {
            assert!((0.0..10.0).contains(&value));
        }
        assert!((x.expected_value(5000) - 5.0).abs() < 0.3);
    }

    #[test]
    fn normal_matches_its_parameters() {
        let x = Variate::normal(10.0, 2.0);
        assert!((x.expected_value(5000) - 10.0).abs() < 0.5);
        assert!((x.standard_deviation(5000) - 2.0).abs() < 0.5);
    }

    #[test]
    fn exponential_mean_is_inverse_rate() {
        let x = Variate::exponential(0.5);
        assert!((x.expected_value(10_000) - 2.0).abs() < 0.3);
    }

    #[test]
    fn log_normal_draws_are_positive_with_known_mean() {
        let x = Variate::log_normal(0.0, 0.5);
        for value in x.samples().take(500) {
            assert!(value > 0.0);
        }
        let expected = (0.125f64).exp();
        assert!((x.expected_value(10_000) - expected).abs() < 0.1);
    }

    #[test]
    fn kumaraswamy_lives_on_the_unit_interval() {
        let x = Variate::kumaraswamy(2.0, 5.0).unwrap();
        for value in x.samples().take(1000) {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn kumaraswamy_rejects_bad_shapes() {
        assert!(matches!(
            Variate::kumaraswamy(0.0, 1.0),
            Err(VariateError::InvalidParameter { parameter: "a", .. })
        ));
        assert!(matches!(
            Variate::kumaraswamy(1.0, -2.0),
            Err(VariateError::InvalidParameter { parameter: "b", .. })
        ));
        assert!(Variate::kumaraswamy(1.0, f64::NAN).is_err());
    }

    #[test]
    fn rayleigh_matches_its_known_mean() {
        let x = Variate::rayleigh(2.0).unwrap();
        let expected = 2.0 * (std::f64::consts::PI / 2.0).sqrt();
        assert!((x.expected_value(10_000) - expected).abs() < 0.1);
        assert!(Variate::rayleigh(0.0).is_err());
    }

    #[test]
    fn bernoulli_frequency_tracks_p() {
        let x = Variate::bernoulli(0.8);
        let hits = x.samples().take(2000).filter(|b| *b).count();
        let rate = hits as f64 / 2000.0;
        assert!((rate - 0.8).abs() < 0.05);
    }

    #[test]
    fn binomial_counts_stay_within_trials() {
        let x = Variate::binomial(20, 0.3);
        for value in x.samples().take(500) {
            assert!(value <= 20);
        }
        assert!((x.expected_value(5000) - 6.0).abs() < 0.3);
    }

    #[test]
    fn poisson_mean_tracks_lambda() {
        let x = Variate::poisson(4.0);
        assert!((x.expected_value(10_000) - 4.0).abs() < 0.3);
    }

    #[test]
    fn geometric_supports_one_and_up() {
        let x = Variate::geometric(0.25);
        for value in x.samples().take(500) {
            assert!(value >= 1);
        }
        assert!((x.expected_value(10_000) - 4.0).abs() < 0.5);
    }

    #[test]
    fn categorical_draws_only_known_outcomes() {
        let mut outcomes = HashMap::new();
        outcomes.insert('a', 0.7);
        outcomes.insert('b', 0.2);
        outcomes.insert('c', 0.1);
        let x = Variate::categorical(&outcomes).unwrap();
        for value in x.samples().take(500) {
            assert!(outcomes.contains_key(&value));
        }
    }

    #[test]
    fn categorical_rejects_empty_and_zero_weight_maps() {
        let empty: HashMap<char, f64> = HashMap::new();
        assert_eq!(
            Variate::categorical(&empty).unwrap_err(),
            VariateError::EmptyProbabilities
        );

        let mut zeroed = HashMap::new();
        zeroed.insert('a', 0.0);
        assert!(matches!(
            Variate::categorical(&zeroed),
            Err(VariateError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn empirical_resamples_observed_values_only() {
        let data = vec![3, 7, 11];
        let x = Variate::empirical(data.clone()).unwrap();
        for value in x.samples().take(500) {
            assert!(data.contains(&value));
        }
        assert_eq!(
            Variate::<i32>::empirical(vec![]).unwrap_err(),
            VariateError::EmptyData
        );
    }

    #[test]
    fn single_component_mixture_is_that_component() {
        let x = Variate::uniform(0.0, 1.0);
        let same = Variate::mixture(vec![x.clone()], None).unwrap();
        let delta = same - x;
        for _ in 0..100 {
            assert!(delta.sample().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn degenerate_weights_pin_the_mixture_to_one_component() {
        let first = Variate::point(1.0f64);
        let second = Variate::point(2.0);
        let pinned = Variate::mixture(vec![first, second], Some(vec![1.0, 0.0])).unwrap();
        for _ in 0..100 {
            assert!((pinned.sample() - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn mixture_validates_its_inputs() {
        assert_eq!(
            Variate::<f64>::mixture(vec![], None).unwrap_err(),
            VariateError::EmptyComponents
        );
        assert_eq!(
            Variate::mixture(vec![Variate::point(1.0), Variate::point(2.0)], Some(vec![0.5]))
                .unwrap_err(),
            VariateError::WeightCountMismatch {
                components: 2,
                weights: 1
            }
        );
        assert!(matches!(
            Variate::mixture(
                vec![Variate::point(1.0), Variate::point(2.0)],
                Some(vec![-1.0, 2.0])
            ),
            Err(VariateError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn point_masses_carry_any_samplable_type() {
        let label = Variate::point(String::from("idle"));
        assert_eq!(label.sample(), "idle");
    }
}
