//! Random-draw primitives.
//!
//! One function per sampling algorithm, each performing exactly one draw on
//! the thread-local generator. Nothing here knows about computation graphs or
//! distribution handles; the factories in [`crate::distributions`] wrap these
//! into leaf samplers. Because every draw goes through `rand`'s thread-local
//! generator, concurrent callers need no locking.

use rand::Rng;

/// One uniform draw from `[0, 1)`.
#[must_use]
pub fn uniform_unit() -> f64 {
    rand::random::<f64>()
}

/// One uniform draw from `[min, max)`.
#[must_use]
pub fn uniform(min: f64, max: f64) -> f64 {
    min + uniform_unit() * (max - min)
}

/// One standard-normal draw via the Box-Muller transform.
///
/// Both uniform inputs are clamped away from 0 and 1 so the log and cosine
/// stay finite; the clamp truncates the tails at roughly 3.7 standard
/// deviations, which is far below the noise floor of any Monte-Carlo
/// estimate this crate produces.
#[must_use]
pub fn standard_normal() -> f64 {
    let u1 = uniform_unit().clamp(0.001, 0.999);
    let u2 = uniform_unit().clamp(0.001, 0.999);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// One draw from `Normal(mean, std_dev)`.
#[must_use]
pub fn normal(mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * standard_normal()
}

/// One draw from `Exponential(rate)` by inverse CDF.
#[must_use]
pub fn exponential(rate: f64) -> f64 {
    // 1 - u lies in (0, 1], keeping the log finite.
    -(1.0 - uniform_unit()).ln() / rate
}

/// One draw from `Bernoulli(p)`.
#[must_use]
pub fn bernoulli(p: f64) -> bool {
    uniform_unit() < p
}

/// One draw from `Binomial(trials, p)` as a sum of Bernoulli draws.
#[must_use]
pub fn binomial(trials: u32, p: f64) -> u32 {
    (0..trials).filter(|_| bernoulli(p)).count() as u32
}

/// One draw from `Poisson(lambda)` using Knuth's multiplicative method.
///
/// Multiplies unit uniforms until the running product drops to
/// `e^-lambda`; the number of multiplications before that point is the
/// drawn count. Runtime grows linearly with `lambda`.
#[must_use]
pub fn poisson(lambda: f64) -> u32 {
    let limit = (-lambda).exp();
    let mut count = 0u32;
    let mut product = uniform_unit();
    while product > limit {
        count += 1;
        product *= uniform_unit();
    }
    count
}

/// One draw from `Geometric(p)`: the number of trials up to and including
/// the first success, so the support starts at 1.
///
/// `p` must lie in `(0, 1]`; a zero success probability never terminates.
#[must_use]
pub fn geometric(p: f64) -> u32 {
    let mut trials = 1u32;
    while !bernoulli(p) {
        trials += 1;
    }
    trials
}

/// One draw from `Kumaraswamy(a, b)` by inverse CDF:
/// `(1 - (1 - u)^(1/b))^(1/a)`, supported on `(0, 1)`.
#[must_use]
pub fn kumaraswamy(a: f64, b: f64) -> f64 {
    let u = uniform_unit();
    (1.0 - (1.0 - u).powf(1.0 / b)).powf(1.0 / a)
}

/// One draw from `Rayleigh(scale)` by inverse CDF:
/// `scale * sqrt(-2 ln(1 - u))`.
#[must_use]
pub fn rayleigh(scale: f64) -> f64 {
    // 1 - u lies in (0, 1], keeping the log finite.
    scale * (-2.0 * (1.0 - uniform_unit()).ln()).sqrt()
}

/// One uniform index draw from `0..len`.
///
/// # Panics
///
/// Panics if `len` is zero; callers validate emptiness before sampling.
#[must_use]
pub fn index(len: usize) -> usize {
    rand::rng().random_range(0..len)
}
