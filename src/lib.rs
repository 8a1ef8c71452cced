//! # aleator
//!
//! Random variables as first-class values. A [`Variate<T>`] is not a number
//! with a fuzz factor: it is a lazily sampled computation graph, so
//! arithmetic, comparison, and logic over uncertain quantities keep their
//! correlation structure, and questions about them are answered by
//! evidence rather than by pretending a point estimate is the truth.
//!
//! ## Evidence, not facts
//!
//! ```rust
//! use aleator::{Compare, Variate};
//!
//! // A panel rating with measurement error, and a cloud-cover factor.
//! let rated_kw = Variate::normal(4.0, 0.25);
//! let cloud_factor = Variate::uniform(0.6, 1.0);
//!
//! let output_kw = rated_kw * cloud_factor;
//!
//! // Comparisons yield evidence, and the SPRT turns evidence into a
//! // decision with bounded error rates.
//! let shortfall = output_kw.lt(2.5);
//! if shortfall.probability_exceeds(0.9) {
//!     // Dispatch the backup only when the evidence is strong.
//! }
//! ```
//!
//! ## Correlation through the graph
//!
//! Reusing a value reuses its draw. Within one sample of an expression,
//! every occurrence of the same leaf sees the same number:
//!
//! ```rust
//! use aleator::Variate;
//!
//! let x = Variate::uniform(0.0, 1.0);
//! let doubled = x.clone() + x; // one draw, used twice
//! let spread = doubled.variance(5000); // ~4x the variance of x
//! assert!(spread > 0.2);
//! ```
//!
//! ## What's here
//!
//! - **Distribution factories**: normal, uniform, exponential, log-normal,
//!   Kumaraswamy, Rayleigh, Bernoulli, binomial, Poisson, geometric,
//!   categorical, empirical, mixtures, and point masses
//! - **Graph-building operators**: `+ - * /` on numeric variates,
//!   comparisons against thresholds or other variates, boolean logic
//! - **Functional layer**: `map`, `flat_map`, and rejection-sampling
//!   `filter`
//! - **Monte-Carlo estimators**: mean, variance, higher moments,
//!   quantiles, CDF, confidence intervals, histogram, mode, entropy
//! - **SPRT evaluation**: adaptive hypothesis testing with a frequency
//!   fallback, behind `probability_exceeds`
//! - **Parallel batches**: `take_samples_par` under the `parallel` feature

pub mod distributions;
pub mod draw;
pub mod error;
pub mod graph;
pub mod ops;
pub mod sprt;
pub mod stats;
pub mod traits;
pub mod variate;

pub use error::VariateError;
pub use ops::{Compare, LogicalOps, Numeric};
pub use sprt::{SprtConfig, SprtResult};
pub use traits::Samplable;
pub use variate::Variate;
