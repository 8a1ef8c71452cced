//! Construction-time error taxonomy.
//!
//! Only distribution factories can fail: everything downstream of a
//! successfully built [`Variate`](crate::Variate) is total. Fallible
//! factories return [`Result`], so a caller never receives a degenerate
//! distribution it has to probe for validity.

use thiserror::Error;

/// Errors raised while building a distribution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariateError {
    /// A mixture was given no components.
    #[error("mixture needs at least one component")]
    EmptyComponents,

    /// A mixture's weight list does not line up with its component list.
    #[error("mixture has {components} components but {weights} weights")]
    WeightCountMismatch {
        /// Number of components supplied.
        components: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// An empirical distribution was given no observations.
    #[error("empirical distribution needs at least one observation")]
    EmptyData,

    /// A categorical distribution was given an empty outcome map.
    #[error("categorical distribution needs at least one outcome")]
    EmptyProbabilities,

    /// Weights that cannot form a probability distribution.
    #[error("invalid weights: {reason}")]
    InvalidWeights {
        /// Why the weights were rejected.
        reason: &'static str,
    },

    /// A numeric parameter outside its documented domain.
    #[error("invalid {parameter}: {value} ({constraint})")]
    InvalidParameter {
        /// Parameter name as it appears in the factory signature.
        parameter: &'static str,
        /// The offending value.
        value: f64,
        /// The violated constraint.
        constraint: &'static str,
    },
}

/// Crate-local result alias for fallible constructors.
pub type Result<T> = std::result::Result<T, VariateError>;
