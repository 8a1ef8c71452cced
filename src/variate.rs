//! The uncertain-value handle.

use std::fmt;
use std::sync::Arc;

use crate::graph::{ExprNode, LeafIdGen, SharedSampler};
use crate::traits::Samplable;

/// A random variable represented as a lazily evaluated sampling procedure
/// plus the expression graph it was derived from.
///
/// Nothing is drawn until a consumer asks: [`sample`](Variate::sample) for
/// one draw, [`samples`](Variate::samples) for a stream, or the estimators
/// in [`crate::stats`] and the hypothesis tests in [`crate::sprt`] for
/// summaries. Operators compose graphs rather than samplers, which is what
/// keeps shared sub-expressions correlated: `x.clone() + x` samples `x`
/// once per draw.
///
/// Cloning is cheap and shares the underlying leaves, so a clone is the
/// *same* random variable, not an independent copy.
///
/// # Examples
///
/// ```
/// use aleator::{Compare, Variate};
///
/// let commute = Variate::normal(30.0, 5.0);
/// let door_to_desk = commute + Variate::uniform(2.0, 6.0);
///
/// let minutes = door_to_desk.expected_value(2000);
/// assert!(minutes > 25.0 && minutes < 45.0);
///
/// // Evidence, not a fact: decide with a hypothesis test.
/// let late = door_to_desk.gt(60.0);
/// assert!(!late.probability_exceeds(0.5));
/// ```
#[derive(Clone)]
pub struct Variate<T> {
    pub(crate) sample_fn: SharedSampler<T>,
    pub(crate) node: ExprNode<T>,
}

impl<T: Samplable> Variate<T> {
    /// Wraps a sampling closure as a new leaf.
    ///
    /// The leaf gets a fresh id from the process-wide generator, so two
    /// values built by separate `new` calls never correlate.
    pub fn new<F>(sampler: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let sample_fn: SharedSampler<T> = Arc::new(sampler);
        let node = ExprNode::Leaf {
            id: LeafIdGen::process_wide().next_id(),
            sample: Arc::clone(&sample_fn),
        };
        Self { sample_fn, node }
    }

    /// Wraps an already-built expression graph; drawing evaluates the graph
    /// under a context that lives for exactly one draw.
    pub(crate) fn with_node(node: ExprNode<T>) -> Self {
        let root = node.clone();
        Self {
            sample_fn: Arc::new(move || root.evaluate_fresh()),
            node,
        }
    }

    /// Draws one value.
    ///
    /// Builds a fresh evaluation context, evaluates the root node, and
    /// discards the context. No state survives between draws.
    #[must_use]
    pub fn sample(&self) -> T {
        (self.sample_fn)()
    }

    /// An endless stream of independent draws.
    ///
    /// Each pull performs one [`sample`](Variate::sample); nothing is
    /// memoized between pulls, and calling `samples` again starts an
    /// equivalent fresh stream. Bound it with [`Iterator::take`].
    pub fn samples(&self) -> impl Iterator<Item = T> + '_ {
        std::iter::repeat_with(|| self.sample())
    }

    /// Collects `count` independent draws.
    #[must_use]
    pub fn take_samples(&self, count: usize) -> Vec<T> {
        self.samples().take(count).collect()
    }

    /// Collects `count` independent draws on the rayon thread pool.
    ///
    /// Draws go through the thread-local generator, so parallel collection
    /// needs no locking; the order of the returned batch matches the index
    /// order, not completion order.
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn take_samples_par(&self, count: usize) -> Vec<T> {
        use rayon::prelude::*;

        (0..count).into_par_iter().map(|_| self.sample()).collect()
    }

    /// Applies `transform` to each draw.
    ///
    /// The result is a brand-new leaf over the upstream sampler: it
    /// correlates with itself when shared, but not with the value it was
    /// derived from. `x.map(|v| v) + x` draws `x` twice independently,
    /// while `x.clone() + x` draws it once; use the operators when the
    /// correlation matters.
    pub fn map<U, F>(&self, transform: F) -> Variate<U>
    where
        U: Samplable,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let upstream = Arc::clone(&self.sample_fn);
        Variate::new(move || transform(upstream()))
    }

    /// Draws `self`, applies `transform`, draws the resulting value.
    ///
    /// Same new-leaf correlation boundary as [`map`](Variate::map).
    pub fn flat_map<U, F>(&self, transform: F) -> Variate<U>
    where
        U: Samplable,
        F: Fn(T) -> Variate<U> + Send + Sync + 'static,
    {
        let upstream = Arc::clone(&self.sample_fn);
        Variate::new(move || transform(upstream()).sample())
    }

    /// Rejection sampling: redraws until `predicate` accepts.
    ///
    /// The loop is unbounded: a predicate with zero acceptance probability
    /// never returns, and one with tiny acceptance mass makes every
    /// downstream draw expensive. Callers own the acceptance rate; see
    /// [`filter_with_budget`](Variate::filter_with_budget) for a capped
    /// variant. Same new-leaf correlation boundary as
    /// [`map`](Variate::map).
    pub fn filter<F>(&self, predicate: F) -> Variate<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let upstream = Arc::clone(&self.sample_fn);
        Variate::new(move || loop {
            let candidate = upstream();
            if predicate(&candidate) {
                return candidate;
            }
        })
    }

    /// Rejection sampling with an attempt budget per draw.
    ///
    /// # Panics
    ///
    /// Each draw panics after `max_attempts` consecutive rejections; the
    /// budget turns a silent hang into a loud failure.
    pub fn filter_with_budget<F>(&self, predicate: F, max_attempts: usize) -> Variate<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let upstream = Arc::clone(&self.sample_fn);
        Variate::new(move || {
            for _ in 0..max_attempts {
                let candidate = upstream();
                if predicate(&candidate) {
                    return candidate;
                }
            }
            panic!("rejection sampling exhausted {max_attempts} attempts")
        })
    }
}

impl<T> Variate<T> {
    /// The expression graph this value was derived from.
    #[must_use]
    pub fn node(&self) -> &ExprNode<T> {
        &self.node
    }
}

impl<T: Samplable + fmt::Debug> fmt::Debug for Variate<T> {
    /// Shows one fresh draw next to the graph structure; shared leaves
    /// appear under the same id.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variate {{ draw: {:?}, graph: {:?} }}", self.sample(), self.node)
    }
}
