//! Computation graph: expression nodes and the per-draw evaluation context.
//!
//! Every [`Variate`](crate::Variate) owns a root [`ExprNode`]. Operators
//! compose existing nodes rather than wrapping opaque samplers, and each
//! top-level draw runs under one fresh [`EvalContext`] that memoizes leaf
//! draws by [`LeafId`]. That pairing is what makes `x.clone() + x` sample
//! `x` once per draw while two independently constructed values stay
//! independent.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use crate::ops::arith::BinaryFunction;
use crate::ops::compare::{CmpOp, EqOp};
use crate::traits::Samplable;

/// Shared zero-argument sampler stored in leaf nodes.
pub type SharedSampler<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Context-taking evaluator stored in comparison and equality nodes.
///
/// The closure captures a typed operand subtree together with the threshold
/// and predicate, and evaluates that subtree under the caller's context.
/// This is how a `bool`-typed node references, say, an `f64`-typed subtree
/// without the enum becoming polymorphic over two type parameters.
pub type ContextFn<T> = Arc<dyn Fn(&mut EvalContext) -> T + Send + Sync>;

/// Correlation key of a leaf draw.
///
/// Ids are unique and monotonically increasing within their generator; a
/// leaf keeps its id across clones, so every handle derived from the same
/// leaf sees the same draw inside one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafId(u64);

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocator handing out [`LeafId`]s from a shared atomic counter.
///
/// Cloning a generator shares its counter. The crate's constructors use the
/// process-wide instance from [`LeafIdGen::process_wide`]; tests that want
/// deterministic id sequences build their own with [`LeafIdGen::new`] and
/// pass it to [`ExprNode::leaf_with`].
#[derive(Debug, Clone)]
pub struct LeafIdGen {
    next: Arc<AtomicU64>,
}

impl LeafIdGen {
    /// A fresh generator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Allocates the next id. Never returns the same id twice for one
    /// counter, regardless of calling thread.
    #[must_use]
    pub fn next_id(&self) -> LeafId {
        LeafId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The process-wide generator backing the ergonomic constructors.
    #[must_use]
    pub fn process_wide() -> &'static LeafIdGen {
        static IDS: LazyLock<LeafIdGen> = LazyLock::new(LeafIdGen::new);
        &IDS
    }
}

impl Default for LeafIdGen {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-draw memoization scope.
///
/// Lives for exactly one top-level [`ExprNode::evaluate`] call and is
/// discarded afterwards; a context is never reused across draws. Within one
/// context each leaf id is sampled at most once.
#[derive(Default)]
pub struct EvalContext {
    drawn: HashMap<LeafId, Box<dyn Any + Send>>,
}

impl EvalContext {
    /// An empty context for one draw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized value for `id`, running `draw` and recording the
    /// result on first access.
    pub fn get_or_draw<T, F>(&mut self, id: LeafId, draw: F) -> T
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.drawn.get(&id).and_then(|v| v.downcast_ref::<T>()) {
            return value.clone();
        }
        let value = draw();
        self.drawn.insert(id, Box::new(value.clone()));
        value
    }

    /// Number of distinct leaves drawn so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    /// True if no leaf has been drawn yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }
}

/// Expression tree describing how a value is derived.
///
/// Four node kinds cover the whole algebra: leaves draw, `BinaryOp` combines
/// two same-typed subtrees, and `Comparison`/`Equality` turn a typed subtree
/// plus a threshold predicate into a boolean. Nodes are immutable after
/// construction and cheap to clone (clones share leaf ids and samplers).
#[derive(Clone)]
pub enum ExprNode<T> {
    /// A distribution draw, memoized per context under `id`.
    Leaf {
        /// Correlation key for this leaf.
        id: LeafId,
        /// Produces one draw when the context has no value for `id` yet.
        sample: SharedSampler<T>,
    },
    /// A binary function over two subtrees of the same sample type.
    BinaryOp {
        /// Left operand.
        left: Box<ExprNode<T>>,
        /// Right operand.
        right: Box<ExprNode<T>>,
        /// The combining function with its display symbol.
        op: BinaryFunction<T>,
    },
    /// An ordering test of a typed subtree against a constant threshold.
    Comparison {
        /// Evaluates the captured operand under the shared context and
        /// applies the predicate.
        test: ContextFn<T>,
        /// Predicate tag, for diagnostics.
        op: CmpOp,
    },
    /// An equality test of a typed subtree against a constant threshold.
    Equality {
        /// Evaluates the captured operand under the shared context and
        /// applies the predicate.
        test: ContextFn<T>,
        /// Predicate tag, for diagnostics.
        op: EqOp,
    },
}

impl<T: Samplable> ExprNode<T> {
    /// A new leaf with an id from the process-wide generator.
    pub fn leaf<F>(sample: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::leaf_with(LeafIdGen::process_wide(), sample)
    }

    /// A new leaf with an id from the supplied generator.
    pub fn leaf_with<F>(ids: &LeafIdGen, sample: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        ExprNode::Leaf {
            id: ids.next_id(),
            sample: Arc::new(sample),
        }
    }

    /// Evaluates this subtree under `context`.
    ///
    /// Each leaf id reachable from here is sampled at most once per context;
    /// the work is linear in the tree size regardless of how often a shared
    /// subtree is referenced.
    pub fn evaluate(&self, context: &mut EvalContext) -> T {
        match self {
            ExprNode::Leaf { id, sample } => context.get_or_draw(*id, || sample()),
            ExprNode::BinaryOp { left, right, op } => {
                let l = left.evaluate(context);
                let r = right.evaluate(context);
                op.apply(l, r)
            }
            ExprNode::Comparison { test, .. } | ExprNode::Equality { test, .. } => test(context),
        }
    }

    /// One complete draw: evaluates under a context that exists only for
    /// this call.
    pub fn evaluate_fresh(&self) -> T {
        let mut context = EvalContext::new();
        self.evaluate(&mut context)
    }
}

impl<T> ExprNode<T> {
    /// Number of nodes in this tree.
    ///
    /// `Comparison` and `Equality` count as one node each; their operand
    /// trees live behind the context closure.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            ExprNode::Leaf { .. } | ExprNode::Comparison { .. } | ExprNode::Equality { .. } => 1,
            ExprNode::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Height of this tree, counting this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            ExprNode::Leaf { .. } | ExprNode::Comparison { .. } | ExprNode::Equality { .. } => 1,
            ExprNode::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl<T> fmt::Debug for ExprNode<T> {
    /// Structural rendering with leaf ids, e.g. `(Leaf(#4) + Leaf(#4))` for
    /// a self-sum; shared leaves show the same id.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Leaf { id, .. } => write!(f, "Leaf({id})"),
            ExprNode::BinaryOp { left, right, op } => {
                write!(f, "({left:?} {} {right:?})", op.symbol())
            }
            ExprNode::Comparison { op, .. } => write!(f, "Comparison({})", op.symbol()),
            ExprNode::Equality { op, .. } => write!(f, "Equality({})", op.symbol()),
        }
    }
}
