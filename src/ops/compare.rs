//! Comparison and equality tests producing `Variate<bool>`.
//!
//! Every test builds an [`ExprNode::Comparison`] or [`ExprNode::Equality`]
//! over the operand's existing node, so the resulting boolean stays
//! correlated with its source: inside one draw, `x.gt(5.0)` and `x.lt(3.0)`
//! see the same `x`. Value-vs-value forms (`gt_var` and friends) evaluate
//! both operand graphs under the shared context.

use std::sync::Arc;

use crate::graph::{EvalContext, ExprNode};
use crate::ops::logic::LogicalOps;
use crate::traits::Samplable;
use crate::variate::Variate;

/// Ordering predicate carried by a comparison node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Strictly greater than the threshold.
    Gt,
    /// Strictly less than the threshold.
    Lt,
    /// Greater than or equal to the threshold.
    Ge,
    /// Less than or equal to the threshold.
    Le,
}

impl CmpOp {
    /// Display symbol for diagnostics.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
        }
    }

    /// Applies the predicate.
    pub fn apply<T: PartialOrd>(self, left: &T, right: &T) -> bool {
        match self {
            CmpOp::Gt => left > right,
            CmpOp::Lt => left < right,
            CmpOp::Ge => left >= right,
            CmpOp::Le => left <= right,
        }
    }
}

/// Equality predicate carried by an equality node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqOp {
    /// Equal to the threshold.
    Eq,
    /// Not equal to the threshold.
    Ne,
}

impl EqOp {
    /// Display symbol for diagnostics.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            EqOp::Eq => "==",
            EqOp::Ne => "!=",
        }
    }

    /// Applies the predicate.
    pub fn apply<T: PartialEq>(self, left: &T, right: &T) -> bool {
        match self {
            EqOp::Eq => left == right,
            EqOp::Ne => left != right,
        }
    }
}

/// Ordering test of a subtree against a constant threshold.
pub(crate) fn comparison_node<T>(operand: ExprNode<T>, threshold: T, op: CmpOp) -> ExprNode<bool>
where
    T: PartialOrd + Samplable,
{
    ExprNode::Comparison {
        test: Arc::new(move |context: &mut EvalContext| {
            op.apply(&operand.evaluate(context), &threshold)
        }),
        op,
    }
}

/// Equality test of a subtree against a constant threshold.
pub(crate) fn equality_node<T>(operand: ExprNode<T>, threshold: T, op: EqOp) -> ExprNode<bool>
where
    T: PartialEq + Samplable,
{
    ExprNode::Equality {
        test: Arc::new(move |context: &mut EvalContext| {
            op.apply(&operand.evaluate(context), &threshold)
        }),
        op,
    }
}

/// Ordering test between two subtrees, evaluated under one context.
pub(crate) fn comparison_between<T>(lhs: ExprNode<T>, rhs: ExprNode<T>, op: CmpOp) -> ExprNode<bool>
where
    T: PartialOrd + Samplable,
{
    ExprNode::Comparison {
        test: Arc::new(move |context: &mut EvalContext| {
            let l = lhs.evaluate(context);
            let r = rhs.evaluate(context);
            op.apply(&l, &r)
        }),
        op,
    }
}

/// Equality test between two subtrees, evaluated under one context.
pub(crate) fn equality_between<T>(lhs: ExprNode<T>, rhs: ExprNode<T>, op: EqOp) -> ExprNode<bool>
where
    T: PartialEq + Samplable,
{
    ExprNode::Equality {
        test: Arc::new(move |context: &mut EvalContext| {
            let l = lhs.evaluate(context);
            let r = rhs.evaluate(context);
            op.apply(&l, &r)
        }),
        op,
    }
}

/// Threshold tests turning a `Variate<T>` into evidence, not a fact.
///
/// Feed the result to [`probability_exceeds`](Variate::probability_exceeds)
/// or [`implicit_conditional`](Variate::implicit_conditional) to decide.
pub trait Compare<T> {
    /// Evidence that a draw exceeds `threshold`.
    fn gt(&self, threshold: T) -> Variate<bool>;

    /// Evidence that a draw falls below `threshold`.
    fn lt(&self, threshold: T) -> Variate<bool>;

    /// Evidence that a draw is at least `threshold`.
    fn ge(&self, threshold: T) -> Variate<bool>;

    /// Evidence that a draw is at most `threshold`.
    fn le(&self, threshold: T) -> Variate<bool>;

    /// Evidence that a draw equals `threshold`.
    fn eq(&self, threshold: T) -> Variate<bool>;

    /// Evidence that a draw differs from `threshold`.
    fn ne(&self, threshold: T) -> Variate<bool>;
}

impl<T> Compare<T> for Variate<T>
where
    T: PartialOrd + PartialEq + Samplable,
{
    fn gt(&self, threshold: T) -> Variate<bool> {
        Variate::with_node(comparison_node(self.node.clone(), threshold, CmpOp::Gt))
    }

    fn lt(&self, threshold: T) -> Variate<bool> {
        Variate::with_node(comparison_node(self.node.clone(), threshold, CmpOp::Lt))
    }

    fn ge(&self, threshold: T) -> Variate<bool> {
        Variate::with_node(comparison_node(self.node.clone(), threshold, CmpOp::Ge))
    }

    fn le(&self, threshold: T) -> Variate<bool> {
        Variate::with_node(comparison_node(self.node.clone(), threshold, CmpOp::Le))
    }

    fn eq(&self, threshold: T) -> Variate<bool> {
        Variate::with_node(equality_node(self.node.clone(), threshold, EqOp::Eq))
    }

    fn ne(&self, threshold: T) -> Variate<bool> {
        Variate::with_node(equality_node(self.node.clone(), threshold, EqOp::Ne))
    }
}

impl<T: PartialOrd + Samplable> Variate<T> {
    /// Evidence that a draw of `self` exceeds the same draw's `other`.
    ///
    /// Both graphs evaluate under one context, so `x.gt_var(&x)` is
    /// constantly false.
    #[must_use]
    pub fn gt_var(&self, other: &Variate<T>) -> Variate<bool> {
        Variate::with_node(comparison_between(
            self.node.clone(),
            other.node.clone(),
            CmpOp::Gt,
        ))
    }

    /// Evidence that a draw of `self` falls below `other` within one draw.
    #[must_use]
    pub fn lt_var(&self, other: &Variate<T>) -> Variate<bool> {
        Variate::with_node(comparison_between(
            self.node.clone(),
            other.node.clone(),
            CmpOp::Lt,
        ))
    }
}

impl<T: PartialEq + Samplable> Variate<T> {
    /// Evidence that draws of `self` and `other` coincide within one draw.
    ///
    /// Shares the context, so `x.eq_var(&x)` is constantly true.
    #[must_use]
    pub fn eq_var(&self, other: &Variate<T>) -> Variate<bool> {
        Variate::with_node(equality_between(
            self.node.clone(),
            other.node.clone(),
            EqOp::Eq,
        ))
    }
}

impl Variate<f64> {
    /// Evidence that a draw lies within `tolerance` of `target`.
    ///
    /// Built from two correlated threshold tests over the same node.
    #[must_use]
    pub fn approx_eq(&self, target: f64, tolerance: f64) -> Variate<bool> {
        self.within_range(target - tolerance, target + tolerance)
    }

    /// Evidence that a draw lies in `[min, max]`.
    #[must_use]
    pub fn within_range(&self, min: f64, max: f64) -> Variate<bool> {
        self.ge(min).and(&self.le(max))
    }
}
