//! Boolean combinators over `Variate<bool>`.
//!
//! `and`/`or`/`xor` are [`ExprNode::BinaryOp`] nodes over the operand graphs
//! and `not` is the equality node `x != true`, so combined booleans evaluate
//! under one shared context. Sub-expressions referencing the same leaves
//! stay consistent within a draw: `x.gt(7.0).and(&x.lt(3.0))` can never
//! sample `true`.

use std::ops::{BitAnd, BitOr, Not};

use crate::graph::ExprNode;
use crate::ops::arith::BinaryFunction;
use crate::ops::compare::{EqOp, equality_node};
use crate::traits::Samplable;
use crate::variate::Variate;

/// Logical connectives preserving intra-draw correlation.
pub trait LogicalOps {
    /// True when both operands are true within one draw.
    fn and(&self, other: &Variate<bool>) -> Variate<bool>;

    /// True when either operand is true within one draw.
    fn or(&self, other: &Variate<bool>) -> Variate<bool>;

    /// Inverts each draw.
    fn not(&self) -> Variate<bool>;

    /// True when the operands disagree within one draw.
    fn xor(&self, other: &Variate<bool>) -> Variate<bool>;

    /// Negated conjunction.
    fn nand(&self, other: &Variate<bool>) -> Variate<bool>;

    /// Negated disjunction.
    fn nor(&self, other: &Variate<bool>) -> Variate<bool>;
}

fn join(lhs: &Variate<bool>, rhs: &Variate<bool>, op: BinaryFunction<bool>) -> Variate<bool> {
    Variate::with_node(ExprNode::BinaryOp {
        left: Box::new(lhs.node.clone()),
        right: Box::new(rhs.node.clone()),
        op,
    })
}

impl LogicalOps for Variate<bool> {
    fn and(&self, other: &Variate<bool>) -> Variate<bool> {
        join(self, other, BinaryFunction::and())
    }

    fn or(&self, other: &Variate<bool>) -> Variate<bool> {
        join(self, other, BinaryFunction::or())
    }

    fn not(&self) -> Variate<bool> {
        Variate::with_node(equality_node(self.node.clone(), true, EqOp::Ne))
    }

    fn xor(&self, other: &Variate<bool>) -> Variate<bool> {
        join(self, other, BinaryFunction::xor())
    }

    fn nand(&self, other: &Variate<bool>) -> Variate<bool> {
        self.and(other).not()
    }

    fn nor(&self, other: &Variate<bool>) -> Variate<bool> {
        self.or(other).not()
    }
}

impl Variate<bool> {
    /// Material implication: `(not self) or consequent`, correlated through
    /// any shared leaves, so `x.gt(5.0).implies(&x.gt(3.0))` is constantly
    /// true.
    #[must_use]
    pub fn implies(&self, consequent: &Variate<bool>) -> Variate<bool> {
        self.not().or(consequent)
    }

    /// True when both operands agree within one draw.
    #[must_use]
    pub fn if_and_only_if(&self, other: &Variate<bool>) -> Variate<bool> {
        self.xor(other).not()
    }

    /// Per draw: samples the condition, then samples the chosen branch.
    ///
    /// This is a sampling combinator, not a graph node: the result is a
    /// fresh leaf with the same correlation boundary as
    /// [`flat_map`](Variate::flat_map).
    #[must_use]
    pub fn if_then_else<T: Samplable>(
        &self,
        if_true: Variate<T>,
        if_false: Variate<T>,
    ) -> Variate<T> {
        let condition = self.clone();
        Variate::new(move || {
            if condition.sample() {
                if_true.sample()
            } else {
                if_false.sample()
            }
        })
    }
}

impl BitAnd for Variate<bool> {
    type Output = Variate<bool>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(&rhs)
    }
}

impl BitOr for Variate<bool> {
    type Output = Variate<bool>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(&rhs)
    }
}

impl Not for Variate<bool> {
    type Output = Variate<bool>;

    fn not(self) -> Self::Output {
        LogicalOps::not(&self)
    }
}
