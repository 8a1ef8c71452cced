//! Arithmetic operators over uncertain values.
//!
//! `+ - * /` build [`ExprNode::BinaryOp`] over the operands' existing nodes,
//! so shared sub-expressions keep their correlation: `x.clone() + x` samples
//! `x` once per draw and doubles it. Scalar right-hand operands are lifted to
//! point-mass leaves, and `f64` works on the left-hand side too.

use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::graph::ExprNode;
use crate::variate::Variate;

/// Capability bound for arithmetic operator overloads.
///
/// Dispatch is static: a type either satisfies the bound and gets the
/// operators, or the call fails to compile. There is no runtime operand
/// type check anywhere in the crate.
pub trait Numeric:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> Numeric for T where
    T: Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// A named binary function stored in [`ExprNode::BinaryOp`].
///
/// Pairing the closure with a display symbol keeps one `evaluate` path for
/// numeric and boolean graphs alike while `Debug` output stays readable.
#[derive(Clone)]
pub struct BinaryFunction<T> {
    symbol: &'static str,
    func: Arc<dyn Fn(T, T) -> T + Send + Sync>,
}

impl<T> BinaryFunction<T> {
    /// Applies the function to two evaluated operands.
    pub fn apply(&self, left: T, right: T) -> T {
        (self.func)(left, right)
    }

    /// The display symbol, e.g. `+`.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }
}

impl<T: Numeric> BinaryFunction<T> {
    /// Addition.
    #[must_use]
    pub fn add() -> Self {
        Self {
            symbol: "+",
            func: Arc::new(|l, r| l + r),
        }
    }

    /// Subtraction.
    #[must_use]
    pub fn sub() -> Self {
        Self {
            symbol: "-",
            func: Arc::new(|l, r| l - r),
        }
    }

    /// Multiplication.
    #[must_use]
    pub fn mul() -> Self {
        Self {
            symbol: "*",
            func: Arc::new(|l, r| l * r),
        }
    }

    /// Division. A zero-valued right draw propagates the platform behavior
    /// of the underlying type: infinity for floats, a panic for integers.
    #[must_use]
    pub fn div() -> Self {
        Self {
            symbol: "/",
            func: Arc::new(|l, r| l / r),
        }
    }
}

impl BinaryFunction<bool> {
    /// Logical conjunction. Both operands are always evaluated; there is no
    /// short-circuiting inside a graph.
    #[must_use]
    pub fn and() -> Self {
        Self {
            symbol: "&&",
            func: Arc::new(|l, r| l && r),
        }
    }

    /// Logical disjunction. Both operands are always evaluated.
    #[must_use]
    pub fn or() -> Self {
        Self {
            symbol: "||",
            func: Arc::new(|l, r| l || r),
        }
    }

    /// Exclusive or.
    #[must_use]
    pub fn xor() -> Self {
        Self {
            symbol: "^",
            func: Arc::new(|l, r| l ^ r),
        }
    }
}

impl<T> std::fmt::Debug for BinaryFunction<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinaryFunction({})", self.symbol)
    }
}

/// Joins two handles under a binary node, consuming both.
fn compose<T: Numeric>(lhs: Variate<T>, rhs: Variate<T>, op: BinaryFunction<T>) -> Variate<T> {
    Variate::with_node(ExprNode::BinaryOp {
        left: Box::new(lhs.node),
        right: Box::new(rhs.node),
        op,
    })
}

impl<T: Numeric> Add for Variate<T> {
    type Output = Variate<T>;

    fn add(self, rhs: Self) -> Self::Output {
        compose(self, rhs, BinaryFunction::add())
    }
}

impl<T: Numeric> Sub for Variate<T> {
    type Output = Variate<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        compose(self, rhs, BinaryFunction::sub())
    }
}

impl<T: Numeric> Mul for Variate<T> {
    type Output = Variate<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        compose(self, rhs, BinaryFunction::mul())
    }
}

impl<T: Numeric> Div for Variate<T> {
    type Output = Variate<T>;

    fn div(self, rhs: Self) -> Self::Output {
        compose(self, rhs, BinaryFunction::div())
    }
}

impl<T: Numeric> Add<T> for Variate<T> {
    type Output = Variate<T>;

    /// `x + c` lifts the constant to a point-mass leaf.
    fn add(self, rhs: T) -> Self::Output {
        self + Variate::point(rhs)
    }
}

impl<T: Numeric> Sub<T> for Variate<T> {
    type Output = Variate<T>;

    fn sub(self, rhs: T) -> Self::Output {
        self - Variate::point(rhs)
    }
}

impl<T: Numeric> Mul<T> for Variate<T> {
    type Output = Variate<T>;

    fn mul(self, rhs: T) -> Self::Output {
        self * Variate::point(rhs)
    }
}

impl<T: Numeric> Div<T> for Variate<T> {
    type Output = Variate<T>;

    fn div(self, rhs: T) -> Self::Output {
        self / Variate::point(rhs)
    }
}

impl Add<Variate<f64>> for f64 {
    type Output = Variate<f64>;

    fn add(self, rhs: Variate<f64>) -> Self::Output {
        Variate::point(self) + rhs
    }
}

impl Sub<Variate<f64>> for f64 {
    type Output = Variate<f64>;

    fn sub(self, rhs: Variate<f64>) -> Self::Output {
        Variate::point(self) - rhs
    }
}

impl Mul<Variate<f64>> for f64 {
    type Output = Variate<f64>;

    fn mul(self, rhs: Variate<f64>) -> Self::Output {
        Variate::point(self) * rhs
    }
}

impl Div<Variate<f64>> for f64 {
    type Output = Variate<f64>;

    fn div(self, rhs: Variate<f64>) -> Self::Output {
        Variate::point(self) / rhs
    }
}

impl<T> Neg for Variate<T>
where
    T: Numeric + Neg<Output = T> + Default,
{
    type Output = Variate<T>;

    /// Builds `point(0) - self`, so negation stays inside the graph and
    /// `-x + x` cancels exactly per draw.
    fn neg(self) -> Self::Output {
        Variate::point(T::default()) - self
    }
}

/// Map-based `f64` transforms. Each result is a fresh leaf with the same
/// correlation boundary as [`Variate::map`].
impl Variate<f64> {
    /// Raises every draw to `exponent`.
    #[must_use]
    pub fn pow(&self, exponent: f64) -> Variate<f64> {
        self.map(move |v| v.powf(exponent))
    }

    /// Square root of every draw.
    #[must_use]
    pub fn sqrt(&self) -> Variate<f64> {
        self.map(f64::sqrt)
    }

    /// Natural logarithm of every draw.
    #[must_use]
    pub fn ln(&self) -> Variate<f64> {
        self.map(f64::ln)
    }

    /// `e` raised to every draw.
    #[must_use]
    pub fn exp(&self) -> Variate<f64> {
        self.map(f64::exp)
    }

    /// Absolute value of every draw.
    #[must_use]
    pub fn abs(&self) -> Variate<f64> {
        self.map(f64::abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_masses_add_deterministically() {
        let sum = Variate::point(5.0f64) + Variate::point(3.0);
        for _ in 0..20 {
            assert!((sum.sample() - 8.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn all_four_operators_apply() {
        assert!(((Variate::point(6.0f64) - Variate::point(2.0)).sample() - 4.0).abs() < 1e-12);
        assert!(((Variate::point(6.0f64) * Variate::point(2.0)).sample() - 12.0).abs() < 1e-12);
        assert!(((Variate::point(6.0f64) / Variate::point(2.0)).sample() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn scalar_operands_lift_to_point_masses() {
        let x = Variate::point(5.0f64);
        assert!(((x.clone() * 2.0).sample() - 10.0).abs() < 1e-12);
        assert!(((x.clone() + 1.5).sample() - 6.5).abs() < 1e-12);
        assert!(((10.0 / x).sample() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn shared_subexpressions_cancel_exactly() {
        let x = Variate::uniform(0.0, 1.0);
        let zero = x.clone() - x;
        for _ in 0..100 {
            assert!(zero.sample().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn negation_cancels_against_its_source() {
        let x = Variate::uniform(0.0, 10.0);
        let zero = -x.clone() + x;
        for _ in 0..100 {
            assert!(zero.sample().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn float_division_by_zero_draw_is_infinite() {
        let q = Variate::point(1.0f64) / Variate::point(0.0);
        assert!(q.sample().is_infinite());
    }

    #[test]
    fn map_based_transforms_apply_per_draw() {
        assert!((Variate::point(4.0).sqrt().sample() - 2.0).abs() < 1e-12);
        assert!((Variate::point(2.0).pow(10.0).sample() - 1024.0).abs() < 1e-12);
        assert!(Variate::point(1.0).ln().sample().abs() < 1e-12);
        assert!((Variate::point(0.0).exp().sample() - 1.0).abs() < 1e-12);
        assert!((Variate::point(-3.0).abs().sample() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn binary_functions_expose_their_symbols() {
        assert_eq!(BinaryFunction::<f64>::add().symbol(), "+");
        assert_eq!(BinaryFunction::<f64>::div().symbol(), "/");
        assert_eq!(BinaryFunction::and().symbol(), "&&");
        assert!(BinaryFunction::<bool>::xor().apply(true, false));
    }
}
