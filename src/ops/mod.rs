//! Operator overloads and combinator traits for [`Variate`](crate::Variate).

pub mod arith;
pub mod compare;
pub mod logic;

pub use arith::{BinaryFunction, Numeric};
pub use compare::{CmpOp, Compare, EqOp};
pub use logic::LogicalOps;
