//! Exact arithmetic on canonical symbolic expressions.
//!
//! This crate defines [`Rational`], an exact rational number, and [`Expr`], a symbolic expression
//! built from rationals, variables, sums, products, and powers. Expressions are kept in a
//! canonical form by the smart constructors [`make_sum`], [`make_product`], and [`make_power`], so
//! equal expressions usually have equal representations:
//!
//! ```
//! use canon_compute::{Expr, make_product};
//!
//! let x = Expr::variable("x");
//! let sum = x.clone().add(x.clone()).unwrap();
//! let product = make_product(vec![Expr::int(2), x], vec![]).unwrap();
//!
//! assert_eq!(sum, product);
//! assert_eq!(sum.to_string(), "2x");
//! ```
//!
//! Expressions can have values substituted for their variables with [`Expr::evaluate`], and can
//! have the exponent laws applied with [`Expr::simplify`]. To build expressions from text, use the
//! `canon-parser` crate.

pub mod consts;
pub mod error;
mod eval;
pub mod expr;
pub mod rational;
pub mod simplify;

#[cfg(test)]
mod proptests;

pub use canon_error::Error;
pub use expr::{
    power::{make_power, Power},
    product::{make_product, Product},
    sum::{make_sum, Sign, Sum},
    Expr,
    FunctionForm,
    Variable,
};
pub use rational::Rational;
