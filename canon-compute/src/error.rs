//! Errors raised while building, evaluating, or simplifying expressions.
//!
//! These errors carry no span information of their own, since expressions do not remember the
//! source text they came from. The parser points them at the construct being built.

use ariadne::Fmt;
use canon_attrs::ErrorKind;
use canon_error::EXPR;

/// Attempted to divide by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this expression evaluates to zero"],
    help = "the denominator of a fraction can never be zero",
)]
pub struct DivisionByZero;

/// Attempted to raise zero to the zeroth power, or to a negative power.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if *negative {
        "zero raised to a negative power"
    } else {
        "zero raised to the zeroth power"
    },
    labels = ["this power"],
    help = format!("zero can only be raised to a {} exponent", "positive".fg(EXPR)),
)]
pub struct UndefinedPower {
    /// Whether the exponent was negative. Otherwise, it was zero.
    pub negative: bool,
}

/// A variable had no value during evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", name),
    labels = ["this variable"],
    help = format!("give it a value, for example: {}", format!("{} = 1", name).fg(EXPR)),
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: String,
}

/// A number literal could not be understood.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("malformed number `{}`", text),
    labels = ["this number"],
    help = "numbers have at least one digit, at most one decimal point, and at most one `/`",
)]
pub struct MalformedNumber {
    /// The text of the number.
    pub text: String,
}
