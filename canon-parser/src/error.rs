//! Errors raised while reading text into an expression.
//!
//! Errors raised by the expression engine while the parser builds an expression, such as a
//! division by zero, are reported with the kinds defined in [`canon_compute::error`], pointed at
//! the operators that caused them.

use ariadne::Fmt;
use canon_attrs::ErrorKind;
use canon_error::EXPR;

pub use canon_compute::error::MalformedNumber;

/// A character that cannot appear in an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("illegal character `{}`", symbol),
    labels = ["this character"],
    help = format!(
        "expressions can only contain numbers, letters, {}, and parentheses",
        "+ - * / ^".fg(EXPR),
    ),
)]
pub struct IllegalCharacter {
    /// The character that was found.
    pub symbol: char,
}

/// A parenthesis with no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "mismatched parenthesis",
    labels = ["this parenthesis has no partner"],
    help = if *opening {
        "add an expression and a closing parenthesis `)` after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct MismatchedBrackets {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// A pair of parentheses with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyBrackets;

/// An operator that is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is missing an operand", operator),
    labels = ["this operator"],
    help = format!("add an {} on both sides of `{}`", "expression".fg(EXPR), operator),
)]
pub struct DanglingOperator {
    /// The operator.
    pub operator: char,
}

/// The input contained no expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is nothing to parse",
    help = format!("try an expression such as {}", "2x + 1".fg(EXPR)),
)]
pub struct EmptyExpression;

/// Parentheses and exponents were nested more deeply than allowed.
///
/// Each open parenthesis and each `^` in a chain such as `a^b^c` counts as one level.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = ["this goes past the limit"],
    help = format!("at most {} levels of nesting are allowed", max_depth),
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub max_depth: usize,
}
