//! Limits applied while building and evaluating expressions.

/// The largest exponent magnitude for which an integer power of a rational number is expanded
/// into its exact value.
///
/// Powers like `2^100000` are kept as symbolic [`Power`](crate::Power) nodes instead, which
/// bounds the size of the integers that building an expression can produce.
pub const MAX_EVALUATED_EXPONENT: u32 = 1 << 16;
