//! Reads text into canonical expressions.
//!
//! Input goes through three stages:
//!
//! 1. The [`tokenizer`] removes whitespace and splits the input into tokens.
//! 2. The [`lexer`] validates the tokens, inserts implied multiplication, and folds redundant
//! signs.
//! 3. The [`parser`] resolves precedence and builds the expression with the smart constructors of
//! [`canon_compute`].
//!
//! Every letter is a separate variable, so `2xy` is `2 * x * y`.
//!
//! ```
//! use canon_compute::Expr;
//! use canon_parser::parse;
//!
//! let expr = parse("x + x + 2^3^2").unwrap();
//! assert_eq!(expr, parse("2x + 512").unwrap());
//! assert_eq!(expr.evaluate(&[("x", Expr::int(-256))]).unwrap(), Expr::int(0));
//! ```
//!
//! Errors carry the spans of the input they refer to, and can be printed with [`ariadne`]:
//!
//! ```
//! use ariadne::Source;
//! use canon_parser::parse;
//!
//! let input = "3 / (x - x)";
//! let err = parse(input).unwrap_err();
//! let mut buf = Vec::new();
//! err.build_report("input").write(("input", Source::from(input)), &mut buf).unwrap();
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod tokenizer;

pub use parser::{parse, parse_with, ParseOptions};
