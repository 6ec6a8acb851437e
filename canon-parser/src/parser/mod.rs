//! Turns validated tokens into a canonical [`Expr`].
//!
//! The parser works on one parenthesized group at a time. Each group is read into a flat list of
//! [`Item`]s, with nested groups parsed recursively and replaced by the expression they produce.
//! The list is then reduced in three passes, from highest to lowest precedence:
//!
//! 1. `^`, from right to left, so that `a^b^c` is `a^(b^c)`.
//! 2. Runs of `*` and `/`, each run becoming a single [`make_product`] call.
//! 3. `+` and `-`, becoming a single [`make_sum`] call.
//!
//! The operand to the right of `^`, `*`, or `/` may carry one sign, as in `2^-x` or `3/-4`. Since
//! every node is built through the smart constructors, the result is in canonical form.

mod item;

use canon_compute::{make_power, make_product, make_sum, Expr, Rational, Sign};
use canon_error::Error;
use crate::{error::DanglingOperator, lexer::lex, tokenizer::{Token, TokenKind}};
use item::Item;
use std::ops::Range;
use tracing::debug;

/// Options that control parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// The maximum nesting depth of the input. Each open parenthesis counts as one level, and so
    /// does each `^` in a chain like `a^b^c`.
    ///
    /// The parser recurses once per parenthesis, and the expressions it builds nest once per `^`,
    /// so this bounds the stack usage of parsing and of everything done with the result.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Parses the input into a canonical expression, using the default [`ParseOptions`].
pub fn parse(input: &str) -> Result<Expr, Error> {
    parse_with(input, &ParseOptions::default())
}

/// Parses the input into a canonical expression.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Expr, Error> {
    let tokens = lex(input, options.max_depth)?;
    let (expr, _, _) = parse_range(&tokens, 0)?;
    debug!(%expr, "parsed expression");
    Ok(expr)
}

/// Returns the index of the closing parenthesis that ends the group starting at `start`, or the
/// length of the token list if the group is the whole input.
fn group_end(tokens: &[Token], start: usize) -> usize {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(start) {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen if depth == 0 => return idx,
            TokenKind::CloseParen => depth -= 1,
            _ => {},
        }
    }
    tokens.len()
}

/// Parses the group of tokens starting at `start`.
///
/// Returns the expression, the span it covers, and the index of the first token after the group
/// (past its closing parenthesis, if any).
fn parse_range(tokens: &[Token], start: usize) -> Result<(Expr, Range<usize>, usize), Error> {
    let end = group_end(tokens, start);
    let mut items = Vec::new();

    let mut idx = start;
    while idx < end {
        let token = &tokens[idx];
        match token.kind {
            TokenKind::Number => {
                let value = Rational::parse_number(&token.lexeme)
                    .map_err(|err| err.with_spans(vec![token.span.clone()]))?;
                items.push(Item::Expr(Expr::Rational(value), token.span.clone()));
                idx += 1;
            },
            TokenKind::Name => {
                items.push(Item::Expr(Expr::variable(token.lexeme.as_str()), token.span.clone()));
                idx += 1;
            },
            TokenKind::OpenParen => {
                let (expr, inner_span, next) = parse_range(tokens, idx + 1)?;
                let close_end = tokens.get(next - 1)
                    .map_or(inner_span.end, |close| close.span.end.max(inner_span.end));
                items.push(Item::Expr(expr, token.span.start..close_end));
                idx = next;
            },
            kind => {
                items.push(Item::Op(kind, token.span.clone()));
                idx += 1;
            },
        }
    }

    let (expr, span) = resolve(items)?;
    Ok((expr, span, end + 1))
}

/// Reduces a flat list of items into a single expression.
fn resolve(items: Vec<Item>) -> Result<(Expr, Range<usize>), Error> {
    let items = resolve_powers(items)?;
    let items = resolve_products(items)?;
    resolve_sum(items)
}

/// Takes the next operand, applying the sign in front of it, if there is one.
///
/// Returns `None` if the next item is not an operand.
fn take_operand(items: &mut impl Iterator<Item = Item>) -> Option<(Expr, bool, Range<usize>)> {
    match items.next()? {
        Item::Expr(expr, span) => Some((expr, false, span)),
        Item::Op(TokenKind::Sub, sign_span) => match items.next()? {
            Item::Expr(expr, span) => Some((expr, true, sign_span.start..span.end)),
            Item::Op(..) => None,
        },
        Item::Op(TokenKind::Add, _) => match items.next()? {
            Item::Expr(expr, span) => Some((expr, false, span)),
            Item::Op(..) => None,
        },
        Item::Op(..) => None,
    }
}

/// Resolves every `^`, from right to left.
fn resolve_powers(mut items: Vec<Item>) -> Result<Vec<Item>, Error> {
    while let Some(op_idx) = items.iter().rposition(|item| item.is_op(TokenKind::Exp)) {
        let op_span = items[op_idx].span().clone();
        let mut rest = items.split_off(op_idx).into_iter().skip(1);
        let base = items.pop();

        let (Some(Item::Expr(base, base_span)), Some((exponent, negative, exponent_span))) =
            (base, take_operand(&mut rest))
        else {
            return Err(Error::new(vec![op_span], DanglingOperator { operator: '^' }));
        };

        let span = base_span.start..exponent_span.end;
        let exponent = if negative {
            exponent.negate().map_err(|err| err.with_spans(vec![exponent_span]))?
        } else {
            exponent
        };
        let power = make_power(base, exponent).map_err(|err| err.with_spans(vec![span.clone()]))?;

        items.push(Item::Expr(power, span));
        items.extend(rest);
    }
    Ok(items)
}

fn is_product_op(item: &Item) -> bool {
    item.is_op(TokenKind::Mul) || item.is_op(TokenKind::Div)
}

/// Resolves each run of `*` and `/` into one product.
fn resolve_products(items: Vec<Item>) -> Result<Vec<Item>, Error> {
    let mut output = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().peekable();

    while let Some(item) = iter.next() {
        let starts_run = matches!(iter.peek(), Some(next) if is_product_op(next));
        let (first, first_span) = match item {
            Item::Expr(expr, span) if starts_run => (expr, span),
            other => {
                output.push(other);
                continue;
            },
        };

        let mut factors = vec![first];
        let mut divisors = Vec::new();
        let mut span = first_span;

        while let Some(op) = iter.next_if(is_product_op) {
            let Some((operand, negative, operand_span)) = take_operand(&mut iter) else {
                let operator = if op.is_op(TokenKind::Mul) { '*' } else { '/' };
                return Err(Error::new(vec![op.span().clone()], DanglingOperator { operator }));
            };

            if negative {
                factors.push(Expr::Rational(Rational::negative_one()));
            }
            if op.is_op(TokenKind::Mul) {
                factors.push(operand);
            } else {
                divisors.push(operand);
            }
            span.end = operand_span.end;
        }

        let product = make_product(factors, divisors)
            .map_err(|err| err.with_spans(vec![span.clone()]))?;
        output.push(Item::Expr(product, span));
    }

    Ok(output)
}

/// Resolves the remaining `+` and `-` into one sum.
fn resolve_sum(items: Vec<Item>) -> Result<(Expr, Range<usize>), Error> {
    let mut terms = Vec::with_capacity(items.len());
    let mut sign = Sign::Positive;
    let mut span: Option<Range<usize>> = None;
    let mut pending_op = None;

    for item in items {
        let item_span = item.span().clone();
        span = Some(match span {
            Some(span) => span.start..item_span.end,
            None => item_span.clone(),
        });

        match item {
            Item::Expr(expr, _) => {
                terms.push((expr, sign));
                sign = Sign::Positive;
                pending_op = None;
            },
            Item::Op(TokenKind::Add, _) => pending_op = Some(('+', item_span)),
            Item::Op(TokenKind::Sub, _) => {
                sign = match sign {
                    Sign::Positive => Sign::Negative,
                    Sign::Negative => Sign::Positive,
                };
                pending_op = Some(('-', item_span));
            },
            Item::Op(kind, _) => {
                let operator = kind.operator_char().unwrap_or_default();
                return Err(Error::new(vec![item_span], DanglingOperator { operator }));
            },
        }
    }

    if let Some((operator, op_span)) = pending_op {
        return Err(Error::new(vec![op_span], DanglingOperator { operator }));
    }
    let span = span.unwrap_or(0..0);

    if terms.len() == 1 && terms[0].1 == Sign::Positive {
        if let Some((expr, _)) = terms.pop() {
            return Ok((expr, span));
        }
    }

    let sum = make_sum(terms).map_err(|err| err.with_spans(vec![span.clone()]))?;
    Ok((sum, span))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use canon_compute::error::{DivisionByZero, UndefinedPower};
    use super::*;

    fn value(input: &str) -> Expr {
        parse(input).unwrap().evaluate_constant().unwrap()
    }

    #[test]
    fn implied_multiplication() {
        assert_eq!(value("2(3+4)"), Expr::int(14));
        assert_eq!(parse("2x").unwrap(), parse("2*x").unwrap());
        assert_eq!(parse("x(y)").unwrap(), parse("x*y").unwrap());
    }

    #[test]
    fn like_terms() {
        assert_eq!(parse("x+x").unwrap(), parse("2x").unwrap());
        assert_eq!(parse("x+x").unwrap(), parse("2*x").unwrap());
        assert_eq!(parse("3xy - yx").unwrap(), parse("2xy").unwrap());
    }

    #[test]
    fn multiples_of_sums_collect() {
        assert_eq!(parse("2(x+1)-(x+1)").unwrap(), parse("x+1").unwrap());
        assert_eq!(parse("2(x+1)").unwrap(), parse("2x+2").unwrap());
        assert_eq!(parse("(x+1)/2 + (x+1)/2").unwrap(), parse("x+1").unwrap());
        assert_eq!(parse("3(x+1) - 3x").unwrap(), Expr::int(3));
    }

    #[test]
    fn product_bases_merge_back() {
        assert_eq!(parse("2(xy)^z(xy)^(1-z)").unwrap(), parse("2xy").unwrap());
    }

    #[test]
    fn sign_folding() {
        assert_eq!(parse("5--3").unwrap(), parse("5+3").unwrap());
        assert_eq!(value("5--3"), Expr::int(8));
        assert_eq!(parse("5+-3").unwrap(), parse("5-3").unwrap());
        assert_eq!(value("5+-3"), Expr::int(2));
        assert_eq!(value("-2*-3"), Expr::int(6));
        assert_eq!(value("12/-4"), Expr::int(-3));
    }

    #[test]
    fn power_towers() {
        assert_eq!(value("2^3^2"), Expr::int(512));
        assert_eq!(value("(2^3)^2"), Expr::int(64));
        assert_eq!(value("2^-2"), Expr::Rational(Rational::parse_number("1/4").unwrap()));
        assert_eq!(value("-2^2"), Expr::int(-4));
        assert_eq!(value("2^-1^2"), Expr::Rational(Rational::parse_number("1/2").unwrap()));
    }

    #[test]
    fn precedence() {
        assert_eq!(value("1+2*3"), Expr::int(7));
        assert_eq!(value("2*3^2"), Expr::int(18));
        assert_eq!(value("8/2/2"), Expr::int(2));
        assert_eq!(value("8/2*2"), Expr::int(8));
        assert_eq!(value("1-2-3"), Expr::int(-4));
        assert_eq!(value("1.5/0.25 + 2"), Expr::int(8));
    }

    #[test]
    fn variables_and_structure() {
        let expr = parse("x^2 + 2x + 1").unwrap();
        let Expr::Sum(sum) = &expr else {
            panic!("expected a sum");
        };
        assert_eq!(sum.constant(), &Rational::one());
        assert_eq!(sum.terms().len(), 2);

        assert_eq!(expr.evaluate(&[("x", Expr::int(3))]).unwrap(), Expr::int(16));
    }

    #[test]
    fn unbound_and_bound() {
        let expr = parse("x+1").unwrap();
        assert!(expr.evaluate_constant().is_err());
        assert_eq!(expr.evaluate(&[("x", Expr::int(3))]).unwrap(), Expr::int(4));
    }

    #[test]
    fn arithmetic_errors_have_spans() {
        let err = parse("1 + 1/0").unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![4..7]);

        let err = parse("0^0").unwrap_err();
        assert_eq!(err.downcast_ref::<UndefinedPower>(), Some(&UndefinedPower { negative: false }));
        assert_eq!(err.spans, vec![0..3]);

        let err = parse("0^-1").unwrap_err();
        assert_eq!(err.downcast_ref::<UndefinedPower>(), Some(&UndefinedPower { negative: true }));
    }

    #[test]
    fn nesting_option() {
        let options = ParseOptions { max_depth: 1 };
        assert!(parse_with("(x)", &options).is_ok());
        assert!(parse_with("((x))", &options).is_err());
        assert!(parse("((((((x))))))").is_ok());

        assert!(parse_with("x^y", &options).is_ok());
        assert!(parse_with("x^y^z", &options).is_err());
        let tower = format!("{}x", "x^".repeat(200_000));
        assert!(parse(&tower).is_err());
    }

    #[test]
    fn unclosed_groups() {
        assert_eq!(value("2(3+4"), Expr::int(14));
        assert_eq!(value("((1+1"), Expr::int(2));
    }

    #[test]
    fn display_round_trip() {
        for input in [
            "x^2 + 2x + 1",
            "3xy - 1/2 y",
            "(x+1)^(1/2) * 3 * 2^(1/2)",
            "x/y - y/x",
            "(2x)^y + (-2)^(1/3)",
            "a^-1 b^2 c",
            "(x + 1)(x - 1) + 5",
        ] {
            let expr = parse(input).unwrap();
            let rendered = expr.to_string();
            assert_eq!(parse(&rendered).unwrap(), expr, "{} rendered as {}", input, rendered);
        }
    }
}
