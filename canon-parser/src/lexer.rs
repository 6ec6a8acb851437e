//! Validation of the token stream.
//!
//! The tokenizer accepts any input. [`lex`] checks that its tokens form a well-shaped expression,
//! and rewrites them into a simpler stream for the parser:
//!
//! - A `*` is inserted wherever multiplication is implied, as in `2x`, `3(x+1)`, and `(a)(b)`.
//! - Redundant signs are folded: a `+` that does not follow an operand is dropped, `+-` becomes
//! `-`, and `--` becomes `+`. After folding, no operator is followed by more than one sign.
//! - Parentheses left open at the end of the input are closed.
//!
//! The nesting depth of the result is bounded: every open parenthesis and every `^` in an unbroken
//! exponent chain (`a^b^c^...`) adds one level.
//!
//! Every error found here points at the offending token.

use canon_error::Error;
use crate::{
    error::{
        DanglingOperator,
        EmptyBrackets,
        EmptyExpression,
        IllegalCharacter,
        MalformedNumber,
        MismatchedBrackets,
        NestingTooDeep,
    },
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use tracing::trace;

/// Tokenizes and validates the input, returning the token stream to be parsed.
pub fn lex(input: &str, max_depth: usize) -> Result<Vec<Token>, Error> {
    let tokens = tokenize_complete(input);
    let mut validator = Validator::new(max_depth);
    for token in &tokens {
        validator.push(token)?;
    }
    let output = validator.finish(&tokens, input.len())?;

    trace!(tokens = ?output.iter().map(|token| token.kind).collect::<Vec<_>>(), "lexed input");
    Ok(output)
}

struct Validator {
    output: Vec<Token>,

    /// Spans of the opening parentheses that have not been closed yet.
    open: Vec<std::ops::Range<usize>>,

    /// Number of chained `^` at each open level, the outermost first.
    chains: Vec<usize>,

    /// Open parentheses plus every chained `^`.
    depth: usize,

    /// A sign that was folded away since the last token was emitted.
    dropped_sign: Option<Token>,

    max_depth: usize,
}

impl Validator {
    fn new(max_depth: usize) -> Self {
        Self {
            output: Vec::new(),
            open: Vec::new(),
            chains: vec![0],
            depth: 0,
            dropped_sign: None,
            max_depth,
        }
    }

    /// Enters one more level of nesting, failing if that goes past the limit.
    fn descend(&mut self, token: &Token) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                vec![token.span.clone()],
                NestingTooDeep { max_depth: self.max_depth },
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Ends the exponent chain at the current level.
    fn break_chain(&mut self) {
        if let Some(chain) = self.chains.last_mut() {
            self.depth -= *chain;
            *chain = 0;
        }
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.output.last().map(|token| token.kind)
    }

    fn after_value(&self) -> bool {
        self.last_kind().map_or(false, TokenKind::is_value)
    }

    /// Inserts an implied `*` in front of the given token.
    fn imply_multiplication(&mut self, before: &Token) {
        if self.after_value() {
            self.break_chain();
            self.output.push(Token {
                span: before.span.start..before.span.start,
                kind: TokenKind::Mul,
                lexeme: String::new(),
            });
        }
    }

    fn push(&mut self, token: &Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::Symbol => {
                let symbol = token.lexeme.chars().next().unwrap_or_default();
                return Err(Error::new(vec![token.span.clone()], IllegalCharacter { symbol }));
            },
            TokenKind::Dot => {
                return Err(Error::new(
                    vec![token.span.clone()],
                    MalformedNumber { text: token.lexeme.clone() },
                ));
            },
            TokenKind::Number => {
                // a number directly after another number means a second decimal point
                if let Some(last) = self.output.last().filter(|last| last.kind == TokenKind::Number) {
                    return Err(Error::new(
                        vec![last.span.start..token.span.end],
                        MalformedNumber { text: format!("{}{}", last.lexeme, token.lexeme) },
                    ));
                }
                self.imply_multiplication(token);
            },
            TokenKind::Name => self.imply_multiplication(token),
            TokenKind::OpenParen => {
                self.imply_multiplication(token);
                self.descend(token)?;
                self.open.push(token.span.clone());
                self.chains.push(0);
            },
            TokenKind::CloseParen => {
                let Some(open) = self.open.pop() else {
                    return Err(Error::new(
                        vec![token.span.clone()],
                        MismatchedBrackets { opening: false },
                    ));
                };
                self.break_chain();
                self.chains.pop();
                self.depth -= 1;
                match self.output.last() {
                    Some(last) if last.kind == TokenKind::OpenParen => {
                        return Err(match &self.dropped_sign {
                            Some(sign) => dangling(sign),
                            None => Error::new(vec![open.start..token.span.end], EmptyBrackets),
                        });
                    },
                    Some(last) if last.kind.is_operator() => {
                        return Err(dangling(last));
                    },
                    _ => {},
                }
            },
            TokenKind::Add => {
                // unary plus does nothing
                if !self.after_value() {
                    self.dropped_sign = Some(token.clone());
                    return Ok(());
                }
                self.break_chain();
            },
            TokenKind::Sub if self.after_value() => self.break_chain(),
            TokenKind::Sub => match self.last_kind() {
                Some(TokenKind::Add) => {
                    if let Some(last) = self.output.last_mut() {
                        last.kind = TokenKind::Sub;
                        last.span.end = token.span.end;
                        last.lexeme = String::from("-");
                    }
                    return Ok(());
                },
                Some(TokenKind::Sub) => {
                    if let Some(last) = self.output.pop() {
                        let folded = Token {
                            span: last.span.start..token.span.end,
                            kind: TokenKind::Add,
                            lexeme: String::from("+"),
                        };
                        if self.after_value() {
                            self.output.push(folded);
                        } else {
                            self.dropped_sign = Some(folded);
                        }
                    }
                    return Ok(());
                },
                _ => {},
            },
            TokenKind::Mul | TokenKind::Div | TokenKind::Exp => {
                if !self.after_value() {
                    return Err(dangling(token));
                }
                if token.kind == TokenKind::Exp {
                    self.descend(token)?;
                    if let Some(chain) = self.chains.last_mut() {
                        *chain += 1;
                    }
                } else {
                    self.break_chain();
                }
            },
        }

        self.dropped_sign = None;
        self.output.push(token.clone());
        Ok(())
    }

    fn finish(mut self, input: &[Token], input_len: usize) -> Result<Vec<Token>, Error> {
        let Some(last) = self.output.last() else {
            return Err(match input.last() {
                // everything was folded away, as in `+` or `--`
                Some(token) => dangling(token),
                None => Error::spanless(EmptyExpression),
            });
        };

        if last.kind == TokenKind::OpenParen {
            return Err(match &self.dropped_sign {
                Some(sign) => dangling(sign),
                None => Error::new(vec![last.span.clone()], MismatchedBrackets { opening: true }),
            });
        }
        if last.kind.is_operator() {
            return Err(dangling(last));
        }

        for _ in self.open.drain(..) {
            self.output.push(Token {
                span: input_len..input_len,
                kind: TokenKind::CloseParen,
                lexeme: String::new(),
            });
        }
        Ok(self.output)
    }
}

fn dangling(token: &Token) -> Error {
    let operator = token.kind.operator_char()
        .or_else(|| token.lexeme.chars().next())
        .unwrap_or_default();
    Error::new(vec![token.span.clone()], DanglingOperator { operator })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input, 256).unwrap().into_iter().map(|token| token.kind).collect()
    }

    fn error(input: &str) -> Error {
        lex(input, 256).unwrap_err()
    }

    #[test]
    fn implied_multiplication() {
        use TokenKind::*;
        assert_eq!(kinds("2x"), vec![Number, Mul, Name]);
        assert_eq!(kinds("2(3)"), vec![Number, Mul, OpenParen, Number, CloseParen]);
        assert_eq!(kinds("(a)(b)"), vec![
            OpenParen, Name, CloseParen, Mul, OpenParen, Name, CloseParen,
        ]);
        assert_eq!(kinds("xy"), vec![Name, Mul, Name]);
        assert_eq!(kinds("x2"), vec![Name, Mul, Number]);
    }

    #[test]
    fn sign_folding() {
        use TokenKind::*;
        assert_eq!(kinds("5--3"), vec![Number, Add, Number]);
        assert_eq!(kinds("5+-3"), vec![Number, Sub, Number]);
        assert_eq!(kinds("5---3"), vec![Number, Sub, Number]);
        assert_eq!(kinds("+5"), vec![Number]);
        assert_eq!(kinds("--5"), vec![Number]);
        assert_eq!(kinds("-5"), vec![Sub, Number]);
        assert_eq!(kinds("2*+x"), vec![Number, Mul, Name]);
        assert_eq!(kinds("2^--x"), vec![Number, Exp, Name]);
        assert_eq!(kinds("2^-x"), vec![Number, Exp, Sub, Name]);
    }

    #[test]
    fn auto_close() {
        use TokenKind::*;
        assert_eq!(kinds("(x+(1"), vec![
            OpenParen, Name, Add, OpenParen, Number, CloseParen, CloseParen,
        ]);
    }

    #[test]
    fn illegal_character() {
        let err = error("2 + $");
        assert_eq!(err.spans, vec![4..5]);
        assert_eq!(err.downcast_ref::<IllegalCharacter>(), Some(&IllegalCharacter { symbol: '$' }));
    }

    #[test]
    fn malformed_numbers() {
        let err = error("1.2.3");
        assert_eq!(err.spans, vec![0..5]);
        assert!(err.is::<MalformedNumber>());

        assert!(error("2 + .").is::<MalformedNumber>());
    }

    #[test]
    fn brackets() {
        let err = error("x)");
        assert_eq!(err.downcast_ref::<MismatchedBrackets>(), Some(&MismatchedBrackets { opening: false }));

        let err = error("x(");
        assert_eq!(err.downcast_ref::<MismatchedBrackets>(), Some(&MismatchedBrackets { opening: true }));

        let err = error("2 + ( )");
        assert_eq!(err.spans, vec![4..7]);
        assert!(err.is::<EmptyBrackets>());
    }

    #[test]
    fn dangling_operators() {
        for input in ["*2", "2*", "2*/3", "(x+)", "x^", "+", "--", "2-"] {
            assert!(error(input).is::<DanglingOperator>(), "{:?}", input);
        }

        let err = error("3 + *4");
        assert_eq!(err.spans, vec![4..5]);
        assert_eq!(err.downcast_ref::<DanglingOperator>(), Some(&DanglingOperator { operator: '*' }));
    }

    #[test]
    fn folded_signs_inside_empty_brackets() {
        let err = error("(+)");
        assert_eq!(err.spans, vec![1..2]);
        assert_eq!(err.downcast_ref::<DanglingOperator>(), Some(&DanglingOperator { operator: '+' }));

        let err = error("2(--)");
        assert_eq!(err.spans, vec![2..4]);
        assert!(err.is::<DanglingOperator>());

        assert!(error("x(+").is::<DanglingOperator>());
        assert!(error("()").is::<EmptyBrackets>());
    }

    #[test]
    fn empty_expression() {
        assert!(error("").is::<EmptyExpression>());
        assert!(error("   ").is::<EmptyExpression>());
    }

    #[test]
    fn nesting_limit() {
        assert!(lex("((x))", 2).is_ok());
        let err = lex("(((x)))", 2).unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
        assert_eq!(err.downcast_ref::<NestingTooDeep>(), Some(&NestingTooDeep { max_depth: 2 }));
    }

    #[test]
    fn exponent_chains_count_toward_nesting() {
        assert!(lex("x^y^z", 2).is_ok());
        let err = lex("x^y^z^w", 2).unwrap_err();
        assert_eq!(err.spans, vec![5..6]);
        assert_eq!(err.downcast_ref::<NestingTooDeep>(), Some(&NestingTooDeep { max_depth: 2 }));

        // brackets and exponents share the limit
        assert!(lex("(x^y)", 2).is_ok());
        assert!(lex("(x^y^z)", 2).unwrap_err().is::<NestingTooDeep>());
        assert!(lex("x^(y^z)", 2).unwrap_err().is::<NestingTooDeep>());

        // any other operator ends the chain
        assert!(lex("x^y^z + a^b^c * d^e^f", 2).is_ok());
        assert!(lex("x^y^z a^b^c", 2).is_ok());
        assert!(lex("(x^y)^z", 2).is_ok());
    }

    #[test]
    fn long_exponent_chain() {
        let input = format!("{}x", "x^".repeat(200_000));
        let err = lex(&input, 256).unwrap_err();
        assert_eq!(err.downcast_ref::<NestingTooDeep>(), Some(&NestingTooDeep { max_depth: 256 }));
    }
}
