pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
///
/// The input is tokenized as-is. Whitespace in it will be reported as [`TokenKind::Symbol`]s; use
/// [`tokenize_complete`] to skip it.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns all of the tokens in the input, with whitespace removed.
///
/// Whitespace is removed **before** tokenizing, so it cannot separate two parts of the same
/// number: `1 2.5` is the single number `12.5`. Token spans still refer to the original input.
pub fn tokenize_complete(input: &str) -> Vec<Token> {
    // `offsets[i]` is the position in `input` of byte `i` of `stripped`
    let mut stripped = String::with_capacity(input.len());
    let mut offsets = Vec::with_capacity(input.len());
    for (idx, c) in input.char_indices() {
        if c.is_whitespace() {
            continue;
        }
        stripped.push(c);
        offsets.extend(idx..idx + c.len_utf8());
    }

    let mut lexer = tokenize(&stripped);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if span.is_empty() {
            continue;
        }

        tokens.push(Token {
            span: offsets[span.start]..offsets[span.end - 1] + 1,
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice().to_string(),
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str, std::ops::Range<usize>); N]) {
        let tokens = tokenize_complete(input);
        let actual = tokens.iter()
            .map(|token| (token.kind, token.lexeme.as_str(), token.span.clone()))
            .collect::<Vec<_>>();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1", 0..1),
                (TokenKind::Add, "+", 2..3),
                (TokenKind::Number, "2", 4..5),
            ],
        );
    }

    #[test]
    fn numbers() {
        compare_tokens(
            "3.25 + .5 - 7.",
            [
                (TokenKind::Number, "3.25", 0..4),
                (TokenKind::Add, "+", 5..6),
                (TokenKind::Number, ".5", 7..9),
                (TokenKind::Sub, "-", 10..11),
                (TokenKind::Number, "7.", 12..14),
            ],
        );
    }

    #[test]
    fn whitespace_inside_number() {
        compare_tokens(
            "1 000x",
            [
                (TokenKind::Number, "1000", 0..5),
                (TokenKind::Name, "x", 5..6),
            ],
        );
    }

    #[test]
    fn names_are_single_letters() {
        compare_tokens(
            "xy(é)",
            [
                (TokenKind::Name, "x", 0..1),
                (TokenKind::Name, "y", 1..2),
                (TokenKind::OpenParen, "(", 2..3),
                (TokenKind::Name, "é", 3..5),
                (TokenKind::CloseParen, ")", 5..6),
            ],
        );
    }

    #[test]
    fn symbols_and_dots() {
        compare_tokens(
            "2 $ .",
            [
                (TokenKind::Number, "2", 0..1),
                (TokenKind::Symbol, "$", 2..3),
                (TokenKind::Dot, ".", 4..5),
            ],
        );
    }
}
