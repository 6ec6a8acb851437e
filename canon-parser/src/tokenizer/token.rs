use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// A single letter. Each letter is its own variable, so `xy` is `x * y`.
    #[regex(r"\p{L}")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+")]
    Number,

    /// A decimal point with no digits on either side.
    #[token(".")]
    Dot,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token ends an operand: a number, a name, or a closing parenthesis.
    pub fn is_value(self) -> bool {
        matches!(self, Self::Number | Self::Name | Self::CloseParen)
    }

    /// Returns true if the token is one of the binary operators `+ - * / ^`.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Exp)
    }

    /// Returns the character of an operator token.
    pub fn operator_char(self) -> Option<char> {
        match self {
            Self::Add => Some('+'),
            Self::Sub => Some('-'),
            Self::Mul => Some('*'),
            Self::Div => Some('/'),
            Self::Exp => Some('^'),
            _ => None,
        }
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The region of the source code that this token originated from.
    ///
    /// Whitespace is removed before tokenizing, so a number written as `1 000` is one token whose
    /// span covers the space.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token, without whitespace.
    pub lexeme: String,
}
