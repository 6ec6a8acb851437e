use canon_compute::Expr;
use crate::tokenizer::TokenKind;
use std::ops::Range;

/// An element of a group while it is being parsed: either an expression that has already been
/// built, or an operator that has not been applied yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Expr(Expr, Range<usize>),
    Op(TokenKind, Range<usize>),
}

impl Item {
    /// The region of the source code covered by this item.
    pub fn span(&self) -> &Range<usize> {
        match self {
            Self::Expr(_, span) | Self::Op(_, span) => span,
        }
    }

    /// Returns true if this item is the given operator.
    pub fn is_op(&self, kind: TokenKind) -> bool {
        matches!(self, Self::Op(op, _) if *op == kind)
    }
}
