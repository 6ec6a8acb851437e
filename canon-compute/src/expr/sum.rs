//! Sums, and the smart constructor that builds them.
//!
//! A [`Sum`] maps each term to its rational coefficient, and adds a rational constant. `3x + y - 2`
//! is stored as the entries `x -> 3` and `y -> 1` with the constant `-2`.

use canon_error::Error;
use crate::rational::Rational;
use std::hash::{Hash, Hasher};
use tracing::trace;
use super::{
    hash_entries,
    ordering::{sum_order, TermMap},
    product::make_product,
    same_entries,
    Expr,
};

/// The sign an expression is added or multiplied with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Applies this sign to a rational.
    pub fn apply(self, r: &Rational) -> Rational {
        match self {
            Self::Positive => r.clone(),
            Self::Negative => r.negate(),
        }
    }
}

/// A sum of terms, each multiplied by a rational coefficient, plus a rational constant.
///
/// Build sums with [`make_sum`], which returns a simpler expression when one exists.
#[derive(Debug, Clone)]
pub struct Sum {
    terms: Vec<(Expr, Rational)>,
    constant: Rational,
}

impl Sum {
    /// The `(term, coefficient)` entries of the sum, in canonical order. Never empty, and no
    /// coefficient is zero.
    pub fn terms(&self) -> &[(Expr, Rational)] {
        &self.terms
    }

    /// The rational constant added to the terms. May be zero.
    pub fn constant(&self) -> &Rational {
        &self.constant
    }

    /// Multiplies the constant and every coefficient by `factor`, which must not be zero.
    pub(crate) fn scale(&self, factor: &Rational) -> Sum {
        Sum {
            terms: self.terms.iter()
                .map(|(term, coefficient)| (term.clone(), coefficient.multiply(factor)))
                .collect(),
            constant: self.constant.multiply(factor),
        }
    }
}

impl PartialEq for Sum {
    fn eq(&self, other: &Self) -> bool {
        self.constant == other.constant && same_entries(&self.terms, &other.terms)
    }
}

impl Eq for Sum {}

impl Hash for Sum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.constant.hash(state);
        hash_entries(&self.terms, state);
    }
}

/// Builds the sum of the given signed terms, in canonical form.
///
/// - Rationals are added to the constant.
/// - A [`Sum`] is flattened: its constant and each of its entries are added in.
/// - A [`Product`](super::Product) is split into its coefficient and the rest of the product,
/// which becomes the term. If the rest is itself a sum, it is flattened with every coefficient
/// scaled.
/// - Any other expression is a term with coefficient `1` (or `-1`).
///
/// Entries with the same term have their coefficients summed, and entries whose coefficient
/// becomes zero are dropped.
///
/// The result collapses to a simpler form when possible: no remaining entries give the constant,
/// and a single entry with no constant gives the term multiplied by its coefficient.
pub fn make_sum(terms: Vec<(Expr, Sign)>) -> Result<Expr, Error> {
    trace!(terms = terms.len(), "building sum");

    let mut builder = SumBuilder::new();
    for (term, sign) in terms {
        builder.absorb(term, sign)?;
    }
    builder.finish()
}

struct SumBuilder {
    constant: Rational,
    terms: TermMap<Rational>,
}

impl SumBuilder {
    fn new() -> Self {
        Self {
            constant: Rational::zero(),
            terms: TermMap::new(sum_order, Rational::is_zero),
        }
    }

    fn absorb(&mut self, expr: Expr, sign: Sign) -> Result<(), Error> {
        match expr {
            Expr::Rational(r) => {
                self.constant = self.constant.add(&sign.apply(&r));
                Ok(())
            },
            Expr::Sum(sum) => {
                self.constant = self.constant.add(&sign.apply(&sum.constant));
                for (term, coefficient) in sum.terms {
                    self.collect(term, sign.apply(&coefficient))?;
                }
                Ok(())
            },
            Expr::Product(product) => {
                let coefficient = sign.apply(product.coefficient());
                match product.without_coefficient()? {
                    Expr::Rational(r) => {
                        self.constant = self.constant.add(&coefficient.multiply(&r));
                        Ok(())
                    },
                    Expr::Sum(sum) => {
                        self.constant = self.constant.add(&coefficient.multiply(&sum.constant));
                        for (term, inner) in sum.terms {
                            self.collect(term, coefficient.multiply(&inner))?;
                        }
                        Ok(())
                    },
                    term => self.collect(term, coefficient),
                }
            },
            other => self.collect(other, sign.apply(&Rational::one())),
        }
    }

    fn collect(&mut self, term: Expr, coefficient: Rational) -> Result<(), Error> {
        self.terms.accumulate(term, coefficient, |old, new| Ok(old.add(&new)))
    }

    fn finish(self) -> Result<Expr, Error> {
        let constant = self.constant;
        let mut terms = self.terms.into_entries();

        if terms.is_empty() {
            return Ok(Expr::Rational(constant));
        }

        if constant.is_zero() && terms.len() == 1 {
            if let Some((term, coefficient)) = terms.pop() {
                return make_product(vec![term, Expr::Rational(coefficient)], Vec::new());
            }
        }

        Ok(Expr::Sum(Sum { terms, constant }))
    }
}
