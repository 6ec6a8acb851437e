//! Simplification of expressions with the exponent laws.
//!
//! The smart constructors already keep every expression in canonical form, but they never look
//! inside the base of a [`Power`](crate::Power). [`Expr::simplify`] does: a power of a product is
//! distributed over its factors, and a power of a power has its exponents multiplied. These two
//! rules are implemented in [`rules`].
//!
//! Simplification does not expand powers of sums or factor anything, so `(x + 1)^2` is already
//! simplified.

pub mod rules;

use canon_error::Error;
use crate::expr::{
    power::make_power,
    product::make_product,
    sum::{make_sum, Sign},
    Expr,
};
use tracing::debug;

impl Expr {
    /// Simplifies the expression by applying the exponent laws everywhere in it.
    ///
    /// Returns an error if rebuilding the expression performs an undefined operation. For
    /// example, `(0^x)^(-1/x)` can be built, but simplifies to `0^-1`.
    pub fn simplify(&self) -> Result<Expr, Error> {
        match self {
            Self::Rational(_) | Self::Variable(_) => Ok(self.clone()),
            Self::Power(power) => simplify_power(
                power.base().simplify()?,
                power.exponent().simplify()?,
            ),
            Self::Product(product) => {
                let mut factors = Vec::with_capacity(product.terms().len() + 1);
                factors.push(Self::Rational(product.coefficient().clone()));
                for (base, exponent) in product.terms() {
                    factors.push(simplify_power(base.simplify()?, exponent.simplify()?)?);
                }
                make_product(factors, Vec::new())
            },
            Self::Sum(sum) => {
                let mut terms = Vec::with_capacity(sum.terms().len() + 1);
                for (term, coefficient) in sum.terms() {
                    let scaled = make_product(
                        vec![term.simplify()?, Self::Rational(coefficient.clone())],
                        Vec::new(),
                    )?;
                    terms.push((scaled, Sign::Positive));
                }
                terms.push((Self::Rational(sum.constant().clone()), Sign::Positive));
                make_sum(terms)
            },
        }
    }
}

/// Builds `base^exponent` from an already simplified base and exponent, applying the exponent
/// laws to the base.
pub(crate) fn simplify_power(base: Expr, exponent: Expr) -> Result<Expr, Error> {
    match base {
        Expr::Product(product) => {
            debug!(%exponent, "distributing power over product");
            rules::distribute_power(&product, &exponent)
        },
        Expr::Power(power) => {
            debug!(%exponent, "multiplying exponents of nested power");
            let (base, exponent) = rules::power_of_power(power, exponent)?;
            simplify_power(base, exponent)
        },
        base => make_power(base, exponent),
    }
}
