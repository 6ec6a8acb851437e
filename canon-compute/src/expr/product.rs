//! Products, and the smart constructor that builds them.
//!
//! A [`Product`] maps each base to the exponent it is raised to, and multiplies the result by a
//! rational coefficient. `3x^2y` is stored as the coefficient `3` with the entries `x -> 2` and
//! `y -> 1`. Exponents are arbitrary expressions, so `x^y * x` is stored as `x -> y + 1`.

use canon_error::Error;
use crate::rational::Rational;
use std::hash::{Hash, Hasher};
use tracing::trace;
use super::{
    hash_entries,
    ordering::{product_order, TermMap},
    power::make_power,
    same_entries,
    sum::{make_sum, Sign},
    Expr,
};

/// A product of factors, each raised to an exponent, multiplied by a rational coefficient.
///
/// Build products with [`make_product`], which returns a simpler expression when one exists.
#[derive(Debug, Clone)]
pub struct Product {
    coefficient: Rational,
    terms: Vec<(Expr, Expr)>,
}

impl Product {
    /// The rational coefficient of the product. Never zero.
    pub fn coefficient(&self) -> &Rational {
        &self.coefficient
    }

    /// The `(base, exponent)` entries of the product, in canonical order. Never empty, and no
    /// exponent is zero.
    pub fn terms(&self) -> &[(Expr, Expr)] {
        &self.terms
    }

    /// Returns the product with its coefficient replaced by one.
    ///
    /// For `3x^2y`, this is `x^2y`. For `5x`, this is just `x`.
    pub fn without_coefficient(&self) -> Result<Expr, Error> {
        collapse(Rational::one(), self.terms.clone())
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && same_entries(&self.terms, &other.terms)
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coefficient.hash(state);
        hash_entries(&self.terms, state);
    }
}

/// Builds the product of `factors` divided by the product of `divisors`, in canonical form.
///
/// - Rational factors and divisors are multiplied into, or divided out of, the coefficient.
/// - A [`Power`](super::Power) contributes its base, with its exponent added (or subtracted for a
/// divisor).
/// - A [`Product`] is flattened: its coefficient and each of its entries are folded in.
/// - Any other expression contributes itself with exponent `1` (or `-1`).
///
/// Entries with the same base have their exponents summed, and entries whose exponent becomes
/// zero are dropped. Rational bases raised to an integer exponent are folded into the
/// coefficient.
///
/// A [`Product`] base whose exponents sum to one is multiplied back in as an ordinary factor, so
/// `(xy)^z * (xy)^(1 - z)` is `xy`.
///
/// The result collapses to a simpler form when possible: a zero coefficient gives `0`, no
/// remaining entries give the coefficient, a rational multiple of a sum gives the scaled sum, and
/// a single entry with coefficient one gives that entry as a power.
///
/// Returns [`DivisionByZero`](crate::error::DivisionByZero) if a divisor is zero.
pub fn make_product(factors: Vec<Expr>, divisors: Vec<Expr>) -> Result<Expr, Error> {
    trace!(factors = factors.len(), divisors = divisors.len(), "building product");

    let mut builder = ProductBuilder::new();
    for factor in factors {
        builder.absorb(factor, Sign::Positive)?;
    }
    for divisor in divisors {
        builder.absorb(divisor, Sign::Negative)?;
    }
    builder.finish()
}

struct ProductBuilder {
    coefficient: Rational,
    terms: TermMap<Expr>,
}

impl ProductBuilder {
    fn new() -> Self {
        Self {
            coefficient: Rational::one(),
            terms: TermMap::new(product_order, Expr::is_zero),
        }
    }

    fn scale(&mut self, by: &Rational, sign: Sign) -> Result<(), Error> {
        self.coefficient = match sign {
            Sign::Positive => self.coefficient.multiply(by),
            Sign::Negative => self.coefficient.divide(by)?,
        };
        Ok(())
    }

    fn absorb(&mut self, expr: Expr, sign: Sign) -> Result<(), Error> {
        match expr {
            Expr::Rational(r) => self.scale(&r, sign),
            Expr::Product(product) => {
                self.scale(&product.coefficient, sign)?;
                for (base, exponent) in product.terms {
                    self.raise(base, exponent, sign)?;
                }
                Ok(())
            },
            Expr::Power(power) => {
                let (base, exponent) = power.into_parts();
                self.raise(base, exponent, sign)
            },
            other => self.raise(other, Expr::one(), sign),
        }
    }

    /// Adds `exponent` to the exponent of `base`, or subtracts it if `sign` is negative.
    fn raise(&mut self, base: Expr, exponent: Expr, sign: Sign) -> Result<(), Error> {
        let exponent = match sign {
            Sign::Positive => exponent,
            Sign::Negative => exponent.negate()?,
        };
        self.terms.accumulate(base, exponent, |old, new| {
            make_sum(vec![(old.clone(), Sign::Positive), (new, Sign::Positive)])
        })
    }

    fn finish(self) -> Result<Expr, Error> {
        let mut coefficient = self.coefficient;
        if coefficient.is_zero() {
            return Ok(Expr::zero());
        }

        let mut terms = Vec::new();
        let mut unit_products = Vec::new();
        for (base, exponent) in self.terms.into_entries() {
            match (base, exponent) {
                (Expr::Rational(b), Expr::Rational(e)) => match b.pow(&e)? {
                    Expr::Rational(value) => coefficient = coefficient.multiply(&value),
                    _ => terms.push((Expr::Rational(b), Expr::Rational(e))),
                },
                (Expr::Product(product), exponent) if exponent.is_one() => {
                    unit_products.push(Expr::Product(product));
                },
                entry => terms.push(entry),
            }
        }

        // a product base whose exponents summed to one is an ordinary factor again
        if !unit_products.is_empty() {
            trace!(count = unit_products.len(), "merging product bases back in");
            let mut builder = ProductBuilder::new();
            builder.coefficient = coefficient;
            for (base, exponent) in terms {
                builder.raise(base, exponent, Sign::Positive)?;
            }
            for product in unit_products {
                builder.absorb(product, Sign::Positive)?;
            }
            return builder.finish();
        }

        collapse(coefficient, terms)
    }
}

/// Returns the simplest expression equal to the product of the given coefficient and entries.
///
/// A rational multiple of a single sum is distributed into the sum, so that `2(x + 1)` and
/// `2x + 2` have the same form.
fn collapse(coefficient: Rational, mut terms: Vec<(Expr, Expr)>) -> Result<Expr, Error> {
    if coefficient.is_zero() {
        return Ok(Expr::zero());
    }

    if terms.is_empty() {
        return Ok(Expr::Rational(coefficient));
    }

    if let [(Expr::Sum(sum), exponent)] = terms.as_slice() {
        if exponent.is_one() {
            return Ok(Expr::Sum(sum.scale(&coefficient)));
        }
    }

    if coefficient.is_one() && terms.len() == 1 {
        if let Some((base, exponent)) = terms.pop() {
            return make_power(base, exponent);
        }
    }

    Ok(Expr::Product(Product { coefficient, terms }))
}
