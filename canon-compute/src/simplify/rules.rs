//! The exponent laws applied by [`Expr::simplify`](crate::Expr::simplify).

use canon_error::Error;
use crate::expr::{
    power::{make_power, Power},
    product::{make_product, Product},
    Expr,
};
use super::simplify_power;

/// `(c * a^m * b^n)^x = c^x * a^(m*x) * b^(n*x)`
///
/// The new exponents are simplified, and the exponent laws are applied again to each base.
pub fn distribute_power(product: &Product, exponent: &Expr) -> Result<Expr, Error> {
    let mut factors = Vec::with_capacity(product.terms().len() + 1);
    factors.push(make_power(Expr::Rational(product.coefficient().clone()), exponent.clone())?);
    for (base, inner_exponent) in product.terms() {
        let new_exponent = inner_exponent.clone().multiply(exponent.clone())?.simplify()?;
        factors.push(simplify_power(base.clone(), new_exponent)?);
    }
    make_product(factors, Vec::new())
}

/// `(b^x)^y = b^(x*y)`
///
/// Returns the base and the simplified new exponent.
pub fn power_of_power(power: Power, exponent: Expr) -> Result<(Expr, Expr), Error> {
    let (base, inner_exponent) = power.into_parts();
    let new_exponent = inner_exponent.multiply(exponent)?.simplify()?;
    Ok((base, new_exponent))
}
