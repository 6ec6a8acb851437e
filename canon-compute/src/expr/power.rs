//! Powers, and the smart constructor that builds them.

use canon_error::Error;
use tracing::trace;
use super::Expr;

/// An expression raised to a power, `base^exponent`.
///
/// Build powers with [`make_power`], which returns a simpler expression when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Power {
    base: Box<Expr>,
    exponent: Box<Expr>,
}

impl Power {
    /// Creates a power node without checking for simpler forms.
    pub(crate) fn new_unchecked(base: Expr, exponent: Expr) -> Self {
        Self {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    /// The base of the power.
    pub fn base(&self) -> &Expr {
        &self.base
    }

    /// The exponent of the power.
    pub fn exponent(&self) -> &Expr {
        &self.exponent
    }

    /// Returns the base and exponent.
    pub fn into_parts(self) -> (Expr, Expr) {
        (*self.base, *self.exponent)
    }
}

/// Builds `base^exponent` in canonical form.
///
/// - If both are rational, the power is computed with [`Rational::pow`], which evaluates integer
/// exponents and reports `0^0` and `0^-n` as errors.
/// - If the base is one or the exponent is zero, the result is one.
/// - If the exponent is one, the result is the base.
///
/// Otherwise, the result is a [`Power`]. A power whose base is itself a power or a product is
/// left alone; [`Expr::simplify`] applies the exponent laws to those.
///
/// [`Rational::pow`]: crate::Rational::pow
pub fn make_power(base: Expr, exponent: Expr) -> Result<Expr, Error> {
    if let (Expr::Rational(base), Expr::Rational(exponent)) = (&base, &exponent) {
        return base.pow(exponent);
    }

    if base.is_one() || exponent.is_zero() {
        trace!("power collapsed to one");
        return Ok(Expr::one());
    }

    if exponent.is_one() {
        return Ok(base);
    }

    Ok(Expr::Power(Power::new_unchecked(base, exponent)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{error::UndefinedPower, Rational};
    use super::*;

    #[test]
    fn exponent_one() {
        let x = Expr::variable("x");
        assert_eq!(make_power(x.clone(), Expr::one()).unwrap(), x);
    }

    #[test]
    fn trivial_powers() {
        let x = Expr::variable("x");
        assert_eq!(make_power(x.clone(), Expr::zero()).unwrap(), Expr::one());
        assert_eq!(make_power(Expr::one(), x.clone()).unwrap(), Expr::one());
        assert_eq!(make_power(Expr::int(3), Expr::int(4)).unwrap(), Expr::int(81));
    }

    #[test]
    fn undefined_powers() {
        assert!(make_power(Expr::zero(), Expr::zero()).unwrap_err().is::<UndefinedPower>());
        assert!(make_power(Expr::zero(), Expr::int(-2)).unwrap_err().is::<UndefinedPower>());
    }

    #[test]
    fn symbolic_power() {
        let x = Expr::variable("x");
        let half = Expr::Rational(Rational::parse_number("1/2").unwrap());

        let Expr::Power(power) = make_power(x.clone(), half.clone()).unwrap() else {
            panic!("expected a power");
        };
        assert_eq!(power.base(), &x);
        assert_eq!(power.exponent(), &half);
        assert_eq!(power.into_parts(), (x, half));
    }
}
