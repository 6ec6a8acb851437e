//! Text rendering of expressions.
//!
//! The [`Display`] form can be parsed back into an equal expression. Factors of a product are
//! written next to each other (`2xy^2`), with a `*` between them only where two numbers would
//! otherwise run together (`3*2^(1/2)`).

use crate::rational::Rational;
use std::fmt::{self, Display, Formatter};
use super::{power::Power, product::Product, sum::Sum, Expr, Variable};

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) => write!(f, "{}", r),
            Self::Variable(v) => write!(f, "{}", v),
            Self::Sum(sum) => write!(f, "{}", sum),
            Self::Product(product) => write!(f, "{}", product),
            Self::Power(power) => write!(f, "{}", power),
        }
    }
}

impl Display for Power {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", power_string(self.base(), self.exponent()))
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = coefficient_string(self.coefficient(), true);
        for (base, exponent) in self.terms() {
            push_factor(&mut out, &power_string(base, exponent));
        }
        write!(f, "{}", out)
    }
}

impl Display for Sum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (term, coefficient) in self.terms() {
            if coefficient.is_negative() {
                out.push('-');
            } else if !out.is_empty() {
                out.push('+');
            }

            let mut rendered = coefficient_string(&coefficient.abs(), false);
            let term = match term {
                Expr::Sum(_) => format!("({})", term),
                _ => term.to_string(),
            };
            push_factor(&mut rendered, &term);
            out.push_str(&rendered);
        }

        let constant = self.constant();
        if constant.is_negative() {
            out.push('-');
            out.push_str(&constant.abs().to_string());
        } else if !constant.is_zero() {
            if !out.is_empty() {
                out.push('+');
            }
            out.push_str(&constant.to_string());
        }

        write!(f, "{}", out)
    }
}

/// Renders the coefficient that precedes the factors of a product.
///
/// One is omitted, and so is the `1` of minus one if `signed` is true. Fractions are followed by
/// a `*`, so that `1/2*x` does not read as `1/(2x)`.
fn coefficient_string(coefficient: &Rational, signed: bool) -> String {
    if coefficient.is_one() {
        String::new()
    } else if signed && *coefficient == Rational::negative_one() {
        String::from("-")
    } else if coefficient.is_integer() {
        coefficient.to_string()
    } else {
        format!("{}*", coefficient)
    }
}

/// Appends a factor to a product, separating it with `*` if two digits would touch.
fn push_factor(out: &mut String, factor: &str) {
    let digits_touch = out.ends_with(|c: char| c.is_ascii_digit())
        && factor.starts_with(|c: char| c.is_ascii_digit());
    if digits_touch {
        out.push('*');
    }
    out.push_str(factor);
}

/// Renders `base^exponent` as a factor of a product.
fn power_string(base: &Expr, exponent: &Expr) -> String {
    let bare_base = match base {
        Expr::Variable(_) => true,
        Expr::Rational(r) => r.is_integer() && !r.is_negative(),
        _ => false,
    };

    if exponent.is_one() {
        return match base {
            Expr::Sum(_) | Expr::Product(_) => format!("({})", base),
            _ if bare_base => base.to_string(),
            _ => format!("({})", base),
        };
    }

    let bare_exponent = match exponent {
        Expr::Variable(_) => true,
        Expr::Rational(r) => r.is_integer(),
        _ => false,
    };

    let mut out = String::new();
    if bare_base {
        out.push_str(&base.to_string());
    } else {
        out.push_str(&format!("({})", base));
    }
    out.push('^');
    if bare_exponent {
        out.push_str(&exponent.to_string());
    } else {
        out.push_str(&format!("({})", exponent));
    }
    out
}

/// Renders an expression as a tree of node constructors, such as `Sum(x:"2", "1")`.
///
/// Rationals are quoted. This form shows how an expression is stored, rather than what it
/// means, and cannot be parsed back. It is created by [`Expr::function_form`].
pub struct FunctionForm<'a>(&'a Expr);

impl Expr {
    /// Returns a value that renders this expression as a tree of node constructors.
    pub fn function_form(&self) -> FunctionForm<'_> {
        FunctionForm(self)
    }
}

impl Display for FunctionForm<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Rational(r) => write!(f, "\"{}\"", r),
            Expr::Variable(v) => write!(f, "{}", v),
            Expr::Power(power) => write!(
                f,
                "Power({}, {})",
                power.base().function_form(),
                power.exponent().function_form(),
            ),
            Expr::Product(product) => {
                write!(f, "Product(\"{}\"", product.coefficient())?;
                for (base, exponent) in product.terms() {
                    write!(f, ", {}:{}", base.function_form(), exponent.function_form())?;
                }
                write!(f, ")")
            },
            Expr::Sum(sum) => {
                write!(f, "Sum(")?;
                for (term, coefficient) in sum.terms() {
                    write!(f, "{}:\"{}\", ", term.function_form(), coefficient)?;
                }
                write!(f, "\"{}\")", sum.constant())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::variable("x")
    }

    fn y() -> Expr {
        Expr::variable("y")
    }

    fn frac(text: &str) -> Expr {
        Expr::Rational(Rational::parse_number(text).unwrap())
    }

    #[test]
    fn rationals() {
        assert_eq!(Expr::int(-7).to_string(), "-7");
        assert_eq!(frac("6/8").to_string(), "3/4");
    }

    #[test]
    fn powers() {
        assert_eq!(x().pow(Expr::int(2)).unwrap().to_string(), "x^2");
        assert_eq!(x().pow(Expr::int(-1)).unwrap().to_string(), "x^-1");
        assert_eq!(x().pow(frac("1/2")).unwrap().to_string(), "x^(1/2)");
        assert_eq!(Expr::int(2).pow(frac("1/2")).unwrap().to_string(), "2^(1/2)");
        assert_eq!(Expr::int(-2).pow(frac("1/3")).unwrap().to_string(), "(-2)^(1/3)");

        let sum = x().add(Expr::one()).unwrap();
        assert_eq!(sum.pow(y()).unwrap().to_string(), "(x+1)^y");
    }

    #[test]
    fn products() {
        let product = Expr::int(2).multiply(x()).unwrap().multiply(y()).unwrap();
        assert_eq!(product.to_string(), "2xy");

        let product = x().negate().unwrap();
        assert_eq!(product.to_string(), "-x");

        let product = x().divide(Expr::int(2)).unwrap();
        assert_eq!(product.to_string(), "1/2*x");

        let root = Expr::int(2).pow(frac("1/2")).unwrap();
        assert_eq!(Expr::int(3).multiply(root).unwrap().to_string(), "3*2^(1/2)");
    }

    #[test]
    fn sums() {
        let sum = x().add(Expr::int(3)).unwrap();
        assert_eq!(sum.to_string(), "x+3");

        let sum = Expr::int(-3).subtract(x()).unwrap();
        assert_eq!(sum.to_string(), "-x-3");

        let sum = x().pow(Expr::int(2)).unwrap()
            .subtract(Expr::int(2).multiply(y()).unwrap())
            .unwrap()
            .add(frac("1/2"))
            .unwrap();
        assert_eq!(sum.to_string(), "x^2-2y+1/2");
    }

    #[test]
    fn function_form() {
        let sum = Expr::int(2).multiply(x()).unwrap().add(Expr::one()).unwrap();
        assert_eq!(sum.function_form().to_string(), "Sum(x:\"2\", \"1\")");

        let product = Expr::int(3).multiply(x().pow(y()).unwrap()).unwrap();
        assert_eq!(product.function_form().to_string(), "Product(\"3\", x:y)");
    }
}
