//! Substituting values for variables.

use canon_error::Error;
use crate::{
    error::UnboundVariable,
    expr::{power::make_power, product::make_product, sum::{make_sum, Sign}, Expr},
};
use std::collections::HashMap;
use tracing::debug;

impl Expr {
    /// Substitutes the given values for the variables of this expression.
    ///
    /// Every composite node is rebuilt from its evaluated children through the smart
    /// constructors, so the result is in canonical form. If every variable is bound to a
    /// rational, the result is a single [`Expr::Rational`].
    ///
    /// If a name is bound more than once, the first binding is used. Returns [`UnboundVariable`]
    /// if the expression contains a variable with no binding, and any error raised while
    /// rebuilding, such as a division by zero.
    pub fn evaluate<S: AsRef<str>>(&self, bindings: &[(S, Expr)]) -> Result<Expr, Error> {
        let mut values = HashMap::new();
        for (name, value) in bindings {
            values.entry(name.as_ref()).or_insert(value);
        }

        debug!(bindings = values.len(), "evaluating expression");
        self.substitute(&values)
    }

    /// Evaluates an expression that contains no variables.
    pub fn evaluate_constant(&self) -> Result<Expr, Error> {
        self.evaluate::<&str>(&[])
    }

    fn substitute(&self, values: &HashMap<&str, &Expr>) -> Result<Expr, Error> {
        match self {
            Self::Rational(_) => Ok(self.clone()),
            Self::Variable(var) => values.get(var.name())
                .map(|&value| value.clone())
                .ok_or_else(|| Error::spanless(UnboundVariable { name: var.name().to_string() })),
            Self::Power(power) => make_power(
                power.base().substitute(values)?,
                power.exponent().substitute(values)?,
            ),
            Self::Product(product) => {
                let mut factors = Vec::with_capacity(product.terms().len() + 1);
                factors.push(Self::Rational(product.coefficient().clone()));
                for (base, exponent) in product.terms() {
                    factors.push(make_power(base.substitute(values)?, exponent.substitute(values)?)?);
                }
                make_product(factors, Vec::new())
            },
            Self::Sum(sum) => {
                let mut terms = Vec::with_capacity(sum.terms().len() + 1);
                for (term, coefficient) in sum.terms() {
                    let scaled = make_product(
                        vec![term.substitute(values)?, Self::Rational(coefficient.clone())],
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
