//! The canonical representation of mathematical expressions.
//!
//! An [`Expr`] is always in **canonical form**: every composite node is built through one of the
//! smart constructors [`make_sum`], [`make_product`], and [`make_power`], which collect like
//! terms, combine coefficients and exponents, and collapse degenerate nodes into simpler ones. For
//! example, building the sum `x + x` produces the product `2x`, and building the product `x * 1`
//! produces just `x`. Because of this, two expressions that differ only in the order or grouping
//! of their terms are represented by the same value, and compare equal with [`PartialEq`].
//!
//! # Canonical equality
//!
//! Canonical equality is structural: two expressions are equal if they are the same kind of node
//! with equal children. For [`Sum`] and [`Product`], the entries are compared **in any order**,
//! and the constant / coefficient must be equal. The [`Hash`] implementations agree with this.
//!
//! Canonical equality is weaker than mathematical equality. `(x + 1)^2` and `x^2 + 2x + 1` are
//! mathematically equal, but their canonical forms differ, since the smart constructors never
//! expand powers of sums. [`Expr::simplify`] applies the exponent laws to bring more equivalent
//! expressions to the same form, but it does not attempt expansion or factoring either.
//!
//! # Entry order
//!
//! Sums and products keep their entries in a deterministic order, given by
//! [`ordering::sum_order`] and [`ordering::product_order`]. The order only affects iteration and
//! rendering; it has no algebraic meaning.

mod fmt;
mod iter;
pub mod ordering;
pub mod power;
pub mod product;
pub mod sum;

use canon_error::Error;
use crate::rational::Rational;
use iter::ExprIter;
use power::{make_power, Power};
use product::{make_product, Product};
use std::{collections::{hash_map::DefaultHasher, BTreeSet}, hash::{Hash, Hasher}};
use sum::{make_sum, Sign, Sum};

pub use fmt::FunctionForm;

/// A named variable, such as `x`.
///
/// Variables are ordered lexicographically by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Creates a new variable with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A mathematical expression in canonical form.
///
/// Composite nodes cannot be created directly. Use [`make_sum`], [`make_product`], and
/// [`make_power`], or the arithmetic methods on this type, which call them.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// An exact rational number, such as `3` or `-2/5`.
    Rational(Rational),

    /// A variable, such as `x`.
    Variable(Variable),

    /// Terms with rational coefficients added to a rational constant.
    Sum(Sum),

    /// Factors raised to exponents, multiplied by a rational coefficient.
    Product(Product),

    /// An expression raised to a power.
    Power(Power),
}

impl Expr {
    /// Returns the rational `0`.
    pub fn zero() -> Self {
        Self::Rational(Rational::zero())
    }

    /// Returns the rational `1`.
    pub fn one() -> Self {
        Self::Rational(Rational::one())
    }

    /// Returns the rational equal to the given integer.
    pub fn int<T>(n: T) -> Self
    where
        rug::Integer: From<T>,
    {
        Self::Rational(Rational::int(n))
    }

    /// Returns a variable with the given name.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(Variable::new(name))
    }

    /// Returns true if the expression is the rational `0`.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Rational(r) if r.is_zero())
    }

    /// Returns true if the expression is the rational `1`.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Rational(r) if r.is_one())
    }

    /// If the expression is a [`Expr::Rational`], returns a reference to the contained number.
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Rational(r) => Some(r),
            _ => None,
        }
    }

    /// If the expression is a [`Expr::Variable`], returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(v) => Some(v.name()),
            _ => None,
        }
    }

    /// Returns `self + rhs`.
    pub fn add(self, rhs: Self) -> Result<Self, Error> {
        make_sum(vec![(self, Sign::Positive), (rhs, Sign::Positive)])
    }

    /// Returns `self - rhs`.
    pub fn subtract(self, rhs: Self) -> Result<Self, Error> {
        make_sum(vec![(self, Sign::Positive), (rhs, Sign::Negative)])
    }

    /// Returns `self * rhs`.
    pub fn multiply(self, rhs: Self) -> Result<Self, Error> {
        make_product(vec![self, rhs], Vec::new())
    }

    /// Returns `self / rhs`.
    pub fn divide(self, rhs: Self) -> Result<Self, Error> {
        make_product(vec![self], vec![rhs])
    }

    /// Returns `-self`.
    pub fn negate(self) -> Result<Self, Error> {
        make_product(vec![self, Self::Rational(Rational::negative_one())], Vec::new())
    }

    /// Returns `1 / self`.
    pub fn reciprocal(self) -> Result<Self, Error> {
        make_product(Vec::new(), vec![self])
    }

    /// Returns `self ^ exponent`.
    pub fn pow(self, exponent: Self) -> Result<Self, Error> {
        make_power(self, exponent)
    }

    /// Returns the direct children of this expression, in entry order.
    ///
    /// The rational coefficient of a [`Product`] and the constant and coefficients of a [`Sum`]
    /// are not expressions, so they are not included.
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Rational(_) | Self::Variable(_) => Vec::new(),
            Self::Sum(sum) => sum.terms().iter().map(|(term, _)| term).collect(),
            Self::Product(product) => product.terms()
                .iter()
                .flat_map(|(base, exponent)| [base, exponent])
                .collect(),
            Self::Power(power) => vec![power.base(), power.exponent()],
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the names of all variables in the expression, in sorted order.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Self::as_variable)
            .collect()
    }
}

impl From<Rational> for Expr {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<Variable> for Expr {
    fn from(v: Variable) -> Self {
        Self::Variable(v)
    }
}

/// Returns true if both entry lists contain the same entries, in any order.
///
/// The keys of each list are unique, so comparing lengths and checking containment one way is
/// enough.
pub(crate) fn same_entries<K: PartialEq, V: PartialEq>(lhs: &[(K, V)], rhs: &[(K, V)]) -> bool {
    lhs.len() == rhs.len() && lhs.iter().all(|entry| rhs.contains(entry))
}

/// Hashes a list of entries independently of their order.
pub(crate) fn hash_entries<K: Hash, V: Hash, H: Hasher>(entries: &[(K, V)], state: &mut H) {
    let combined = entries.iter()
        .map(|entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add);
    entries.len().hash(state);
    combined.hash(state);
}
