//! Exact rational numbers.
//!
//! [`Rational`] wraps [`rug::Rational`], which already keeps its value normalized: the
//! denominator is always positive, the numerator and denominator share no common factor, and zero
//! is stored as `0/1`. This module adds the checked operations the expression engine needs, so
//! that a zero denominator is reported as an [`Error`] instead of a panic.

use canon_error::Error;
use crate::{
    consts::MAX_EVALUATED_EXPONENT,
    error::{DivisionByZero, MalformedNumber, UndefinedPower},
    expr::{power::Power, Expr},
};
use rug::{ops::Pow, Integer};
use std::cmp::Ordering;

/// An exact rational number in lowest terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rational(rug::Rational);

impl Rational {
    /// Creates the rational `numerator / denominator`, reduced to lowest terms.
    ///
    /// Returns [`DivisionByZero`] if the denominator is zero.
    pub fn new(numerator: Integer, denominator: Integer) -> Result<Self, Error> {
        if denominator.cmp0() == Ordering::Equal {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(rug::Rational::from((numerator, denominator))))
    }

    /// Creates a rational equal to the given integer.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self(rug::Rational::from(Integer::from(n)))
    }

    /// Returns `0`.
    pub fn zero() -> Self {
        Self::int(0)
    }

    /// Returns `1`.
    pub fn one() -> Self {
        Self::int(1)
    }

    /// Returns `2`.
    pub fn two() -> Self {
        Self::int(2)
    }

    /// Returns `10`.
    pub fn ten() -> Self {
        Self::int(10)
    }

    /// Returns `-1`.
    pub fn negative_one() -> Self {
        Self::int(-1)
    }

    /// The numerator. Carries the sign of the number.
    pub fn numerator(&self) -> &Integer {
        self.0.numer()
    }

    /// The denominator. Always positive.
    pub fn denominator(&self) -> &Integer {
        self.0.denom()
    }

    /// Returns a reference to the underlying [`rug::Rational`].
    pub fn as_rug(&self) -> &rug::Rational {
        &self.0
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Self(rug::Rational::from(&self.0 + &other.0))
    }

    /// Returns `self - other`.
    pub fn subtract(&self, other: &Self) -> Self {
        Self(rug::Rational::from(&self.0 - &other.0))
    }

    /// Returns `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self(rug::Rational::from(&self.0 * &other.0))
    }

    /// Divides this number by `other`, returning [`DivisionByZero`] if `other` is zero.
    pub fn divide(&self, other: &Self) -> Result<Self, Error> {
        if other.is_zero() {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(rug::Rational::from(&self.0 / &other.0)))
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self(rug::Rational::from(-&self.0))
    }

    /// Returns `1 / self`, or [`DivisionByZero`] if this number is zero.
    pub fn reciprocal(&self) -> Result<Self, Error> {
        if self.is_zero() {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Self(self.0.clone().recip()))
    }

    /// Returns the absolute value of this number.
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns `-1`, `0`, or `1` depending on the sign of this number.
    pub fn signum(&self) -> i32 {
        match self.0.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }

    pub fn is_one(&self) -> bool {
        self.0 == 1
    }

    pub fn is_negative(&self) -> bool {
        self.0.cmp0() == Ordering::Less
    }

    /// Returns true if the denominator is one.
    pub fn is_integer(&self) -> bool {
        *self.denominator() == 1
    }

    /// Returns true if this number is `1/n` or `-1/n` for some integer `n`.
    pub fn is_reciprocal_integer(&self) -> bool {
        *self.numerator().as_abs() == 1
    }

    /// Raises this number to the given exponent.
    ///
    /// Integer exponents whose magnitude is at most [`MAX_EVALUATED_EXPONENT`] produce an exact
    /// [`Expr::Rational`]. Any other exponent produces a symbolic [`Expr::Power`], since the result
    /// is either irrational or too large to be worth expanding.
    ///
    /// `0^e` is zero for positive `e`, and [`UndefinedPower`] otherwise.
    pub fn pow(&self, exponent: &Self) -> Result<Expr, Error> {
        if self.is_one() {
            return Ok(Expr::one());
        }

        if self.is_zero() {
            return match exponent.signum() {
                1 => Ok(Expr::zero()),
                signum => Err(Error::spanless(UndefinedPower { negative: signum < 0 })),
            };
        }

        if exponent.is_integer() {
            let magnitude = exponent.numerator().clone().abs();
            if let Some(k) = magnitude.to_u32().filter(|&k| k <= MAX_EVALUATED_EXPONENT) {
                let base = if exponent.is_negative() {
                    self.reciprocal()?
                } else {
                    self.clone()
                };
                return Ok(Expr::Rational(base.pow_u32(k)));
            }
        }

        Ok(Expr::Power(Power::new_unchecked(
            Expr::Rational(self.clone()),
            Expr::Rational(exponent.clone()),
        )))
    }

    /// Computes `numerator^k / denominator^k`, which is already in lowest terms.
    fn pow_u32(&self, k: u32) -> Self {
        let numerator = Integer::from(self.numerator().pow(k));
        let denominator = Integer::from(self.denominator().pow(k));
        Self(rug::Rational::from((numerator, denominator)))
    }

    /// Parses a number literal of the form `int.frac` or `int.frac/int.frac`.
    ///
    /// Either side of the `/` may carry a leading sign, and either the integer or fractional part
    /// of a side may be empty (but not both). Both sides are scaled to the same number of decimal
    /// places before the fraction is reduced, so `1.5/0.25` is `6`.
    pub fn parse_number(text: &str) -> Result<Self, Error> {
        let malformed = || Error::spanless(MalformedNumber { text: text.to_string() });

        let mut parts = text.split('/');
        let numerator = parts.next()
            .and_then(Decimal::parse)
            .ok_or_else(malformed)?;
        let denominator = parts.next()
            .map(|part| Decimal::parse(part).ok_or_else(malformed))
            .transpose()?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        match denominator {
            Some(denominator) => {
                let scale = numerator.scale.max(denominator.scale);
                Self::new(
                    numerator.digits * pow10(scale - numerator.scale),
                    denominator.digits * pow10(scale - denominator.scale),
                )
            },
            None => Self::new(numerator.digits, pow10(numerator.scale)),
        }
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self(rug::Rational::from(n))
    }
}

/// One side of a number literal, as an integer with `scale` implied decimal places.
struct Decimal {
    digits: Integer,
    scale: u32,
}

impl Decimal {
    fn parse(part: &str) -> Option<Self> {
        let (negative, unsigned) = match part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, part.strip_prefix('+').unwrap_or(part)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut digits = Integer::from_str_radix(&format!("{}{}", whole, fraction), 10).ok()?;
        if negative {
            digits = -digits;
        }
        Some(Self {
            digits,
            scale: u32::try_from(fraction.len()).ok()?,
        })
    }
}

/// Returns `10^k`.
fn pow10(k: u32) -> Integer {
    Integer::from(Integer::u_pow_u(10, k))
}
