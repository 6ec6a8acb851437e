//! Orderings that keep the entries of sums and products deterministic.
//!
//! [`Sum`](super::Sum) and [`Product`](super::Product) store their entries in insertion order
//! refined by one of the comparators below. Each comparator first sorts nodes into tiers by kind,
//! then orders variables by name. Any other pair of nodes in the same tier compares
//! [`Ordering::Equal`] if the nodes are equal, and [`Ordering::Greater`] otherwise, so a new entry
//! is placed after the existing entries of its tier.
//!
//! The tiers differ between the two comparators. A product lists its numeric bases first, while a
//! sum lists powers first and rationals last.

use canon_error::Error;
use std::cmp::Ordering;
use super::Expr;

/// A comparator used to order the entries of a sum or product.
pub type Order = fn(&Expr, &Expr) -> Ordering;

/// The tier of an expression among the factors of a product.
fn product_tier(expr: &Expr) -> u8 {
    match expr {
        Expr::Rational(_) => 0,
        Expr::Variable(_) => 1,
        Expr::Product(_) => 2,
        Expr::Power(_) => 3,
        Expr::Sum(_) => 4,
    }
}

/// The tier of an expression among the terms of a sum.
fn sum_tier(expr: &Expr) -> u8 {
    match expr {
        Expr::Power(_) => 1,
        Expr::Product(_) => 2,
        Expr::Variable(_) => 3,
        Expr::Sum(_) => 4,
        Expr::Rational(_) => 5,
    }
}

fn compare_in_tiers(tier: fn(&Expr) -> u8, lhs: &Expr, rhs: &Expr) -> Ordering {
    tier(lhs).cmp(&tier(rhs)).then_with(|| match (lhs, rhs) {
        (Expr::Variable(lhs), Expr::Variable(rhs)) => lhs.cmp(rhs),
        _ if lhs == rhs => Ordering::Equal,
        _ => Ordering::Greater,
    })
}

/// Orders the bases of a product.
///
/// Tiers: rationals, variables, products, powers, sums.
pub fn product_order(lhs: &Expr, rhs: &Expr) -> Ordering {
    compare_in_tiers(product_tier, lhs, rhs)
}

/// Orders the terms of a sum.
///
/// Tiers: powers, products, variables, sums, rationals.
pub fn sum_order(lhs: &Expr, rhs: &Expr) -> Ordering {
    compare_in_tiers(sum_tier, lhs, rhs)
}

/// An ordered map from expressions to values, used while a sum or product is being built.
///
/// Entries whose value becomes zero are removed as soon as that happens.
pub(crate) struct TermMap<V> {
    entries: Vec<(Expr, V)>,
    order: Order,
    is_zero: fn(&V) -> bool,
}

impl<V> TermMap<V> {
    /// Creates an empty map using the given order, removing values for which `is_zero` is true.
    pub fn new(order: Order, is_zero: fn(&V) -> bool) -> Self {
        Self { entries: Vec::new(), order, is_zero }
    }

    /// Adds `value` to the entry for `key`, combining it with the existing value using `combine`.
    pub fn accumulate(
        &mut self,
        key: Expr,
        value: V,
        combine: impl FnOnce(&V, V) -> Result<V, Error>,
    ) -> Result<(), Error> {
        let order = self.order;
        match self.entries.iter().position(|(existing, _)| order(&key, existing) == Ordering::Equal) {
            Some(idx) => {
                let combined = combine(&self.entries[idx].1, value)?;
                if (self.is_zero)(&combined) {
                    self.entries.remove(idx);
                } else {
                    self.entries[idx].1 = combined;
                }
            },
            None if (self.is_zero)(&value) => {},
            None => {
                let idx = self.entries.iter()
                    .position(|(existing, _)| order(&key, existing) == Ordering::Less)
                    .unwrap_or(self.entries.len());
                self.entries.insert(idx, (key, value));
            },
        }
        Ok(())
    }

    /// Returns the entries in order.
    pub fn into_entries(self) -> Vec<(Expr, V)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::rational::Rational;
    use super::*;

    fn add(old: &Rational, new: Rational) -> Result<Rational, Error> {
        Ok(old.add(&new))
    }

    #[test]
    fn tiers() {
        let x = Expr::variable("x");
        let two = Expr::int(2);
        let power = x.clone().pow(Expr::variable("y")).unwrap();

        assert_eq!(product_order(&two, &x), Ordering::Less);
        assert_eq!(product_order(&power, &x), Ordering::Greater);
        assert_eq!(sum_order(&two, &x), Ordering::Greater);
        assert_eq!(sum_order(&power, &x), Ordering::Less);
    }

    #[test]
    fn variables_by_name() {
        let a = Expr::variable("a");
        let b = Expr::variable("b");
        assert_eq!(sum_order(&a, &b), Ordering::Less);
        assert_eq!(product_order(&b, &a), Ordering::Greater);
        assert_eq!(product_order(&a, &a.clone()), Ordering::Equal);
    }

    #[test]
    fn same_tier_keeps_insertion_order() {
        let first = Expr::variable("x").pow(Expr::int(2)).unwrap();
        let second = Expr::variable("a").pow(Expr::int(2)).unwrap();
        assert_eq!(sum_order(&second, &first), Ordering::Greater);
        assert_eq!(sum_order(&first, &second), Ordering::Greater);
        assert_eq!(sum_order(&first, &first.clone()), Ordering::Equal);
    }

    #[test]
    fn term_map_collects_and_removes() {
        let mut map = TermMap::new(sum_order, Rational::is_zero);
        map.accumulate(Expr::variable("y"), Rational::one(), add).unwrap();
        map.accumulate(Expr::variable("x"), Rational::two(), add).unwrap();
        map.accumulate(Expr::variable("y"), Rational::negative_one(), add).unwrap();
        map.accumulate(Expr::variable("x"), Rational::one(), add).unwrap();
        map.accumulate(Expr::variable("z"), Rational::zero(), add).unwrap();

        assert_eq!(map.into_entries(), vec![(Expr::variable("x"), Rational::int(3))]);
    }

    #[test]
    fn term_map_orders_by_name() {
        let mut map = TermMap::new(product_order, Expr::is_zero);
        for name in ["c", "a", "b"] {
            map.accumulate(Expr::variable(name), Expr::one(), |_, new| Ok(new)).unwrap();
        }
        let names = map.into_entries()
            .into_iter()
            .map(|(key, _)| key.as_variable().map(str::to_string))
            .collect::<Vec<_>>();
        assert_eq!(names, vec![Some("a".to_string()), Some("b".to_string()), Some("c".to_string())]);
    }
}
