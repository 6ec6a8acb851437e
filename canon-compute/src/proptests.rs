//! Property tests for [`Rational`] normalization, number parsing, and the order independence of
//! sums and products.

use crate::{make_product, make_sum, Expr, Rational, Sign};
use proptest::prelude::*;
use rug::Integer;

fn rational() -> impl Strategy<Value = Rational> {
    (any::<i64>(), any::<i64>().prop_filter("nonzero", |d| *d != 0))
        .prop_map(|(n, d)| Rational::new(Integer::from(n), Integer::from(d)).unwrap())
}

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-5i32..5).prop_map(Expr::int),
        prop::sample::select(vec!["x", "y", "z"]).prop_map(Expr::variable),
    ]
}

fn is_normalized(r: &Rational) -> bool {
    r.denominator().cmp0() == std::cmp::Ordering::Greater
        && r.numerator().clone().gcd(r.denominator()) == 1
}

proptest! {
    #[test]
    fn construction_normalizes(r in rational()) {
        prop_assert!(is_normalized(&r));
    }

    #[test]
    fn arithmetic_normalizes(a in rational(), b in rational()) {
        prop_assert!(is_normalized(&a.add(&b)));
        prop_assert!(is_normalized(&a.subtract(&b)));
        prop_assert!(is_normalized(&a.multiply(&b)));
        if !b.is_zero() {
            prop_assert!(is_normalized(&a.divide(&b).unwrap()));
        }
    }

    #[test]
    fn parse_number_round_trip(r in rational()) {
        prop_assert_eq!(Rational::parse_number(&r.to_string()).unwrap(), r);
    }

    #[test]
    fn parse_decimal_literal(whole in 0u32..100_000, fraction in 0u32..1000) {
        let text = format!("{}.{:03}", whole, fraction);
        let expected = Rational::new(
            Integer::from(whole) * 1000 + fraction,
            Integer::from(1000),
        ).unwrap();
        prop_assert_eq!(Rational::parse_number(&text).unwrap(), expected);
    }

    #[test]
    fn subtract_is_add_negate(a in rational(), b in rational()) {
        prop_assert_eq!(a.subtract(&b), a.add(&b.negate()));
    }
}

proptest! {
    #[test]
    fn sum_ignores_order(terms in prop::collection::vec((leaf(), any::<bool>()), 0..8)) {
        let signed = |(term, negative): (Expr, bool)| {
            (term, if negative { Sign::Negative } else { Sign::Positive })
        };
        let forward = make_sum(terms.iter().cloned().map(signed).collect()).unwrap();
        let backward = make_sum(terms.into_iter().rev().map(signed).collect()).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn product_ignores_order(factors in prop::collection::vec(leaf(), 0..8)) {
        let forward = make_product(factors.clone(), Vec::new()).unwrap();
        let backward = make_product(factors.into_iter().rev().collect(), Vec::new()).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn multiples_of_a_sum_collect(k in -5i32..5, c in -5i32..5) {
        let sum = make_sum(vec![
            (Expr::variable("x"), Sign::Positive),
            (Expr::int(c), Sign::Positive),
        ]).unwrap();
        let scaled = make_product(vec![Expr::int(k), sum.clone()], Vec::new()).unwrap();
        let rest = make_product(vec![Expr::int(1 - k), sum.clone()], Vec::new()).unwrap();
        let total = make_sum(vec![(scaled, Sign::Positive), (rest, Sign::Positive)]).unwrap();
        prop_assert_eq!(total, sum);
    }

    #[test]
    fn evaluation_matches_rational_arithmetic(a in rational(), b in rational()) {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let expr = x.clone().multiply(y.clone()).unwrap().add(x).unwrap();
        let value = expr
            .evaluate(&[("x", Expr::Rational(a.clone())), ("y", Expr::Rational(b.clone()))])
            .unwrap();
        prop_assert_eq!(value, Expr::Rational(a.multiply(&b).add(&a)));
    }
}
