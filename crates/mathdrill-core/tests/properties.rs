//! Property-based tests for generation invariants and grading correctness.

use std::cmp::Ordering;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use mathdrill_core::grader::{compare_fractions, gcd, normalize_answer};
use mathdrill_core::model::{FractionPayload, Payload};
use mathdrill_core::{Engine, SkillTemplate, Tier};

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Easy), Just(Tier::Normal), Just(Tier::Hard)]
}

/// Reduce n/d to lowest terms. `d` must be positive.
fn reduce(n: i64, d: i64) -> (i128, i128) {
    let g = gcd(n, d) as i128;
    (n as i128 / g, d as i128 / g)
}

/// Order of a/b against c/d without multiplying operands: compare integer
/// parts, then recurse on the reciprocals of the remainders.
fn rational_cmp(a: i64, b: i64, c: i64, d: i64) -> Ordering {
    let (mut a, mut b) = reduce(a, b);
    let (mut c, mut d) = reduce(c, d);
    loop {
        let (qa, qc) = (a.div_euclid(b), c.div_euclid(d));
        if qa != qc {
            return qa.cmp(&qc);
        }
        let (ra, rc) = (a.rem_euclid(b), c.rem_euclid(d));
        match (ra, rc) {
            (0, 0) => return Ordering::Equal,
            (0, _) => return Ordering::Less,
            (_, 0) => return Ordering::Greater,
            // ra/b vs rc/d orders the same as d/rc vs b/ra.
            _ => (a, b, c, d) = (d, rc, b, ra),
        }
    }
}

fn arb_denominator() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..10_000, (i64::MAX - 10_000)..=i64::MAX]
}

/// Largest divisor of both, by trial division from the top.
fn brute_gcd(x: u64, y: u64) -> u64 {
    if x == 0 {
        return y;
    }
    if y == 0 {
        return x;
    }
    (1..=x.min(y)).rev().find(|k| x % k == 0 && y % k == 0).unwrap_or(1)
}

proptest! {
    #[test]
    fn generated_fractions_have_valid_denominators(seed in any::<u64>(), tier in arb_tier()) {
        let engine = Engine::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let instance = engine
            .next_problem(SkillTemplate::FractionCompare, tier, &mut rng)
            .unwrap();
        let Payload::Fraction(p) = instance.payload else {
            panic!("fraction template produced {:?}", instance.payload);
        };
        prop_assert!(p.b >= 2);
        prop_assert!(p.d >= 2);
        prop_assert_ne!(p.a * p.d, p.c * p.b);
    }

    #[test]
    fn generated_gcd_operands_are_positive_and_distinct(seed in any::<u64>(), tier in arb_tier()) {
        let engine = Engine::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let instance = engine.next_problem(SkillTemplate::Gcd, tier, &mut rng).unwrap();
        let Payload::Gcd(p) = instance.payload else {
            panic!("gcd template produced {:?}", instance.payload);
        };
        prop_assert!(p.x >= 1);
        prop_assert!(p.y >= 1);
        prop_assert_ne!(p.x, p.y);
    }

    #[test]
    fn cross_multiplication_matches_rational_order(
        a in -10_000i64..10_000,
        b in 1i64..10_000,
        c in -10_000i64..10_000,
        d in 1i64..10_000,
    ) {
        let p = FractionPayload { a, b, c, d };
        prop_assert_eq!(compare_fractions(&p), rational_cmp(a, b, c, d));
    }

    #[test]
    fn cross_multiplication_handles_extreme_operands(
        a in any::<i64>(),
        b in arb_denominator(),
        c in any::<i64>(),
        d in arb_denominator(),
    ) {
        let p = FractionPayload { a, b, c, d };
        prop_assert_eq!(compare_fractions(&p), rational_cmp(a, b, c, d));
    }

    #[test]
    fn scaled_fractions_compare_equal(a in -1_000i64..1_000, b in 1i64..1_000, k in 1i64..1_000) {
        let p = FractionPayload { a, b, c: a * k, d: b * k };
        prop_assert_eq!(compare_fractions(&p), Ordering::Equal);
        prop_assert_eq!(rational_cmp(a, b, a * k, b * k), Ordering::Equal);
    }

    #[test]
    fn euclid_matches_brute_force(x in 0u64..2_000, y in 0u64..2_000) {
        prop_assert_eq!(gcd(x as i64, y as i64), brute_gcd(x, y));
    }

    #[test]
    fn gcd_ignores_sign(x in any::<i32>(), y in any::<i32>()) {
        let (x, y) = (x as i64, y as i64);
        prop_assert_eq!(gcd(x, y), gcd(-x, y));
        prop_assert_eq!(gcd(x, y), gcd(x, -y));
    }

    #[test]
    fn grading_is_idempotent(answer in ".{0,8}", x in 1i64..500, y in 1i64..500) {
        let engine = Engine::default();
        let body = json!({"template_id": "math_gcd_v1", "answer": answer, "payload": {"X": x, "Y": y}});
        let first = engine.grade_value(&body).unwrap();
        let second = engine.grade_value(&body).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalize_never_leaves_full_width_relations(raw in "[ ＞＜＝<>=0-9]{0,12}") {
        let normalized = normalize_answer(&raw);
        prop_assert!(!normalized.contains(['＞', '＜', '＝']));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }
}
