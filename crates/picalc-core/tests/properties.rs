//! Property-based tests for the Chudnovsky recurrences and fixed-point arithmetic.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use proptest::prelude::*;

use picalc_core::constants::Q_MULTIPLIER;
use picalc_core::fixed::FixedPoint;
use picalc_core::observers::NoOpObserver;
use picalc_core::precision::Precision;
use picalc_core::progress::{estimated_correct_digits, CancellationToken};
use picalc_core::sequences::{accumulate_s, generate_p, generate_q, term};
use picalc_core::{engine, pi};

const PI_300: &str = "314159265358979323846264338327950288419716939937510582097494459230781640628620899862803482534211706798214808651328230664709384460955058223172535940812848111745028410270193852110555964462294895493038196442881097566593344612847564823378678316527120190914564856692346034861045432664821339360726024914127";

fn matching_prefix(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Every P[i] follows from P[i-1] and alternates in sign.
    #[test]
    fn p_recurrence(n in 2u64..80) {
        let p = generate_p(n, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
        prop_assert_eq!(p.len() as u64, n);
        for i in 1..n {
            let i_big = BigInt::from(i);
            let factor = -(BigInt::from(6) * &i_big - 1i32)
                * (BigInt::from(6) * &i_big - 5i32)
                * (BigInt::from(2) * &i_big - 1i32);
            let idx = i as usize;
            prop_assert_eq!(&p[idx], &(&p[idx - 1] * factor));
            prop_assert_eq!(p[idx].is_negative(), i % 2 == 1);
        }
    }

    /// Every Q[i] is Q[i-1] times the multiplier and i cubed.
    #[test]
    fn q_recurrence(n in 2u64..80) {
        let q = generate_q(n, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
        for i in 1..n {
            let idx = i as usize;
            let expected = &q[idx - 1] * BigUint::from(Q_MULTIPLIER) * BigUint::from(i).pow(3);
            prop_assert_eq!(&q[idx], &expected);
        }
    }

    /// Consecutive S values differ by exactly one series term.
    #[test]
    fn s_differences_are_terms(n in 2u64..60) {
        let cancel = CancellationToken::new();
        let observer = NoOpObserver::new();
        let p = generate_p(n, &cancel, &observer).unwrap();
        let q = generate_q(n, &cancel, &observer).unwrap();
        let s = accumulate_s(&p, &q, &cancel, &observer).unwrap();
        prop_assert!(s[0].is_zero());
        for i in 1..n as usize {
            prop_assert_eq!(&s[i] - &s[i - 1], term(&p[i], &q[i], i as u64));
        }
    }

    /// A shorter run is a prefix of a longer one.
    #[test]
    fn precalculation_prefix_stable(n in 1u64..40, extra in 1u64..20) {
        let cancel = CancellationToken::new();
        let observer = NoOpObserver::new();
        let short = engine::precalculate(n, &cancel, &observer).unwrap();
        let long = engine::precalculate(n + extra, &cancel, &observer).unwrap();
        prop_assert_eq!(&long[..n as usize], &short[..]);
    }

    /// Rational conversion floors: m <= v * 2^bits < m + 1.
    #[test]
    fn from_rational_floors(numer in -1_000_000i64..1_000_000, denom in 1i64..10_000, digits in 1u64..60) {
        let precision = Precision::from_digits(digits).unwrap();
        let value = BigRational::new(BigInt::from(numer), BigInt::from(denom));
        let fixed = FixedPoint::from_rational(&value, precision);

        let scaled = BigInt::from(numer) << precision.bits();
        let lower = fixed.mantissa() * BigInt::from(denom);
        let upper = (fixed.mantissa() + 1) * BigInt::from(denom);
        prop_assert!(lower <= scaled);
        prop_assert!(scaled < upper);
    }

    /// The approximant is accurate to about 14 digits per iteration.
    #[test]
    fn accuracy_tracks_estimate(n in 1u64..20) {
        let value = pi(n, 320).unwrap();
        let (significand, exponent) = value.to_decimal_parts(320);
        prop_assert_eq!(exponent, 1);
        let correct = matching_prefix(&significand, PI_300) as u64;
        prop_assert!(correct + 2 >= estimated_correct_digits(n), "n={} correct={}", n, correct);
    }
}
