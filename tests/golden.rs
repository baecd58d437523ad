//! Golden file integration tests.
//!
//! Reads tests/testdata/pi_golden.json and checks the P, Q and S sequences
//! and the accuracy of the assembled approximant for known iteration counts.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use serde::Deserialize;

use picalc_cli::verify::{compare_digits, Accuracy};
use picalc_core::engine::precalculate;
use picalc_core::observers::NoOpObserver;
use picalc_core::options::Options;
use picalc_core::progress::CancellationToken;
use picalc_core::sequences::{generate_p, generate_q};
use picalc_orchestration::orchestrator::execute_run;

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    pi_digits: String,
    p: Vec<String>,
    q: Vec<String>,
    s: Vec<GoldenRational>,
    approximants: Vec<GoldenApproximant>,
}

#[derive(Deserialize)]
struct GoldenRational {
    numer: String,
    denom: String,
}

#[derive(Deserialize)]
struct GoldenApproximant {
    iterations: u64,
    digits: u64,
    exponent: i64,
    /// `None` when every computed digit matches.
    correct_places: Option<usize>,
    significand_prefix: String,
}

fn load_golden_data() -> GoldenData {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/pi_golden.json");
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

#[test]
fn golden_p_sequence() {
    let golden = load_golden_data();
    let n = golden.p.len() as u64;
    let p = generate_p(n, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
    for (i, expected) in golden.p.iter().enumerate() {
        let expected: BigInt = expected.parse().unwrap();
        assert_eq!(p[i], expected, "P[{i}] mismatch");
    }
}

#[test]
fn golden_q_sequence() {
    let golden = load_golden_data();
    let n = golden.q.len() as u64;
    let q = generate_q(n, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
    for (i, expected) in golden.q.iter().enumerate() {
        let expected: BigUint = expected.parse().unwrap();
        assert_eq!(q[i], expected, "Q[{i}] mismatch");
    }
}

#[test]
fn golden_s_sequence() {
    let golden = load_golden_data();
    let n = golden.s.len() as u64;
    let s = precalculate(n, &CancellationToken::new(), &NoOpObserver::new()).unwrap();
    assert_eq!(s.len(), golden.s.len());
    for (i, expected) in golden.s.iter().enumerate() {
        let expected = BigRational::new(
            expected.numer.parse().unwrap(),
            expected.denom.parse().unwrap(),
        );
        assert_eq!(s[i], expected, "S[{i}] mismatch");
    }
}

// ---------------------------------------------------------------------------
// Approximants
// ---------------------------------------------------------------------------

#[test]
fn golden_approximants() {
    let golden = load_golden_data();
    let cancel = CancellationToken::new();

    for case in &golden.approximants {
        let opts = Options {
            iterations: case.iterations,
            digits: case.digits,
            ..Options::default()
        };
        let result = execute_run(&opts, &cancel);
        let value = result
            .value()
            .unwrap_or_else(|| panic!("n={} failed: {:?}", case.iterations, result.outcome));

        let (significand, exponent) = value.to_decimal_parts(case.digits as usize);
        assert_eq!(exponent, case.exponent, "n={}", case.iterations);
        assert!(
            significand.starts_with(&case.significand_prefix),
            "n={} significand {}",
            case.iterations,
            &significand[..20]
        );

        let accuracy = compare_digits(&significand, &golden.pi_digits);
        match case.correct_places {
            Some(places) => assert_eq!(
                accuracy,
                Accuracy::CorrectTo { places },
                "n={} digits={}",
                case.iterations,
                case.digits
            ),
            None => assert!(
                matches!(accuracy, Accuracy::AllCorrect { .. }),
                "n={} expected all digits correct, got {accuracy}",
                case.iterations
            ),
        }
    }
}

#[test]
fn golden_accuracy_grows_with_iterations() {
    let golden = load_golden_data();
    let mut last = 0;
    for case in golden.approximants.iter().filter(|c| c.correct_places.is_some()) {
        let places = case.correct_places.unwrap_or_default();
        assert!(places >= last, "n={} regressed", case.iterations);
        last = places;
    }
}
