//! Property-based tests.
//!
//! Uses quickcheck to exercise:
//! - the validation invariant against an independent reference model
//! - generator output validity across random seeds and budgets
//! - kernel totality over bounded finite inputs

use quickcheck::{QuickCheck, TestResult};
use rustc_hash::FxHashMap;

use crate::equation::validate;
use crate::math::{safe_div, safe_exp, safe_log, safe_pow, safe_sqrt};
use crate::{Equation, Generator, GeneratorConfig, Token};

const FULL_VOCAB: [&str; 12] = [
    "add", "sub", "mul", "sin", "cos", "safe_log", "safe_sqrt", "safe_div", "safe_exp",
    "safe_pow", "x1", "x2",
];

fn full_arities() -> FxHashMap<String, usize> {
    [
        ("add", 2),
        ("sub", 2),
        ("mul", 2),
        ("sin", 1),
        ("cos", 1),
        ("safe_log", 1),
        ("safe_sqrt", 1),
        ("safe_div", 2),
        ("safe_exp", 1),
        ("safe_pow", 2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Reference model: recursive-descent consumption instead of the linear
/// pending-slot counter used by the implementation.
fn reference_parses(tokens: &[&str], arities: &FxHashMap<String, usize>) -> bool {
    fn consume(tokens: &[&str], pos: &mut usize, arities: &FxHashMap<String, usize>) -> bool {
        let Some(&text) = tokens.get(*pos) else {
            return false;
        };
        *pos += 1;
        let arity = match arities.get(text) {
            Some(&a) => a,
            None => match Token::resolve(text) {
                Ok(t) => t.arity(),
                Err(_) => return false,
            },
        };
        (0..arity).all(|_| consume(tokens, pos, arities))
    }

    let mut pos = 0;
    consume(tokens, &mut pos, arities) && pos == tokens.len()
}

#[test]
fn validation_agrees_with_recursive_descent_reference() {
    // Bytes index into a candidate pool (valid tokens plus junk), so
    // quickcheck drives and shrinks the fuzzed sequences.
    fn prop(bytes: Vec<u8>) -> TestResult {
        if bytes.is_empty() {
            return TestResult::discard();
        }
        let candidates = [
            "add", "sub", "mul", "sin", "cos", "safe_log", "safe_div", "x1", "x2", "const",
            "2.0", "pi", "bogus",
        ];
        let tokens: Vec<&str> = bytes
            .iter()
            .map(|b| candidates[usize::from(*b) % candidates.len()])
            .collect();
        let arities = full_arities();
        TestResult::from_bool(validate(&tokens, &arities) == reference_parses(&tokens, &arities))
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn generated_batches_always_validate_within_budget() {
    fn prop(seed: u64, raw_len: u8) -> TestResult {
        let max_length = usize::from(raw_len % 30) + 1;
        let config = GeneratorConfig::new(
            20,
            max_length,
            FULL_VOCAB.iter().map(|t| t.to_string()).collect(),
            full_arities(),
        )
        .seeded(seed);
        let generator = match Generator::new(config) {
            Ok(g) => g,
            Err(_) => return TestResult::failed(),
        };
        let batch = match generator.generate_batch() {
            Ok(b) => b,
            Err(_) => return TestResult::failed(),
        };
        let arities = full_arities();
        let ok = batch.iter().all(|eq| {
            let texts: Vec<String> = eq.tokens().iter().map(Token::to_string).collect();
            eq.len() <= max_length && validate(&texts, &arities)
        });
        TestResult::from_bool(ok)
    }
    QuickCheck::new()
        .tests(60)
        .quickcheck(prop as fn(u64, u8) -> TestResult);
}

#[test]
fn serialized_batches_reparse_to_equal_equations() {
    fn prop(seed: u64) -> bool {
        let config = GeneratorConfig::new(
            10,
            14,
            FULL_VOCAB.iter().map(|t| t.to_string()).collect(),
            full_arities(),
        )
        .seeded(seed);
        let batch = Generator::new(config).unwrap().generate_batch().unwrap();
        batch.iter().all(|eq| {
            let reparsed: Equation = eq.token_string().parse().unwrap();
            reparsed == *eq
        })
    }
    QuickCheck::new().tests(40).quickcheck(prop as fn(u64) -> bool);
}

#[test]
fn kernels_are_total_over_bounded_inputs() {
    // Unary guards and the exp clamp make the kernels total; division is
    // only guarded against near-zero divisors, so operands stay in the
    // range real sample grids use.
    fn prop(pairs: Vec<(f64, f64)>) -> bool {
        let bounded = |v: f64| if v.is_finite() { v % 1e6 } else { 0.0 };
        let xs: Vec<f64> = pairs.iter().map(|&(a, _)| bounded(a)).collect();
        let ys: Vec<f64> = pairs.iter().map(|&(_, b)| bounded(b)).collect();

        let finite = |v: &Vec<f64>| v.iter().all(|x| x.is_finite());
        finite(&safe_log(&xs))
            && finite(&safe_sqrt(&xs))
            && finite(&safe_exp(&xs))
            && finite(&safe_div(&xs, &ys))
            && finite(&safe_pow(&xs, &ys))
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<(f64, f64)>) -> bool);
}
