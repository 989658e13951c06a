//! Symbolic Equation Engine
//!
//! A focused Rust library for generating, representing, and numerically
//! evaluating symbolic equations used as training and validation corpora
//! in symbolic-regression search.
//!
//! # Features
//! - Prefix-notation token sequences with an extensible operator registry
//!   (arity, numeric semantics, display form, complexity weight)
//! - Domain-guarded ("safe") kernels that never raise and never propagate
//!   NaN/Inf: `log`, `sqrt`, `div`, `exp`, and signed-base `pow`
//! - One generic evaluation path over plain arrays (`Vec<T>`) and
//!   batched tensor-like values ([`Batch`]), numerically identical by
//!   construction
//! - A constrained random generator producing grammatically valid,
//!   length-bounded equations under an arbitrary acceptance predicate,
//!   serialized in bulk to dataset files
//!
//! # Usage
//!
//! Evaluate a known equation over a sample grid:
//!
//! ```
//! use symregen::{Equation, EvalContext};
//!
//! let eq = Equation::parse(&["mul", "x1", "x1"]).unwrap();
//! let ctx = EvalContext::from_columns(vec![vec![1.0, 2.0, 3.0]]).unwrap();
//! assert_eq!(eq.evaluate(&ctx).unwrap(), vec![1.0, 4.0, 9.0]);
//! assert_eq!(eq.to_string(), "(x1 * x1)");
//! ```
//!
//! Generate a pretraining corpus:
//!
//! ```no_run
//! use rustc_hash::FxHashMap;
//! use symregen::{GeneratorConfig, generate_dataset};
//!
//! let vocabulary = vec!["add", "mul", "sin", "x1"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//! let arities: FxHashMap<String, usize> =
//!     [("add", 2), ("mul", 2), ("sin", 1)]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v))
//!         .collect();
//! let config = GeneratorConfig::new(20_000, 14, vocabulary, arities).seeded(7);
//! generate_dataset(config, "train")?;
//! # Ok::<(), symregen::GenerateError>(())
//! ```
//!
//! Batch generation parallelizes across rayon workers with the
//! `parallel` feature:
//! ```toml
//! symregen = { version = "0.1", features = ["parallel"] }
//! ```

mod batch;
mod equation;
mod error;
mod generator;
pub mod math;
mod operators;
pub mod traits;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use batch::Batch;
pub use equation::{
    CONST_SYMBOL, EvalContext, Equation, FLOAT_CONSTANTS, Token, evaluate_line, validate,
};
pub use error::{ConfigError, EvalError, ExprError, GenerateError};
pub use generator::{Generator, GeneratorConfig, Predicate, generate_dataset};
pub use operators::{OperatorDefinition, Registry};
pub use traits::{ElementWise, MathScalar};

/// Structural complexity weight of a terminal token (variable, `const`,
/// or float literal); operator weights never fall below it.
pub const VAR_CONST_COMPLEXITY: u32 = 1;
