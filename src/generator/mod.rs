//! Random equation generation for pretraining corpora.
//!
//! The generator samples depth- and length-bounded prefix token sequences
//! that are grammatically valid by construction: a pending-slot stack
//! tracks how many operand positions remain open, and the sampling pool
//! shrinks to terminals whenever the remaining length budget only fits
//! closing tokens. Accepted equations are written to a dataset file, one
//! whitespace-joined token sequence per line.
//!
//! The rejection loop is unbounded by default, matching the reference
//! behavior: a caller supplying a near-impossible predicate owns the
//! runtime risk. Set [`GeneratorConfig::max_attempts`] to trade that
//! fidelity for a hard failure.

use crate::equation::{Equation, Token};
use crate::error::{ConfigError, GenerateError};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Acceptance predicate over a constructed equation
pub type Predicate = dyn Fn(&Equation) -> bool + Send + Sync;

/// Configuration for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of accepted equations to produce
    pub count: usize,

    /// Maximum token-sequence length per equation
    pub max_length: usize,

    /// Sampling vocabulary: operators, free variables, and optional
    /// constant tokens
    pub vocabulary: Vec<String>,

    /// Arity for each operator token in the vocabulary. Terminals
    /// (variables, `const`, float literals, nullary operators) need no
    /// entry.
    pub arities: FxHashMap<String, usize>,

    /// Seed for reproducible, single-threaded generation
    pub seed: Option<u64>,

    /// Cap on rejection-loop attempts per accepted sample; `None`
    /// preserves the unbounded reference behavior
    pub max_attempts: Option<u64>,

    /// Reject equations whose structural complexity exceeds this budget
    pub max_complexity: Option<u32>,
}

impl GeneratorConfig {
    /// Configuration with the given budgets and vocabulary, no seed, no
    /// attempt cap, no complexity budget.
    pub fn new(
        count: usize,
        max_length: usize,
        vocabulary: Vec<String>,
        arities: FxHashMap<String, usize>,
    ) -> Self {
        GeneratorConfig {
            count,
            max_length,
            vocabulary,
            arities,
            seed: None,
            max_attempts: None,
            max_complexity: None,
        }
    }

    /// Set a seed for reproducible generation
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A validated generator, ready to sample.
///
/// Construction resolves the whole vocabulary and fails fast on any
/// inconsistency; no sampling work starts on a bad configuration.
pub struct Generator {
    config: GeneratorConfig,
    choices: Vec<Token>,
    /// `pools[h]` indexes the choices with arity ≤ h; sampling uses the
    /// pool matching the remaining length headroom
    pools: Vec<Vec<usize>>,
    predicate: Option<Box<Predicate>>,
}

impl Generator {
    /// Validate a configuration and resolve its vocabulary.
    ///
    /// # Errors
    /// Any [`ConfigError`]: zero count, zero length budget, empty
    /// vocabulary, unresolvable tokens, operator tokens missing from the
    /// arity map, arity map entries contradicting the registry, or a
    /// vocabulary with no terminals to close trees with.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        if config.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if config.max_length == 0 {
            return Err(ConfigError::LengthTooSmall {
                max_length: config.max_length,
            });
        }
        if config.vocabulary.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }

        let mut choices = Vec::with_capacity(config.vocabulary.len());
        for text in &config.vocabulary {
            let declared = config.arities.get(text).copied();
            let token = Token::resolve(text).map_err(|_| ConfigError::UnknownToken {
                token: text.clone(),
            })?;
            match declared {
                Some(a) if a != token.arity() => {
                    return Err(ConfigError::ArityMismatch {
                        token: text.clone(),
                        declared: a,
                        actual: token.arity(),
                    });
                }
                None if !token.is_terminal() => {
                    return Err(ConfigError::MissingArity {
                        token: text.clone(),
                    });
                }
                _ => {}
            }
            choices.push(token);
        }

        if !choices.iter().any(Token::is_terminal) {
            return Err(ConfigError::NoTerminals);
        }

        let max_arity = choices.iter().map(Token::arity).max().unwrap_or(0);
        let pools = (0..=max_arity)
            .map(|headroom| {
                choices
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.arity() <= headroom)
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();

        Ok(Generator {
            config,
            choices,
            pools,
            predicate: None,
        })
    }

    /// Attach an acceptance predicate; rejected candidates are resampled
    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&Equation) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }

    /// Sample one grammatically valid token sequence.
    ///
    /// Maintains `tokens.len() + open_slots <= max_length` throughout:
    /// a token opening `arity` new slots is only drawn while the budget
    /// can still absorb them, and once the headroom reaches zero only
    /// terminals remain in the pool, closing the open slots one by one.
    fn sample_tokens(&self, rng: &mut ChaCha8Rng) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut open = 1usize;
        while open > 0 {
            let headroom = self.config.max_length - (tokens.len() + open);
            let pool = &self.pools[headroom.min(self.pools.len() - 1)];
            let token = self.choices[pool[rng.random_range(0..pool.len())]].clone();
            open = open - 1 + token.arity();
            tokens.push(token);
        }
        tokens
    }

    /// Run the rejection loop until one candidate is accepted
    fn sample_accepted(&self, rng: &mut ChaCha8Rng) -> Result<Equation, GenerateError> {
        let mut attempts = 0u64;
        loop {
            attempts += 1;
            let tokens = self.sample_tokens(rng);
            let equation =
                Equation::new(tokens).expect("generator emits only valid prefix sequences");

            let within_budget = self
                .config
                .max_complexity
                .is_none_or(|cap| equation.complexity() <= cap);
            if within_budget && self.predicate.as_ref().is_none_or(|p| p(&equation)) {
                return Ok(equation);
            }

            trace!("rejected candidate after {} attempt(s): {}", attempts, equation);
            if let Some(limit) = self.config.max_attempts {
                if attempts >= limit {
                    return Err(GenerateError::AttemptsExhausted { limit });
                }
            }
        }
    }

    /// Generate the configured number of accepted equations in memory.
    ///
    /// Seeded configurations produce the same batch on every call.
    pub fn generate_batch(&self) -> Result<Vec<Equation>, GenerateError> {
        let mut rng = self.rng();
        let mut batch = Vec::with_capacity(self.config.count);
        for produced in 0..self.config.count {
            batch.push(self.sample_accepted(&mut rng)?);
            if (produced + 1) % 10_000 == 0 {
                debug!("accepted {}/{} equations", produced + 1, self.config.count);
            }
        }
        Ok(batch)
    }

    /// Generate the batch with per-sample construction fanned out across
    /// the rayon thread pool.
    ///
    /// Sample construction is independent, so the fan-out/fan-in keeps
    /// every property of the single-threaded path except ordering
    /// determinism; seeded configurations therefore fall back to the
    /// sequential path.
    #[cfg(feature = "parallel")]
    pub fn generate_batch_parallel(&self) -> Result<Vec<Equation>, GenerateError> {
        use rayon::prelude::*;

        if self.config.seed.is_some() {
            return self.generate_batch();
        }
        (0..self.config.count)
            .into_par_iter()
            .map_init(ChaCha8Rng::from_os_rng, |rng, _| self.sample_accepted(rng))
            .collect()
    }

    /// Generate the batch and write it to `destination`, one
    /// whitespace-joined token sequence per line.
    ///
    /// The file is written through a buffered writer to a `.tmp` sibling
    /// and atomically renamed into place, so a failed run never leaves a
    /// truncated destination file.
    pub fn write_dataset(&self, destination: impl AsRef<Path>) -> Result<(), GenerateError> {
        let destination = destination.as_ref();
        let batch = self.generate_batch()?;

        let mut tmp = destination.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = write_lines(&tmp, &batch).and_then(|()| fs::rename(&tmp, destination)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        info!(
            "wrote {} equations to {}",
            batch.len(),
            destination.display()
        );
        Ok(())
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("has_predicate", &self.predicate.is_some())
            .finish_non_exhaustive()
    }
}

fn write_lines(path: &Path, batch: &[Equation]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for equation in batch {
        writeln!(writer, "{}", equation.token_string())?;
    }
    writer.flush()
}

/// Generate a dataset of `config.count` accepted equations at
/// `destination`.
///
/// Fails with a configuration error before writing anything if the
/// vocabulary and arity map are inconsistent. Attach an acceptance
/// predicate via [`Generator::with_predicate`] when one is needed.
pub fn generate_dataset(
    config: GeneratorConfig,
    destination: impl AsRef<Path>,
) -> Result<(), GenerateError> {
    Generator::new(config)?.write_dataset(destination)
}
