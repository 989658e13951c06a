use std::fmt;
use std::io;

/// Errors raised while resolving or validating a prefix token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// The token sequence is empty
    Empty,

    /// A token resolves to neither an operator, a variable, a `const`
    /// symbol, nor a float literal
    UnknownToken { token: String },

    /// The sequence completed a full expression before its end; the token
    /// at position `at` has no open slot to fill
    TrailingTokens { at: usize },

    /// The sequence ended with `missing` operand slots still open
    Truncated { missing: usize },
}

impl ExprError {
    /// Create an `UnknownToken` error
    pub fn unknown_token(token: impl Into<String>) -> Self {
        ExprError::UnknownToken {
            token: token.into(),
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Empty => write!(f, "Token sequence is empty"),
            ExprError::UnknownToken { token } => {
                write!(f, "Unknown token: '{}'", token)
            }
            ExprError::TrailingTokens { at } => {
                write!(
                    f,
                    "Expression already complete at position {}; trailing tokens remain",
                    at
                )
            }
            ExprError::Truncated { missing } => {
                write!(
                    f,
                    "Token sequence ended with {} operand slot(s) still open",
                    missing
                )
            }
        }
    }
}

impl std::error::Error for ExprError {}

/// Errors raised while numerically evaluating an equation against a context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A variable referenced by the equation has no binding in the context
    UnboundVariable { name: String },

    /// The equation contains more `const` tokens than bound constant values
    MissingConstant { index: usize },

    /// A bound value does not match the context's sample shape
    ShapeMismatch { expected: String, got: String },

    /// The token sequence fails the prefix-consumption invariant.
    /// Evaluating an unvalidated sequence is a programmer error; `Equation`
    /// construction rules this out for its own values.
    Invalid(ExprError),
}

impl EvalError {
    /// Create an `UnboundVariable` error
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        EvalError::UnboundVariable { name: name.into() }
    }

    pub(crate) fn shape_mismatch(expected: impl fmt::Debug, got: impl fmt::Debug) -> Self {
        EvalError::ShapeMismatch {
            expected: format!("{:?}", expected),
            got: format!("{:?}", got),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnboundVariable { name } => {
                write!(
                    f,
                    "Variable '{}' is not bound in the evaluation context",
                    name
                )
            }
            EvalError::MissingConstant { index } => {
                write!(
                    f,
                    "No value bound for 'const' token #{} (constants bind in prefix order)",
                    index
                )
            }
            EvalError::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: expected {}, got {}", expected, got)
            }
            EvalError::Invalid(e) => write!(f, "Invalid expression: {}", e),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExprError> for EvalError {
    fn from(e: ExprError) -> Self {
        EvalError::Invalid(e)
    }
}

/// Configuration errors, detected before any generation work begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The vocabulary contains no tokens
    EmptyVocabulary,

    /// The requested sample count is zero
    ZeroCount,

    /// The length budget cannot hold even a single terminal token
    LengthTooSmall { max_length: usize },

    /// A vocabulary token resolves to nothing the engine can evaluate
    UnknownToken { token: String },

    /// A vocabulary token has no arity map entry and is not a terminal
    MissingArity { token: String },

    /// The arity map disagrees with the operator registry
    ArityMismatch {
        token: String,
        declared: usize,
        actual: usize,
    },

    /// The vocabulary has no arity-0 tokens, so no tree can ever close
    NoTerminals,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyVocabulary => write!(f, "Vocabulary is empty"),
            ConfigError::ZeroCount => write!(f, "Sample count must be positive"),
            ConfigError::LengthTooSmall { max_length } => {
                write!(
                    f,
                    "Length budget {} cannot hold a single terminal token",
                    max_length
                )
            }
            ConfigError::UnknownToken { token } => {
                write!(f, "Vocabulary token '{}' does not resolve", token)
            }
            ConfigError::MissingArity { token } => {
                write!(
                    f,
                    "Vocabulary token '{}' has no arity map entry and is not a terminal",
                    token
                )
            }
            ConfigError::ArityMismatch {
                token,
                declared,
                actual,
            } => {
                write!(
                    f,
                    "Arity map declares '{}' with arity {}, but the registry defines arity {}",
                    token, declared, actual
                )
            }
            ConfigError::NoTerminals => {
                write!(
                    f,
                    "Vocabulary contains no arity-0 tokens to terminate trees with"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by dataset generation
#[derive(Debug)]
pub enum GenerateError {
    /// Invalid configuration, raised before any sampling starts
    Config(ConfigError),

    /// Dataset file could not be written
    Io(io::Error),

    /// The rejection loop exceeded the configured attempt cap
    AttemptsExhausted { limit: u64 },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Config(e) => write!(f, "Invalid generator configuration: {}", e),
            GenerateError::Io(e) => write!(f, "Dataset I/O failed: {}", e),
            GenerateError::AttemptsExhausted { limit } => {
                write!(
                    f,
                    "Acceptance predicate rejected {} consecutive candidates; giving up",
                    limit
                )
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Config(e) => Some(e),
            GenerateError::Io(e) => Some(e),
            GenerateError::AttemptsExhausted { .. } => None,
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(e: ConfigError) -> Self {
        GenerateError::Config(e)
    }
}

impl From<io::Error> for GenerateError {
    fn from(e: io::Error) -> Self {
        GenerateError::Io(e)
    }
}
