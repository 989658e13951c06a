//! Prefix-notation equation model.
//!
//! An [`Equation`] is an immutable sequence of tokens in prefix order: an
//! operator token is immediately followed by the token subsequences of its
//! operands. Construction validates the sequence with the pending-slot
//! consumption check, so every `Equation` value is a complete, well-formed
//! tree; evaluation and rendering walk the same left-to-right recursive
//! descent over the pre-validated tokens.

use crate::error::{EvalError, ExprError};
use crate::operators::{OperatorDefinition, Registry};
use crate::traits::{ElementWise, from_f64};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

mod context;

pub use context::EvalContext;

/// Token text of the symbolic optimizable constant
pub const CONST_SYMBOL: &str = "const";

/// Literal float tokens offered to the generator by default
pub const FLOAT_CONSTANTS: [&str; 7] = ["-1.0", "2.0", "3.0", "5.0", "7.0", "9.0", "10.0"];

/// Column index of a free-variable token (`x1` → 0, `x2` → 1, ...)
pub(crate) fn variable_column(name: &str) -> Option<usize> {
    let digits = name.strip_prefix('x')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = digits.parse().ok()?;
    n.checked_sub(1)
}

/// One token of a prefix-notation equation
#[derive(Debug, Clone)]
pub enum Token {
    /// Registered operator
    Operator(&'static OperatorDefinition),

    /// Free variable bound to an input-matrix column
    Variable { name: String, column: usize },

    /// Symbolic optimizable constant; its value is bound at evaluation time
    Const,

    /// Literal float constant. The written lexeme is kept so dataset
    /// serialization round-trips byte-for-byte.
    Float { value: f64, lexeme: String },
}

impl Token {
    /// Resolve token text against the registry, the variable convention,
    /// the `const` symbol, and float literal syntax, in that order.
    pub fn resolve(text: &str) -> Result<Token, ExprError> {
        if let Some(def) = Registry::get(text) {
            return Ok(Token::Operator(def));
        }
        if text == CONST_SYMBOL {
            return Ok(Token::Const);
        }
        if let Some(column) = variable_column(text) {
            return Ok(Token::Variable {
                name: text.to_string(),
                column,
            });
        }
        if let Ok(value) = text.parse::<f64>() {
            if value.is_finite() {
                return Ok(Token::Float {
                    value,
                    lexeme: text.to_string(),
                });
            }
        }
        Err(ExprError::unknown_token(text))
    }

    /// Number of operands this token consumes
    pub fn arity(&self) -> usize {
        match self {
            Token::Operator(def) => def.arity,
            _ => 0,
        }
    }

    /// Structural complexity weight
    pub fn complexity(&self) -> u32 {
        match self {
            Token::Operator(def) => def.complexity,
            _ => crate::VAR_CONST_COMPLEXITY,
        }
    }

    /// Whether this token closes a slot rather than opening new ones
    pub fn is_terminal(&self) -> bool {
        self.arity() == 0
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Operator(a), Token::Operator(b)) => a.name == b.name,
            (
                Token::Variable { column: a, .. },
                Token::Variable { column: b, .. },
            ) => a == b,
            (Token::Const, Token::Const) => true,
            (Token::Float { lexeme: a, .. }, Token::Float { lexeme: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    /// The wire text of the token, exactly as it serializes
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(def) => write!(f, "{}", def.name),
            Token::Variable { name, .. } => write!(f, "{}", name),
            Token::Const => write!(f, "{}", CONST_SYMBOL),
            Token::Float { lexeme, .. } => write!(f, "{}", lexeme),
        }
    }
}

/// An immutable, validated prefix-notation equation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    tokens: Vec<Token>,
}

impl Equation {
    /// Build an equation from resolved tokens, validating the prefix
    /// consumption invariant.
    ///
    /// # Errors
    /// [`ExprError::Empty`] for an empty sequence,
    /// [`ExprError::TrailingTokens`] if the tree completes early,
    /// [`ExprError::Truncated`] if slots remain open at the end.
    pub fn new(tokens: Vec<Token>) -> Result<Self, ExprError> {
        if tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let mut pending = 1usize;
        for (at, token) in tokens.iter().enumerate() {
            if pending == 0 {
                return Err(ExprError::TrailingTokens { at });
            }
            pending = pending - 1 + token.arity();
        }
        if pending != 0 {
            return Err(ExprError::Truncated { missing: pending });
        }
        Ok(Equation { tokens })
    }

    /// Resolve and validate a sequence of token texts.
    ///
    /// ```
    /// use symregen::Equation;
    ///
    /// let eq = Equation::parse(&["add", "x1", "x1"]).unwrap();
    /// assert_eq!(eq.to_string(), "(x1 + x1)");
    /// ```
    pub fn parse<S: AsRef<str>>(texts: &[S]) -> Result<Self, ExprError> {
        let tokens = texts
            .iter()
            .map(|t| Token::resolve(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Equation::new(tokens)
    }

    /// The validated token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A validated equation is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serialize as a whitespace-joined token line, the dataset wire format
    pub fn token_string(&self) -> String {
        self.tokens
            .iter()
            .map(Token::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Total structural complexity: the sum of per-token weights
    pub fn complexity(&self) -> u32 {
        self.tokens.iter().map(Token::complexity).sum()
    }

    /// Whether any token satisfies `pred`
    pub fn contains(&self, pred: impl Fn(&Token) -> bool) -> bool {
        self.tokens.iter().any(pred)
    }

    /// Numerically evaluate against a context, producing one result per
    /// sample.
    ///
    /// `const` tokens consume the context's bound constants in prefix
    /// order. Evaluation is pure: the same equation and context always
    /// produce the same result.
    ///
    /// ```
    /// use symregen::{Equation, EvalContext};
    ///
    /// let eq = Equation::parse(&["add", "x1", "x1"]).unwrap();
    /// let ctx = EvalContext::from_columns(vec![vec![1.0, 2.0, 3.0]]).unwrap();
    /// assert_eq!(eq.evaluate(&ctx).unwrap(), vec![2.0, 4.0, 6.0]);
    /// ```
    ///
    /// # Errors
    /// [`EvalError::UnboundVariable`] or [`EvalError::MissingConstant`] if
    /// the context lacks a binding the equation references.
    pub fn evaluate<V: ElementWise>(&self, ctx: &EvalContext<V>) -> Result<V, EvalError> {
        let mut pos = 0usize;
        let mut const_index = 0usize;
        let result = self.eval_node(&mut pos, &mut const_index, ctx)?;
        debug_assert_eq!(pos, self.tokens.len(), "validated tree consumed exactly");
        Ok(result)
    }

    fn eval_node<V: ElementWise>(
        &self,
        pos: &mut usize,
        const_index: &mut usize,
        ctx: &EvalContext<V>,
    ) -> Result<V, EvalError> {
        let token = &self.tokens[*pos];
        *pos += 1;
        match token {
            Token::Operator(def) => {
                let mut args = Vec::with_capacity(def.arity);
                for _ in 0..def.arity {
                    args.push(self.eval_node(pos, const_index, ctx)?);
                }
                Ok(def.kernel.apply(&args, ctx.shape()))
            }
            Token::Variable { name, .. } => ctx
                .variable(name)
                .cloned()
                .ok_or_else(|| EvalError::unbound_variable(name.clone())),
            Token::Const => {
                let value = ctx
                    .constant(*const_index)
                    .ok_or(EvalError::MissingConstant {
                        index: *const_index,
                    })?;
                *const_index += 1;
                Ok(V::full(ctx.shape(), value))
            }
            Token::Float { value, .. } => Ok(V::full(ctx.shape(), from_f64(*value))),
        }
    }

    fn render_node(&self, pos: &mut usize) -> String {
        let token = &self.tokens[*pos];
        *pos += 1;
        match token {
            Token::Operator(def) => {
                let children: Vec<String> =
                    (0..def.arity).map(|_| self.render_node(pos)).collect();
                def.render(&children)
            }
            terminal => terminal.to_string(),
        }
    }
}

impl fmt::Display for Equation {
    /// Infix-like display via each operator's renderer, e.g.
    /// `["mul", "x1", "2.0"]` renders as `(x1 * 2.0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pos = 0usize;
        let rendered = self.render_node(&mut pos);
        debug_assert_eq!(pos, self.tokens.len(), "validated tree consumed exactly");
        write!(f, "{}", rendered)
    }
}

impl FromStr for Equation {
    type Err = ExprError;

    /// Parse a dataset line: whitespace-separated token texts
    fn from_str(line: &str) -> Result<Self, ExprError> {
        let texts: Vec<&str> = line.split_whitespace().collect();
        Equation::parse(&texts)
    }
}

/// Check the prefix-consumption invariant over raw token texts.
///
/// Arity resolution order: the supplied `arities` map, then the built-in
/// resolution (registry operators, variables, `const`, float literals).
/// An unresolvable token makes the sequence invalid.
///
/// Returns `true` iff the pending-slot count reaches exactly zero exactly
/// at the end of the sequence.
pub fn validate<S: AsRef<str>>(tokens: &[S], arities: &FxHashMap<String, usize>) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let mut pending = 1usize;
    for token in tokens {
        if pending == 0 {
            return false;
        }
        let text = token.as_ref();
        let arity = match arities.get(text) {
            Some(&a) => a,
            None => match Token::resolve(text) {
                Ok(t) => t.arity(),
                Err(_) => return false,
            },
        };
        pending = pending - 1 + arity;
    }
    pending == 0
}

/// Parse a dataset line and evaluate it in one step.
///
/// Convenience entry point for consumers scoring sampled lines straight
/// from a file; malformed lines surface as [`EvalError::Invalid`].
pub fn evaluate_line<V: ElementWise>(line: &str, ctx: &EvalContext<V>) -> Result<V, EvalError> {
    let equation: Equation = line.parse()?;
    equation.evaluate(ctx)
}
