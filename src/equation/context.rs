//! Evaluation contexts: variable and constant bindings for one evaluation.

use crate::error::EvalError;
use crate::traits::ElementWise;
use rustc_hash::FxHashMap;

/// Bindings required to numerically evaluate an [`Equation`](crate::Equation).
///
/// A context fixes the sample shape up front; every bound variable must
/// match it, so all columns of the input matrix stay aligned. Constants
/// for `const` tokens bind positionally, in the prefix order the tokens
/// appear in.
#[derive(Debug, Clone)]
pub struct EvalContext<V: ElementWise> {
    variables: FxHashMap<String, V>,
    constants: Vec<V::Scalar>,
    shape: V::Shape,
}

impl<V: ElementWise> EvalContext<V> {
    /// An empty context with a fixed sample shape
    pub fn new(shape: V::Shape) -> Self {
        EvalContext {
            variables: FxHashMap::default(),
            constants: Vec::new(),
            shape,
        }
    }

    /// Bind a variable to its sample values.
    ///
    /// # Errors
    /// [`EvalError::ShapeMismatch`] if `values` does not match the
    /// context's shape.
    pub fn with_variable(mut self, name: impl Into<String>, values: V) -> Result<Self, EvalError> {
        if values.shape() != self.shape {
            return Err(EvalError::shape_mismatch(&self.shape, &values.shape()));
        }
        self.variables.insert(name.into(), values);
        Ok(self)
    }

    /// Bind values for `const` tokens, consumed in prefix order
    pub fn with_constants(mut self, constants: Vec<V::Scalar>) -> Self {
        self.constants = constants;
        self
    }

    /// The sample shape every binding conforms to
    pub fn shape(&self) -> &V::Shape {
        &self.shape
    }

    /// Look up a bound variable
    pub fn variable(&self, name: &str) -> Option<&V> {
        self.variables.get(name)
    }

    /// The value bound for the `index`-th `const` token, if any
    pub fn constant(&self, index: usize) -> Option<V::Scalar> {
        self.constants.get(index).copied()
    }
}

impl<T: crate::traits::MathScalar> EvalContext<Vec<T>> {
    /// Build a context from the columns of an input matrix, binding
    /// `x1`, `x2`, ... to columns 0, 1, ... in order.
    ///
    /// # Errors
    /// [`EvalError::ShapeMismatch`] if the columns have differing sample
    /// counts.
    pub fn from_columns(columns: Vec<Vec<T>>) -> Result<Self, EvalError> {
        let samples = columns.first().map_or(0, Vec::len);
        let mut ctx = EvalContext::new(samples);
        for (index, column) in columns.into_iter().enumerate() {
            ctx = ctx.with_variable(format!("x{}", index + 1), column)?;
        }
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_binds_in_variable_order() {
        let ctx = EvalContext::from_columns(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(ctx.variable("x1"), Some(&vec![1.0, 2.0]));
        assert_eq!(ctx.variable("x2"), Some(&vec![3.0, 4.0]));
        assert_eq!(ctx.variable("x3"), None);
        assert_eq!(*ctx.shape(), 2);
    }

    #[test]
    fn from_columns_rejects_misaligned_columns() {
        let err = EvalContext::from_columns(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(EvalError::ShapeMismatch { .. })));
    }

    #[test]
    fn constants_bind_positionally() {
        let ctx: EvalContext<Vec<f64>> =
            EvalContext::new(3).with_constants(vec![1.5, -2.0]);
        assert_eq!(ctx.constant(0), Some(1.5));
        assert_eq!(ctx.constant(1), Some(-2.0));
        assert_eq!(ctx.constant(2), None);
    }
}
