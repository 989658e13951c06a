//! Batched tensor-like evaluation backend.
//!
//! A [`Batch`] holds a dense row-major matrix of samples: each row is one
//! evaluation lane (one batch entry), each column one sample point. The
//! learning side hands whole minibatches of input grids through this type,
//! while plain `Vec<T>` covers the single-array case. Both implement
//! [`ElementWise`], so every kernel behaves identically on either.

use crate::error::EvalError;
use crate::traits::{ElementWise, MathScalar};

/// Dense row-major (rows × samples) matrix of scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T = f64> {
    data: Vec<T>,
    rows: usize,
    samples: usize,
}

impl<T: MathScalar> Batch<T> {
    /// Build a batch from equally sized rows.
    ///
    /// # Errors
    /// Returns [`EvalError::ShapeMismatch`] if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, EvalError> {
        let samples = rows.first().map_or(0, Vec::len);
        for row in &rows {
            if row.len() != samples {
                return Err(EvalError::shape_mismatch(samples, row.len()));
            }
        }
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * samples);
        for row in rows {
            data.extend(row);
        }
        Ok(Batch {
            data,
            rows: n_rows,
            samples,
        })
    }

    /// A batch with every element set to `value`
    pub fn splat(rows: usize, samples: usize, value: T) -> Self {
        Batch {
            data: vec![value; rows * samples],
            rows,
            samples,
        }
    }

    /// Number of rows (batch entries)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of sample points per row
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// One row as a slice
    pub fn row(&self, index: usize) -> &[T] {
        let start = index * self.samples;
        &self.data[start..start + self.samples]
    }

    /// Flat row-major view of all elements
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: MathScalar> ElementWise for Batch<T> {
    type Scalar = T;
    type Shape = (usize, usize);

    fn shape(&self) -> (usize, usize) {
        (self.rows, self.samples)
    }

    fn full(shape: &(usize, usize), value: T) -> Self {
        Batch::splat(shape.0, shape.1, value)
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        Batch {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            samples: self.samples,
        }
    }

    fn zip(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        debug_assert_eq!(self.shape(), other.shape(), "operand shape mismatch");
        Batch {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            samples: self.samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Batch::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(EvalError::ShapeMismatch { .. })));
    }

    #[test]
    fn row_access_is_row_major() {
        let b = Batch::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(b.shape(), (2, 3));
        assert_eq!(b.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(b.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn zip_applies_elementwise() {
        let a = Batch::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Batch::splat(2, 2, 10.0);
        let sum = a.zip(&b, |x, y| x + y);
        assert_eq!(sum.as_slice(), &[11.0, 12.0, 13.0, 14.0]);
    }
}
