use num_traits::{Float, FloatConst, FromPrimitive, ToPrimitive};
use std::fmt::{Debug, Display};

/// A trait comprising all operations required for numeric scalars in the
/// equation engine.
///
/// This aggregates `num_traits::Float` (providing sin, cos, exp, etc.),
/// `FloatConst` (PI, E), and the conversion/debug traits the kernels and
/// evaluation contexts rely on.
pub trait MathScalar:
    Float + FloatConst + FromPrimitive + ToPrimitive + Debug + Display + Copy + 'static
{
}

// Blanket implementation for any type that satisfies the bounds
impl<T> MathScalar for T where
    T: Float + FloatConst + FromPrimitive + ToPrimitive + Debug + Display + Copy + 'static
{
}

/// Convert an `f64` into any [`MathScalar`].
///
/// Float-to-float conversion is total for the types the engine is used
/// with; out-of-range values saturate to infinity inside `num_traits`.
#[inline]
pub(crate) fn from_f64<T: MathScalar>(v: f64) -> T {
    T::from_f64(v).unwrap_or_else(T::zero)
}

/// Element-wise numeric array abstraction.
///
/// Both evaluation backends implement this trait: `Vec<T>` for plain
/// per-sample arrays and [`Batch<T>`](crate::Batch) for tensor-like
/// batched values. The safe kernels in [`math`](crate::math) are written
/// once against this trait, so scalar/array and batched evaluation are
/// numerically identical by construction rather than by duplicated
/// guard logic.
///
/// `map` and `zip` replace the `where`/`select` idiom of array
/// frameworks: a guarded kernel is a closure over one or two scalar
/// operands, applied element-wise.
pub trait ElementWise: Clone {
    /// Scalar element type
    type Scalar: MathScalar;

    /// Shape descriptor: `usize` for flat arrays, `(rows, samples)` for
    /// batched values
    type Shape: Clone + PartialEq + Debug;

    /// The shape of this value
    fn shape(&self) -> Self::Shape;

    /// A value of the given shape with every element set to `value`.
    /// Nullary operators broadcast through this.
    fn full(shape: &Self::Shape, value: Self::Scalar) -> Self;

    /// Apply `f` to every element
    fn map(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;

    /// Apply `f` to every pair of corresponding elements.
    ///
    /// Both operands must have the same shape; evaluation contexts enforce
    /// this at binding time.
    fn zip(&self, other: &Self, f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar) -> Self;
}

impl<T: MathScalar> ElementWise for Vec<T> {
    type Scalar = T;
    type Shape = usize;

    fn shape(&self) -> usize {
        self.len()
    }

    fn full(shape: &usize, value: T) -> Self {
        vec![value; *shape]
    }

    fn map(&self, f: impl Fn(T) -> T) -> Self {
        self.iter().map(|&v| f(v)).collect()
    }

    fn zip(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        debug_assert_eq!(self.len(), other.len(), "operand length mismatch");
        self.iter().zip(other.iter()).map(|(&a, &b)| f(a, b)).collect()
    }
}
