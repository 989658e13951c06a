//! Domain-guarded numeric kernels.
//!
//! Every kernel is total over the full real line: invalid domains
//! (non-positive logarithms, near-zero divisors, overflowing exponents)
//! evaluate to a defined fallback instead of raising or propagating
//! NaN/Inf. Loss computation downstream requires a finite value at every
//! sample point, whatever expression the generator produced.
//!
//! Kernels are generic over [`ElementWise`], so the plain-array and
//! batched backends share one guard implementation.

use crate::traits::{ElementWise, MathScalar, from_f64};

/// `safe_log` falls back to 0 at or below this input value
pub const LOG_GUARD: f64 = 1e-4;

/// `safe_div` falls back to 0 when the divisor magnitude is at or below this
pub const DIV_GUARD: f64 = 1e-3;

/// `safe_exp` clamps its argument to this value
pub const EXP_CLAMP: f64 = 10.0;

#[inline]
pub(crate) fn log_s<T: MathScalar>(x: T) -> T {
    if x > from_f64(LOG_GUARD) {
        x.abs().ln()
    } else {
        T::zero()
    }
}

#[inline]
pub(crate) fn sqrt_s<T: MathScalar>(x: T) -> T {
    if x > T::zero() { x.abs().sqrt() } else { T::zero() }
}

#[inline]
pub(crate) fn div_s<T: MathScalar>(x: T, y: T) -> T {
    if y.abs() > from_f64(DIV_GUARD) {
        x / y
    } else {
        T::zero()
    }
}

#[inline]
pub(crate) fn exp_s<T: MathScalar>(x: T) -> T {
    let clamp: T = from_f64(EXP_CLAMP);
    if x < clamp { x.exp() } else { clamp.exp() }
}

/// Scalar form of [`safe_pow`].
///
/// For `x > 0` this is `exp(y * log(x))` under the log/exp guards. For
/// `x <= 0` the sign branch models real-valued integer powers of negative
/// bases: the coefficient is `(-1)^y` when `y` is an integer and `0`
/// otherwise, so non-integer exponents of negative bases evaluate to 0
/// rather than a complex number.
#[inline]
pub(crate) fn pow_s<T: MathScalar>(x: T, y: T) -> T {
    let coefficient = if x > T::zero() {
        T::one()
    } else if (y % T::one()) == T::zero() {
        // (-1)^y for integer y: sign follows the parity of y
        if (y % from_f64(2.0)).abs() == T::one() {
            -T::one()
        } else {
            T::one()
        }
    } else {
        return T::zero();
    };
    coefficient * exp_s(y * log_s(x.abs()))
}

/// `log(|x|)` where `x > 1e-4`, else `0`. Never raises on non-positive input.
pub fn safe_log<V: ElementWise>(x: &V) -> V {
    x.map(log_s)
}

/// `sqrt(|x|)` where `x > 0`, else `0`.
pub fn safe_sqrt<V: ElementWise>(x: &V) -> V {
    x.map(sqrt_s)
}

/// `x / y` where `|y| > 1e-3`, else `0`. Never raises on near-zero divisors.
pub fn safe_div<V: ElementWise>(x: &V, y: &V) -> V {
    x.zip(y, div_s)
}

/// `exp(x)` where `x < 10`, else `exp(10)`.
pub fn safe_exp<V: ElementWise>(x: &V) -> V {
    x.map(exp_s)
}

/// Guarded exponentiation with a signed branch for negative bases.
///
/// See [`pow_s`] for the exact branch structure. Examples over the
/// interesting part of the domain:
///
/// ```
/// use symregen::math::safe_pow;
///
/// let base = vec![-2.0_f64, -2.0, -2.0, 3.0];
/// let exponent = vec![2.0, 3.0, 2.5, 2.0];
/// let result = safe_pow(&base, &exponent);
/// assert!((result[0] - 4.0).abs() < 1e-9);
/// assert!((result[1] + 8.0).abs() < 1e-9);
/// assert_eq!(result[2], 0.0);
/// assert!((result[3] - 9.0).abs() < 1e-9);
/// ```
pub fn safe_pow<V: ElementWise>(x: &V, y: &V) -> V {
    x.zip(y, pow_s)
}
