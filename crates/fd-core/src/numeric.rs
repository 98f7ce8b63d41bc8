use crate::FdError;

/// Floating point type used throughout system
pub type Real = f64;

/// Smallest volume step the engine resolves (one decimal place).
pub const VOLUME_RESOLUTION: Real = 0.1;

/// Rounding slack allowed on the sum-of-volumes versus capacity comparison.
pub const VOLUME_SLACK: Real = 0.05;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FdError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, FdError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(FdError::Negative { what, value: v });
    }
    Ok(v)
}

/// Truncate toward zero at one decimal place: `trunc(x * 10) / 10`.
///
/// This is not rounding. `10.09` becomes `10.0`, `-0.05` becomes `-0.0`.
#[inline]
pub fn truncate_1dp(x: Real) -> Real {
    (x * 10.0).trunc() / 10.0
}
