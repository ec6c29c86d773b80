//! Grid construction and argument checks shared by the fixed-step methods.

use crate::{Error, Float};

/// Validate the step size. Negative h integrates backwards; only non-finite
/// values are rejected.
pub(crate) fn check_step(h: Float) -> Result<(), Error> {
    if !h.is_finite() {
        return Err(Error::InvalidStepSize(h));
    }
    Ok(())
}

/// The n+2 abscissae x0, x0+h, ..., x0+(n+1)h.
pub(crate) fn grid(x0: Float, h: Float, n: usize) -> Vec<Float> {
    (0..n + 2).map(|k| x0 + k as Float * h).collect()
}

/// Trace buffer with `v[0] = u0` and room for the remaining n+1 values.
pub(crate) fn trace(u0: Float, n: usize) -> Vec<Float> {
    let mut v = Vec::with_capacity(n + 2);
    v.push(u0);
    v
}

/// Step count from a signed integer, as the Python bindings receive it.
#[cfg_attr(not(feature = "python"), allow(dead_code))]
pub(crate) fn step_count(n: i64) -> Result<usize, Error> {
    usize::try_from(n).map_err(|_| Error::InvalidStepCount(n))
}

#[cfg_attr(not(feature = "python"), allow(dead_code))]
pub(crate) fn taylor_order(order: i64) -> Result<usize, Error> {
    match usize::try_from(order) {
        Ok(k) if k >= 1 => Ok(k),
        _ => Err(Error::InvalidOrder(order)),
    }
}

#[cfg_attr(not(feature = "python"), allow(dead_code))]
pub(crate) fn iteration_count(n: i64) -> Result<usize, Error> {
    usize::try_from(n).map_err(|_| Error::InvalidIterationCount(n))
}
