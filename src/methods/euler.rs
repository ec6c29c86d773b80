//! Explicit Euler.

use crate::{
    Error, Float, ODE,
    grid::{check_step, grid, trace},
};

/// Explicit Euler: `v[k] = v[k-1] + h f(x[k-1], v[k-1])`.
///
/// Returns n+2 values starting with `u0`. Division by zero or overflow
/// inside `f` shows up as infinities or NaN in the trace.
///
/// ```
/// let v = steppers::euler_method(0.0, 1.0, 0.1, 2, &|x: f64, u: f64| x - u).unwrap();
/// assert_eq!(v[0], 1.0);
/// assert!((v[1] - 0.9).abs() < 1e-15);
/// ```
pub fn euler_method<F>(x0: Float, u0: Float, h: Float, n: usize, f: &F) -> Result<Vec<Float>, Error>
where
    F: ODE + ?Sized,
{
    check_step(h)?;
    log::debug!("euler: x0={x0} u0={u0} h={h} n={n}");

    let x = grid(x0, h, n);
    let mut v = trace(u0, n);
    for k in 1..x.len() {
        let u = v[k - 1];
        let next = u + h * f.ode(x[k - 1], u);
        log::trace!("euler: x={} v={}", x[k], next);
        v.push(next);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_step_of_x_minus_u() {
        let v = euler_method(0.0, 1.0, 0.1, 2, &|x: Float, u: Float| x - u).unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0], 1.0);
        assert_relative_eq!(v[1], 0.9, epsilon = 1e-12);
        // 0.9 + 0.1 (0.1 - 0.9)
        assert_relative_eq!(v[2], 0.82, epsilon = 1e-12);
    }

    #[test]
    fn zero_steps_gives_two_values() {
        let v = euler_method(0.0, 2.0, 0.5, 0, &|_x: Float, u: Float| u).unwrap();
        assert_eq!(v, vec![2.0, 3.0]);
    }

    #[test]
    fn rejects_nan_step() {
        let r = euler_method(0.0, 1.0, Float::NAN, 2, &|_x: Float, u: Float| u);
        assert!(matches!(r, Err(Error::InvalidStepSize(_))));
    }

    #[test]
    fn numeric_failures_propagate() {
        let v = euler_method(0.0, 1.0, 0.1, 1, &|x: Float, _u: Float| 1.0 / x).unwrap();
        assert!(v[1].is_infinite());
    }
}
