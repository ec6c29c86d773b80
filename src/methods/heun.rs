//! Heun's method (improved Euler).

use crate::{
    Error, Float, ODE,
    grid::{check_step, grid, trace},
};

/// Heun's predictor-corrector method.
///
/// The Euler predictor `v[k-1] + h f(x[k-1], v[k-1])` is corrected with the
/// trapezoidal average of the slopes at both ends of the step:
///
/// `v[k] = v[k-1] + h/2 (f(x[k-1], v[k-1]) + f(x[k], predictor))`
pub fn heun_method<F>(x0: Float, u0: Float, h: Float, n: usize, f: &F) -> Result<Vec<Float>, Error>
where
    F: ODE + ?Sized,
{
    check_step(h)?;
    log::debug!("heun: x0={x0} u0={u0} h={h} n={n}");

    let x = grid(x0, h, n);
    let mut v = trace(u0, n);
    for k in 1..x.len() {
        let u = v[k - 1];
        let k1 = f.ode(x[k - 1], u);
        let predictor = u + h * k1;
        let k2 = f.ode(x[k], predictor);
        let next = u + 0.5 * h * (k1 + k2);
        log::trace!("heun: x={} v={}", x[k], next);
        v.push(next);
    }
    Ok(v)
}
