//! Classical fourth-order Runge-Kutta.

use crate::{
    Error, Float, ODE,
    grid::{check_step, grid, trace},
};

/// Classical explicit Runge-Kutta 4 (RK4) fixed-step integrator.
///
/// ```text
/// K1 = f(x,       v)
/// K2 = f(x + h/2, v + h/2 K1)
/// K3 = f(x + h/2, v + h/2 K2)
/// K4 = f(x + h,   v + h K3)
/// v' = v + h/6 (K1 + 2 K2 + 2 K3 + K4)
/// ```
///
/// Returns n+2 values starting with `u0`.
pub fn rk4<F>(x0: Float, u0: Float, h: Float, n: usize, f: &F) -> Result<Vec<Float>, Error>
where
    F: ODE + ?Sized,
{
    check_step(h)?;
    log::debug!("rk4: x0={x0} u0={u0} h={h} n={n}");

    let x = grid(x0, h, n);
    let mut v = trace(u0, n);
    for k in 1..x.len() {
        let (xk, u) = (x[k - 1], v[k - 1]);

        // Stage computations
        let k1 = f.ode(xk, u);
        let k2 = f.ode(xk + C2 * h, u + h * A21 * k1);
        let k3 = f.ode(xk + C3 * h, u + h * A32 * k2);
        let k4 = f.ode(xk + C4 * h, u + h * A43 * k3);

        let next = u + h * (B1 * k1 + B2 * k2 + B3 * k3 + B4 * k4);
        log::trace!("rk4: x={} v={}", x[k], next);
        v.push(next);
    }
    Ok(v)
}

// RK4 coefficients (Butcher tableau)
const C2: Float = 0.5;
const C3: Float = 0.5;
const C4: Float = 1.0;
const A21: Float = 0.5;
const A32: Float = 0.5;
const A43: Float = 1.0;
const B1: Float = 1.0 / 6.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 1.0 / 3.0;
const B4: Float = 1.0 / 6.0;
