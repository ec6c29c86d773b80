//! Truncated Taylor series.

use crate::{
    Error, Float,
    grid::{check_step, grid, trace},
    symbolic::{Bindings, Cas, Engine, Expr, Roles},
};

/// Truncated Taylor-series method of the given `order`.
///
/// Each step adds `Σ_{i=1..order} D_i h^i / i!` to the previous value, where
/// `D_i` is the mixed partial `∂^{2(i-1)} f / ∂x^{i-1} ∂u^{i-1}` evaluated at
/// the previous grid point and value. The partials are taken in the
/// variables named by `roles`. `D_1` is f itself, so order 1 is Euler's
/// method.
///
/// The mixed partials are not the total derivatives of u along the
/// solution, so for order >= 2 the method is not a true higher-order Taylor
/// expansion of u.
///
/// ```
/// use steppers::{Expr, Roles};
///
/// let f: Expr = "x - u".parse().unwrap();
/// let v = steppers::taylor_method(0.0, 1.0, 0.1, 2, &f, &Roles::default(), 3).unwrap();
/// assert_eq!(v.len(), 4);
/// ```
pub fn taylor_method(
    x0: Float,
    u0: Float,
    h: Float,
    n: usize,
    f: &Expr,
    roles: &Roles,
    order: usize,
) -> Result<Vec<Float>, Error> {
    taylor_method_with(&Engine::default(), x0, u0, h, n, f, roles, order)
}

/// [`taylor_method`] with the symbolic work delegated to `cas`.
#[allow(clippy::too_many_arguments)]
pub fn taylor_method_with<C>(
    cas: &C,
    x0: Float,
    u0: Float,
    h: Float,
    n: usize,
    f: &Expr,
    roles: &Roles,
    order: usize,
) -> Result<Vec<Float>, Error>
where
    C: Cas + ?Sized,
{
    check_step(h)?;
    if order == 0 {
        return Err(Error::InvalidOrder(0));
    }
    log::debug!("taylor: x0={x0} u0={u0} h={h} n={n} order={order} f={f}");

    // The partials do not depend on the step, so they are formed once.
    let mut partials = Vec::with_capacity(order);
    for j in 0..order {
        let dx = cas.differentiate(f, &roles.x, j)?;
        let d = cas.differentiate(&dx, &roles.u, j)?;
        log::trace!("taylor: D_{} = {}", j + 1, d);
        partials.push(d);
    }

    let x = grid(x0, h, n);
    let mut v = trace(u0, n);
    for k in 1..x.len() {
        let u = v[k - 1];
        let at = Bindings::new()
            .bind(roles.x.clone(), x[k - 1])
            .bind(roles.u.clone(), u);

        let mut sum = 0.0;
        let mut factorial = 1.0;
        for (j, d) in partials.iter().enumerate() {
            let i = j + 1;
            factorial *= i as Float;
            sum += cas.evaluate(d, &at)? * h.powi(i as i32) / factorial;
        }

        let next = u + sum;
        log::trace!("taylor: x={} v={}", x[k], next);
        v.push(next);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euler_method;
    use approx::assert_relative_eq;

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    #[test]
    fn order_one_is_euler() {
        let f = parse("x - u");
        let roles = Roles::default();
        let t = taylor_method(0.0, 1.0, 0.1, 2, &f, &roles, 1).unwrap();
        let e = euler_method(0.0, 1.0, 0.1, 2, &|x: Float, u: Float| x - u).unwrap();
        assert_eq!(t, e);
    }

    #[test]
    fn order_zero_is_rejected() {
        let f = parse("x - u");
        assert_eq!(
            taylor_method(0.0, 1.0, 0.1, 2, &f, &Roles::default(), 0),
            Err(Error::InvalidOrder(0))
        );
    }

    #[test]
    fn mixed_partials_drive_higher_terms() {
        // f = x u: D_1 = x u, D_2 = ∂²f/∂x∂u = 1, D_3 = 0
        let f = parse("x*u");
        let v = taylor_method(1.0, 2.0, 0.1, 0, &f, &Roles::default(), 3).unwrap();
        assert_relative_eq!(v[1], 2.0 + 0.1 * 2.0 + 0.01 / 2.0, epsilon = 1e-14);
    }

    #[test]
    fn x_minus_u_has_no_higher_terms() {
        // ∂²(x - u)/∂x∂u = 0, so every order agrees with Euler.
        let f = parse("x - u");
        let roles = Roles::default();
        let e = taylor_method(0.0, 1.0, 0.1, 2, &f, &roles, 1).unwrap();
        let t = taylor_method(0.0, 1.0, 0.1, 2, &f, &roles, 3).unwrap();
        for (a, b) in e.iter().zip(&t) {
            assert_relative_eq!(*a, *b, epsilon = 1e-15);
        }
    }

    #[test]
    fn unbound_symbol_fails() {
        let f = parse("x - k*u");
        assert_eq!(
            taylor_method(0.0, 1.0, 0.1, 2, &f, &Roles::default(), 2),
            Err(Error::UnboundSymbol("k".to_string()))
        );
    }
}
