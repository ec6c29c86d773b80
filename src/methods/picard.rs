//! Picard successive approximation.

use crate::{
    Error, Float,
    symbolic::{Cas, Engine, Expr, Roles, Symbol},
};

/// Value of the `n_iterations`-th Picard iterate at `x_eval`.
///
/// Starting from `φ0(x) = u0`, each iteration forms
///
/// `φ_{k+1}(x) = u0 + ∫_{x0}^{x} f(t, φ_k(t)) dt`
///
/// symbolically. The result is a constant when every integral had a closed
/// form. Otherwise it keeps unevaluated integrals: check
/// [`Expr::is_closed_form`] and use [`Expr::eval`] for a numeric value.
///
/// ```
/// use steppers::{Expr, Roles};
///
/// let f: Expr = "x - u".parse().unwrap();
/// let p = steppers::picard_method(0.0, 1.0, &f, &Roles::default(), 0.1, 1).unwrap();
/// assert!((p.as_const().unwrap() - 0.905).abs() < 1e-12);
/// ```
pub fn picard_method(
    x0: Float,
    u0: Float,
    f: &Expr,
    roles: &Roles,
    x_eval: Float,
    n_iterations: usize,
) -> Result<Expr, Error> {
    picard_method_with(&Engine::default(), x0, u0, f, roles, x_eval, n_iterations)
}

/// [`picard_method`] with the symbolic work delegated to `cas`.
pub fn picard_method_with<C>(
    cas: &C,
    x0: Float,
    u0: Float,
    f: &Expr,
    roles: &Roles,
    x_eval: Float,
    n_iterations: usize,
) -> Result<Expr, Error>
where
    C: Cas + ?Sized,
{
    let phi = picard_approximation_with(cas, x0, u0, f, roles, n_iterations)?;
    cas.substitute(&phi, &roles.x, &Expr::Const(x_eval))
}

/// The `n_iterations`-th Picard iterate as an expression in `roles.x`.
///
/// Useful to evaluate one approximation at many points:
///
/// ```
/// use steppers::{Expr, Roles, symbolic::Bindings};
///
/// let f: Expr = "x - u".parse().unwrap();
/// let phi = steppers::picard_approximation(0.0, 1.0, &f, &Roles::default(), 4).unwrap();
/// for x in [0.1, 0.2, 0.3] {
///     let exact = x - 1.0 + 2.0 * f64::exp(-x);
///     let approx = phi.eval(&Bindings::new().bind("x", x)).unwrap();
///     assert!((approx - exact).abs() < 1e-3);
/// }
/// ```
pub fn picard_approximation(
    x0: Float,
    u0: Float,
    f: &Expr,
    roles: &Roles,
    n_iterations: usize,
) -> Result<Expr, Error> {
    picard_approximation_with(&Engine::default(), x0, u0, f, roles, n_iterations)
}

/// [`picard_approximation`] with the symbolic work delegated to `cas`.
pub fn picard_approximation_with<C>(
    cas: &C,
    x0: Float,
    u0: Float,
    f: &Expr,
    roles: &Roles,
    n_iterations: usize,
) -> Result<Expr, Error>
where
    C: Cas + ?Sized,
{
    log::debug!("picard: x0={x0} u0={u0} n_iterations={n_iterations} f={f}");

    let t = integration_variable(f, roles);
    let dummy = Expr::Sym(t.clone());
    let (lower, upper) = (Expr::Const(x0), Expr::Sym(roles.x.clone()));

    let mut phi = Expr::Const(u0);
    for k in 1..=n_iterations {
        let along = cas.substitute(&phi, &roles.x, &dummy)?;
        let integrand = cas.substitute(f, &roles.x, &dummy)?;
        let integrand = cas.substitute(&integrand, &roles.u, &along)?;
        let integral = cas.integrate(&integrand, &t, &lower, &upper)?;
        phi = (Expr::Const(u0) + integral).simplify();
        log::trace!("picard: phi_{k} = {phi}");
    }
    Ok(phi)
}

/// `t`, or a fresh variant of it, not clashing with f or the roles.
fn integration_variable(f: &Expr, roles: &Roles) -> Symbol {
    let free = f.free_symbols();
    let taken = |s: &Symbol| roles.contains(s) || free.contains(s);
    let t = Symbol::new("t");
    if taken(&t) { t.fresh(taken) } else { t }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Bindings;
    use approx::assert_relative_eq;

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    #[test]
    fn zero_iterations_is_the_initial_value() {
        let p = picard_method(0.0, 1.0, &parse("x - u"), &Roles::default(), 0.3, 0).unwrap();
        assert_eq!(p, Expr::Const(1.0));
    }

    #[test]
    fn first_iterate_of_x_minus_u() {
        // φ1 = 1 - x + x^2/2
        let phi = picard_approximation(0.0, 1.0, &parse("x - u"), &Roles::default(), 1).unwrap();
        assert!(phi.is_closed_form());
        let at = |x: Float| phi.eval(&Bindings::new().bind("x", x)).unwrap();
        assert_relative_eq!(at(0.1), 0.905, epsilon = 1e-14);
        assert_relative_eq!(at(0.2), 0.82, epsilon = 1e-14);
        assert_relative_eq!(at(0.3), 0.745, epsilon = 1e-14);
    }

    #[test]
    fn avoids_clashing_with_a_symbol_named_t() {
        // u' = t u, u = e^{t^2/2}. The x-role is `t`, so integration needs another name.
        let roles = Roles::new("t", "u");
        let p = picard_method(0.0, 1.0, &parse("t*u"), &roles, 0.5, 6).unwrap();
        assert_relative_eq!(p.as_const().unwrap(), (0.125 as Float).exp(), epsilon = 1e-7);
    }

    #[test]
    fn nonzero_start() {
        // u' = u, u(1) = 2 -> u = 2 e^{x-1}
        let p = picard_method(1.0, 2.0, &parse("u"), &Roles::default(), 1.5, 12).unwrap();
        assert_relative_eq!(p.as_const().unwrap(), 2.0 * (0.5 as Float).exp(), epsilon = 1e-10);
    }

    #[test]
    fn no_closed_form_remains_symbolic() {
        let p = picard_method(0.0, 0.0, &parse("exp(-x^2)"), &Roles::default(), 1.0, 1).unwrap();
        assert!(!p.is_closed_form());
        assert_relative_eq!(p.eval(&Bindings::new()).unwrap(), 0.746_824_132_812_427, epsilon = 1e-9);
    }

    #[test]
    fn keeps_foreign_symbols() {
        // u' = k u, one iterate: 1 + k x
        let phi = picard_approximation(0.0, 1.0, &parse("k*u"), &Roles::default(), 1).unwrap();
        let b = Bindings::new().bind("x", 0.5).bind("k", 3.0);
        assert_relative_eq!(phi.eval(&b).unwrap(), 2.5, epsilon = 1e-15);
    }
}
