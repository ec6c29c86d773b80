//! Capability interface for the computer-algebra operations the Taylor and
//! Picard methods rely on.

use bon::Builder;

use crate::{Error, Float};

use super::{Bindings, Expr, Quadrature, Symbol};

/// Computer-algebra capabilities used by the series and fixed-point methods.
///
/// [`Engine`] implements it on top of [`Expr`]'s own rules. An
/// implementation backed by another algebra system, or by numeric
/// differentiation and quadrature, can be passed to
/// [`taylor_method_with`](crate::methods::taylor_method_with) and
/// [`picard_method_with`](crate::methods::picard_method_with).
pub trait Cas {
    /// The `order`-th partial derivative of `expr` with respect to `var`.
    fn differentiate(&self, expr: &Expr, var: &Symbol, order: usize) -> Result<Expr, Error>;

    /// Definite integral of `expr` over `var` from `lower` to `upper`.
    fn integrate(&self, expr: &Expr, var: &Symbol, lower: &Expr, upper: &Expr) -> Result<Expr, Error>;

    /// `expr` with every free `var` replaced by `value`.
    fn substitute(&self, expr: &Expr, var: &Symbol, value: &Expr) -> Result<Expr, Error>;

    /// Numeric value of `expr` under `bindings`.
    fn evaluate(&self, expr: &Expr, bindings: &Bindings) -> Result<Float, Error>;
}

/// The built-in symbolic engine.
///
/// ```
/// use steppers::symbolic::Engine;
///
/// let engine = Engine::builder().quadrature_tolerance(1e-12).build();
/// assert_eq!(engine.max_quadrature_depth, 48);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Engine {
    /// Absolute tolerance for integrals without a closed form. Subintervals
    /// whose estimate is already accurate to a few ulps are accepted too.
    #[builder(default = 1e-10)]
    pub quadrature_tolerance: Float,
    /// Bisection limit of the adaptive Simpson rule.
    #[builder(default = 48)]
    pub max_quadrature_depth: usize,
    /// Integrand evaluations allowed per integral.
    #[builder(default = 1 << 20)]
    pub max_quadrature_evaluations: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Engine {
    pub fn quadrature(&self) -> Quadrature {
        Quadrature {
            tolerance: self.quadrature_tolerance,
            max_depth: self.max_quadrature_depth,
            max_evaluations: self.max_quadrature_evaluations,
        }
    }
}

impl Cas for Engine {
    fn differentiate(&self, expr: &Expr, var: &Symbol, order: usize) -> Result<Expr, Error> {
        Ok(expr.diff_n(var, order))
    }

    fn integrate(&self, expr: &Expr, var: &Symbol, lower: &Expr, upper: &Expr) -> Result<Expr, Error> {
        Ok(expr.integrate(var, lower, upper))
    }

    fn substitute(&self, expr: &Expr, var: &Symbol, value: &Expr) -> Result<Expr, Error> {
        Ok(expr.substitute(var, value).simplify())
    }

    fn evaluate(&self, expr: &Expr, bindings: &Bindings) -> Result<Float, Error> {
        expr.eval_with(bindings, &self.quadrature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_builder_defaults() {
        let engine = Engine::default();
        assert_eq!(engine.quadrature(), Quadrature::default());
    }

    #[test]
    fn evaluates_large_unevaluated_integral() {
        let f = Expr::integral("exp(t^2)".parse().unwrap(), "t", Expr::Const(0.0), Expr::Const(5.0));
        let value = Engine::default().evaluate(&f, &Bindings::new()).unwrap();
        assert!((value / 7_354_153_747.837_131 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn substitute_simplifies() {
        let f: Expr = "x*u + 0".parse().unwrap();
        let g = Engine::default()
            .substitute(&f, &Symbol::new("u"), &Expr::Const(1.0))
            .unwrap();
        assert_eq!(g, Expr::symbol("x"));
    }

    #[test]
    fn differentiate_repeats() {
        let f: Expr = "x^4".parse().unwrap();
        let d3 = Engine::default().differentiate(&f, &Symbol::new("x"), 3).unwrap();
        assert_eq!(d3, Expr::Const(24.0) * Expr::symbol("x"));
    }
}
