//! Numeric evaluation of expressions.

use crate::{Error, Float};

use super::{Expr, Symbol};

/// Values for the free symbols of an expression. Later bindings shadow
/// earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: Vec<(Symbol, Float)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, symbol: impl Into<Symbol>, value: Float) -> Self {
        self.values.push((symbol.into(), value));
        self
    }

    pub fn get(&self, symbol: &Symbol) -> Option<Float> {
        self.values
            .iter()
            .rev()
            .find_map(|(s, v)| (s == symbol).then_some(*v))
    }

    fn push(&mut self, symbol: &Symbol, value: Float) {
        self.values.push((symbol.clone(), value));
    }

    fn pop(&mut self) {
        self.values.pop();
    }
}

/// Adaptive Simpson settings used for unevaluated integrals.
///
/// A subinterval is accepted once its error estimate is within `tolerance`
/// or within a few ulps of its own value, whichever is looser, so large
/// integrals terminate without resolving digits a float cannot hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrature {
    /// Absolute error target for the whole interval.
    pub tolerance: Float,
    /// Maximum bisection depth.
    pub max_depth: usize,
    /// Integrand evaluations allowed per integral before the remaining
    /// subintervals are accepted as they stand.
    pub max_evaluations: usize,
}

impl Default for Quadrature {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_depth: 48,
            max_evaluations: 1 << 20,
        }
    }
}

impl Expr {
    /// Evaluate with the given bindings, using default quadrature settings
    /// for any unevaluated integral.
    ///
    /// Division by zero and overflow follow IEEE arithmetic and show up as
    /// infinities or NaN in the result.
    pub fn eval(&self, bindings: &Bindings) -> Result<Float, Error> {
        self.eval_with(bindings, &Quadrature::default())
    }

    pub fn eval_with(&self, bindings: &Bindings, quadrature: &Quadrature) -> Result<Float, Error> {
        let mut env = bindings.clone();
        evaluate(self, &mut env, quadrature)
    }
}

fn evaluate(expr: &Expr, env: &mut Bindings, quad: &Quadrature) -> Result<Float, Error> {
    Ok(match expr {
        Expr::Const(c) => *c,
        Expr::Sym(s) => env
            .get(s)
            .ok_or_else(|| Error::UnboundSymbol(s.name().to_string()))?,
        Expr::Neg(a) => -evaluate(a, env, quad)?,
        Expr::Add(a, b) => evaluate(a, env, quad)? + evaluate(b, env, quad)?,
        Expr::Sub(a, b) => evaluate(a, env, quad)? - evaluate(b, env, quad)?,
        Expr::Mul(a, b) => evaluate(a, env, quad)? * evaluate(b, env, quad)?,
        Expr::Div(a, b) => evaluate(a, env, quad)? / evaluate(b, env, quad)?,
        Expr::Pow(a, b) => power(evaluate(a, env, quad)?, evaluate(b, env, quad)?),
        Expr::Func(f, a) => f.apply(evaluate(a, env, quad)?),
        Expr::Integral {
            integrand,
            var,
            lower,
            upper,
        } => {
            let a = evaluate(lower, env, quad)?;
            let b = evaluate(upper, env, quad)?;
            simpson(integrand, var, a, b, env, quad)?
        }
    })
}

/// Integer exponents go through `powi` so negative bases stay real.
fn power(base: Float, exponent: Float) -> Float {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as Float {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

fn simpson(
    integrand: &Expr,
    var: &Symbol,
    a: Float,
    b: Float,
    env: &mut Bindings,
    quad: &Quadrature,
) -> Result<Float, Error> {
    if a == b {
        return Ok(0.0);
    }
    let mut at = |x: Float, env: &mut Bindings| -> Result<Float, Error> {
        env.push(var, x);
        let y = evaluate(integrand, env, quad);
        env.pop();
        y
    };
    let m = 0.5 * (a + b);
    let fa = at(a, env)?;
    let fm = at(m, env)?;
    let fb = at(b, env)?;
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    let mut budget = Budget {
        tol: quad.tolerance,
        depth: quad.max_depth,
        evaluations: quad.max_evaluations.saturating_sub(3),
    };
    refine(&mut at, env, [a, m, b], [fa, fm, fb], whole, &mut budget)
}

// Per-call limits; `tol` and `depth` are restored on the way back up.
struct Budget {
    tol: Float,
    depth: usize,
    evaluations: usize,
}

// Classic adaptive Simpson with Richardson correction.
fn refine<F>(
    at: &mut F,
    env: &mut Bindings,
    [a, m, b]: [Float; 3],
    [fa, fm, fb]: [Float; 3],
    whole: Float,
    budget: &mut Budget,
) -> Result<Float, Error>
where
    F: FnMut(Float, &mut Bindings) -> Result<Float, Error>,
{
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = at(lm, env)?;
    let frm = at(rm, env)?;
    budget.evaluations = budget.evaluations.saturating_sub(2);
    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;
    let target = budget.tol.max(4.0 * Float::EPSILON * (left + right).abs());
    // Midpoints collapse onto an endpoint once the interval is a few ulps wide.
    let unsplittable = lm == a || lm == m || rm == m || rm == b;
    if budget.depth == 0
        || budget.evaluations == 0
        || unsplittable
        || delta.abs() <= 15.0 * target
        || !delta.is_finite()
    {
        return Ok(left + right + delta / 15.0);
    }
    let (tol, depth) = (budget.tol, budget.depth);
    budget.tol = 0.5 * tol;
    budget.depth = depth - 1;
    let lower = refine(at, env, [a, lm, m], [fa, flm, fm], left, budget)?;
    let upper = refine(at, env, [m, rm, b], [fm, frm, fb], right, budget)?;
    budget.tol = tol;
    budget.depth = depth;
    Ok(lower + upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluates_with_bindings() {
        let f: Expr = "x - u".parse().unwrap();
        let b = Bindings::new().bind("x", 0.0).bind("u", 1.0);
        assert_eq!(f.eval(&b).unwrap(), -1.0);
    }

    #[test]
    fn later_bindings_shadow_earlier_ones() {
        let b = Bindings::new().bind("x", 1.0).bind("x", 2.0);
        assert_eq!(b.get(&Symbol::new("x")), Some(2.0));
    }

    #[test]
    fn unbound_symbol_is_an_error() {
        let f: Expr = "x + k".parse().unwrap();
        let b = Bindings::new().bind("x", 1.0);
        assert_eq!(f.eval(&b), Err(Error::UnboundSymbol("k".to_string())));
    }

    #[test]
    fn negative_base_with_integer_exponent() {
        let f: Expr = "x^3".parse().unwrap();
        assert_eq!(f.eval(&Bindings::new().bind("x", -2.0)).unwrap(), -8.0);
    }

    #[test]
    fn division_by_zero_propagates_as_infinity() {
        let f: Expr = "1/x".parse().unwrap();
        assert!(f.eval(&Bindings::new().bind("x", 0.0)).unwrap().is_infinite());
    }

    #[test]
    fn quadrature_of_gaussian() {
        let f = Expr::integral("exp(-t^2)".parse().unwrap(), "t", Expr::Const(0.0), Expr::Const(1.0));
        assert_relative_eq!(f.eval(&Bindings::new()).unwrap(), 0.746_824_132_812_427, epsilon = 1e-9);
    }

    #[test]
    fn nested_integrals_shadow_the_bound_variable() {
        // ∫_0^1 ∫_0^t t dt' ... with both levels bound to `t`:
        // inner = ∫_0^t s ds = t^2/2, outer = ∫_0^1 t^2/2 dt = 1/6
        let inner = Expr::integral(Expr::symbol("t"), "t", Expr::Const(0.0), Expr::symbol("t"));
        let outer = Expr::integral(inner, "t", Expr::Const(0.0), Expr::Const(1.0));
        assert_relative_eq!(outer.eval(&Bindings::new()).unwrap(), 1.0 / 6.0, epsilon = 1e-9);
    }

    #[test]
    fn large_integral_terminates_on_relative_error() {
        // ∫_0^5 e^(t^2) dt ≈ 7.35e9, far beyond what an absolute 1e-10 can resolve
        let f = Expr::integral("exp(t^2)".parse().unwrap(), "t", Expr::Const(0.0), Expr::Const(5.0));
        let value = f.eval(&Bindings::new()).unwrap();
        assert_relative_eq!(value, 7_354_153_747.837_131, max_relative = 1e-9);
    }

    #[test]
    fn reversed_bounds_negate() {
        let f = Expr::integral("exp(t^2)".parse().unwrap(), "t", Expr::Const(1.0), Expr::Const(0.0));
        assert_relative_eq!(f.eval(&Bindings::new()).unwrap(), -1.462_651_745_907_181_6, epsilon = 1e-9);
    }

    #[test]
    fn evaluation_budget_caps_work() {
        let f = Expr::integral("exp(t^2)".parse().unwrap(), "t", Expr::Const(0.0), Expr::Const(5.0));
        let quad = Quadrature {
            tolerance: 0.0,
            max_evaluations: 1000,
            ..Quadrature::default()
        };
        let value = f.eval_with(&Bindings::new(), &quad).unwrap();
        assert!(value.is_finite() && value > 0.0);
    }
}
