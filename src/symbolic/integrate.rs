//! Symbolic integration.

use crate::Float;

use super::{
    Expr, Func, Symbol,
    simplify::{add, div, mul, neg, pow, sub},
};

/// Largest integer power expanded when treating an expression as a
/// polynomial.
const MAX_EXPANDED_POWER: Float = 32.0;

impl Expr {
    /// Definite integral of `self` over `var` from `lower` to `upper`.
    ///
    /// Returns the closed form `F(upper) - F(lower)` when an antiderivative
    /// is found, otherwise an unevaluated [`Expr::Integral`].
    ///
    /// ```
    /// use steppers::{Expr, Symbol};
    ///
    /// let f: Expr = "t - 1".parse().unwrap();
    /// let i = f.integrate(&Symbol::new("t"), &Expr::Const(0.0), &Expr::Const(2.0));
    /// assert_eq!(i, Expr::Const(0.0));
    ///
    /// let g: Expr = "exp(t^2)".parse().unwrap();
    /// let j = g.integrate(&Symbol::new("t"), &Expr::Const(0.0), &Expr::symbol("x"));
    /// assert!(!j.is_closed_form());
    /// ```
    pub fn integrate(&self, var: &Symbol, lower: &Expr, upper: &Expr) -> Expr {
        match self.antiderivative(var) {
            Some(f) => sub(f.substitute(var, upper), f.substitute(var, lower)).simplify(),
            None => Expr::Integral {
                integrand: Box::new(self.simplify()),
                var: var.clone(),
                lower: Box::new(lower.clone()),
                upper: Box::new(upper.clone()),
            },
        }
    }

    /// An antiderivative with respect to `var`, if one of the supported
    /// rules applies.
    pub fn antiderivative(&self, var: &Symbol) -> Option<Expr> {
        antiderivative(&self.simplify(), var).map(|f| f.simplify())
    }
}

fn antiderivative(expr: &Expr, var: &Symbol) -> Option<Expr> {
    let x = Expr::Sym(var.clone());
    if !expr.contains(var) {
        return Some(mul(expr.clone(), x));
    }
    if let Some(coeffs) = polynomial(expr, var) {
        return Some(integrate_polynomial(coeffs, &x));
    }
    match expr {
        Expr::Neg(a) => antiderivative(a, var).map(neg),
        Expr::Add(a, b) => Some(add(antiderivative(a, var)?, antiderivative(b, var)?)),
        Expr::Sub(a, b) => Some(sub(antiderivative(a, var)?, antiderivative(b, var)?)),
        Expr::Mul(a, b) if !a.contains(var) => Some(mul(a.as_ref().clone(), antiderivative(b, var)?)),
        Expr::Mul(a, b) if !b.contains(var) => Some(mul(antiderivative(a, var)?, b.as_ref().clone())),
        Expr::Div(a, b) if !b.contains(var) => Some(div(antiderivative(a, var)?, b.as_ref().clone())),
        // c / x, valid on either side of zero
        Expr::Div(a, b) if !a.contains(var) && **b == x => Some(mul(a.as_ref().clone(), x.abs().ln())),
        Expr::Pow(base, exponent) if **base == x && !exponent.contains(var) => {
            if **exponent == Expr::Const(-1.0) {
                Some(x.abs().ln())
            } else {
                let raised = add(exponent.as_ref().clone(), Expr::Const(1.0));
                Some(div(pow(x, raised.clone()), raised))
            }
        }
        // c^(a x + b) = c^(a x + b) / (a ln c)
        Expr::Pow(base, exponent) if !base.contains(var) => {
            let (slope, _) = linear(exponent, var)?;
            Some(div(expr.clone(), mul(slope, base.as_ref().clone().ln())))
        }
        Expr::Func(func, arg) => {
            let (slope, _) = linear(arg, var)?;
            let inner = arg.as_ref().clone();
            let f = match func {
                Func::Exp => inner.exp(),
                Func::Sin => neg(inner.cos()),
                Func::Cos => inner.sin(),
                _ => return None,
            };
            Some(div(f, slope))
        }
        _ => None,
    }
}

/// `(a, b)` with `expr == a*var + b` and `a` free of `var` and non-zero.
fn linear(expr: &Expr, var: &Symbol) -> Option<(Expr, Expr)> {
    let coeffs = polynomial(expr, var)?;
    match coeffs.as_slice() {
        [b, a] if *a != Expr::Const(0.0) => Some((a.clone(), b.clone())),
        _ => None,
    }
}

/// Coefficients `c[k]` of `var^k` when `expr` is a polynomial in `var`.
fn polynomial(expr: &Expr, var: &Symbol) -> Option<Vec<Expr>> {
    if !expr.contains(var) {
        return Some(vec![expr.clone()]);
    }
    let coeffs = match expr {
        Expr::Sym(_) => vec![Expr::Const(0.0), Expr::Const(1.0)],
        Expr::Neg(a) => polynomial(a, var)?.into_iter().map(neg).collect(),
        Expr::Add(a, b) => combine(polynomial(a, var)?, polynomial(b, var)?, add),
        Expr::Sub(a, b) => combine(polynomial(a, var)?, polynomial(b, var)?, sub),
        Expr::Mul(a, b) => convolve(&polynomial(a, var)?, &polynomial(b, var)?),
        Expr::Div(a, b) if !b.contains(var) => polynomial(a, var)?
            .into_iter()
            .map(|c| div(c, b.as_ref().clone()))
            .collect(),
        Expr::Pow(base, exponent) => {
            let n = exponent.as_const()?;
            if n < 0.0 || n.fract() != 0.0 || n > MAX_EXPANDED_POWER {
                return None;
            }
            let p = polynomial(base, var)?;
            let mut acc = vec![Expr::Const(1.0)];
            for _ in 0..n as usize {
                acc = convolve(&acc, &p);
            }
            acc
        }
        _ => return None,
    };
    Some(trim(coeffs))
}

fn combine(mut a: Vec<Expr>, b: Vec<Expr>, op: fn(Expr, Expr) -> Expr) -> Vec<Expr> {
    if a.len() < b.len() {
        a.resize(b.len(), Expr::Const(0.0));
    }
    let tail = a.split_off(b.len());
    a.into_iter()
        .zip(b)
        .map(|(p, q)| op(p, q))
        .chain(tail)
        .collect()
}

fn convolve(a: &[Expr], b: &[Expr]) -> Vec<Expr> {
    let mut out = vec![Expr::Const(0.0); a.len() + b.len() - 1];
    for (i, p) in a.iter().enumerate() {
        for (j, q) in b.iter().enumerate() {
            let term = mul(p.clone(), q.clone());
            out[i + j] = add(std::mem::replace(&mut out[i + j], Expr::Const(0.0)), term);
        }
    }
    out
}

fn trim(mut coeffs: Vec<Expr>) -> Vec<Expr> {
    while coeffs.len() > 1 && coeffs.last() == Some(&Expr::Const(0.0)) {
        coeffs.pop();
    }
    coeffs
}

/// Σ c[k] x^(k+1) / (k+1), highest power first.
fn integrate_polynomial(coeffs: Vec<Expr>, x: &Expr) -> Expr {
    coeffs
        .into_iter()
        .enumerate()
        .rev()
        .map(|(k, c)| {
            let power = (k + 1) as Float;
            mul(div(c, Expr::Const(power)), pow(x.clone(), Expr::Const(power)))
        })
        .fold(Expr::Const(0.0), add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Bindings;
    use approx::assert_relative_eq;

    fn parse(s: &str) -> Expr {
        s.parse().unwrap()
    }

    fn t() -> Symbol {
        Symbol::new("t")
    }

    fn definite(f: &str, a: Float, b: Float) -> Expr {
        parse(f).integrate(&t(), &Expr::Const(a), &Expr::Const(b))
    }

    #[test]
    fn power_rule() {
        assert_eq!(
            parse("t^2").antiderivative(&t()),
            Some(Expr::Const(1.0 / 3.0) * Expr::symbol("t").pow(3.0))
        );
        assert_relative_eq!(definite("t^2", 0.0, 3.0).as_const().unwrap(), 9.0, epsilon = 1e-14);
    }

    #[test]
    fn constant_integrand() {
        assert_eq!(definite("5", 1.0, 3.0), Expr::Const(10.0));
        let i = parse("k").integrate(&t(), &Expr::Const(0.0), &Expr::symbol("x"));
        assert_eq!(i, parse("k*x"));
    }

    #[test]
    fn expands_products_of_polynomials() {
        // ∫_0^1 (t + 1)(t - 1) dt = 1/3 - 1
        let i = definite("(t + 1)*(t - 1)", 0.0, 1.0);
        assert_relative_eq!(i.as_const().unwrap(), -2.0 / 3.0, epsilon = 1e-15);
        let i = definite("(2*t + 1)^3/4", 0.0, 1.0);
        assert_relative_eq!(i.as_const().unwrap(), 10.0 / 4.0, epsilon = 1e-15);
    }

    #[test]
    fn elementary_functions_of_linear_arguments() {
        let i = definite("exp(-t)", 0.0, 1.0);
        assert_relative_eq!(i.as_const().unwrap(), 1.0 - (-1.0_f64).exp(), epsilon = 1e-15);
        let i = definite("sin(2*t) + cos(t)", 0.0, 1.0);
        let expected = (1.0 - 2.0_f64.cos()) / 2.0 + 1.0_f64.sin();
        assert_relative_eq!(i.as_const().unwrap(), expected, epsilon = 1e-15);
        let i = definite("2^t", 0.0, 3.0);
        assert_relative_eq!(i.as_const().unwrap(), 7.0 / 2.0_f64.ln(), epsilon = 1e-13);
    }

    #[test]
    fn reciprocal_becomes_logarithm() {
        let i = definite("3/t", 1.0, 2.0);
        assert_relative_eq!(i.as_const().unwrap(), 3.0 * 2.0_f64.ln(), epsilon = 1e-15);
        let i = definite("t^-1", 1.0, 2.0);
        assert_relative_eq!(i.as_const().unwrap(), 2.0_f64.ln(), epsilon = 1e-15);
    }

    #[test]
    fn reciprocal_on_negative_interval() {
        let i = definite("1/t", -2.0, -1.0);
        assert_relative_eq!(i.as_const().unwrap(), -(2.0_f64.ln()), epsilon = 1e-15);
        let i = definite("t^-1", -2.0, -1.0);
        assert_relative_eq!(i.as_const().unwrap(), -(2.0_f64.ln()), epsilon = 1e-15);
    }

    #[test]
    fn symbolic_upper_bound() {
        // ∫_0^x (t - 1) dt = x^2/2 - x
        let i = parse("t - 1").integrate(&t(), &Expr::Const(0.0), &Expr::symbol("x"));
        assert!(i.is_closed_form());
        let b = Bindings::new().bind("x", 0.1);
        assert_relative_eq!(i.eval(&b).unwrap(), 0.005 - 0.1, epsilon = 1e-15);
    }

    #[test]
    fn no_closed_form_stays_symbolic() {
        let i = parse("exp(t^2)").integrate(&t(), &Expr::Const(0.0), &Expr::Const(1.0));
        assert!(matches!(i, Expr::Integral { .. }));
        assert_relative_eq!(i.eval(&Bindings::new()).unwrap(), 1.462_651_745_907_181_6, epsilon = 1e-8);
    }
}
