//! Symbolic differentiation.

use super::{
    Expr, Func, Symbol,
    simplify::{add, div, mul, neg, pow, sub},
};

impl Expr {
    /// Partial derivative with respect to `var`, simplified.
    ///
    /// ```
    /// use steppers::{Expr, Symbol};
    ///
    /// let f: Expr = "x^3 + sin(x)".parse().unwrap();
    /// let df = f.diff(&Symbol::new("x"));
    /// assert_eq!(df.to_string(), "3*x^2 + cos(x)");
    /// ```
    pub fn diff(&self, var: &Symbol) -> Expr {
        derivative(self, var).simplify()
    }

    /// The `order`-th partial derivative with respect to `var`. Order zero
    /// returns the expression unchanged.
    pub fn diff_n(&self, var: &Symbol, order: usize) -> Expr {
        let mut d = self.clone();
        for _ in 0..order {
            d = d.diff(var);
        }
        d
    }
}

fn derivative(expr: &Expr, var: &Symbol) -> Expr {
    if !expr.contains(var) {
        return Expr::Const(0.0);
    }
    match expr {
        Expr::Const(_) => Expr::Const(0.0),
        Expr::Sym(s) => Expr::Const(if s == var { 1.0 } else { 0.0 }),
        Expr::Neg(a) => neg(derivative(a, var)),
        Expr::Add(a, b) => add(derivative(a, var), derivative(b, var)),
        Expr::Sub(a, b) => sub(derivative(a, var), derivative(b, var)),
        // (fg)' = f'g + fg'
        Expr::Mul(a, b) => add(
            mul(derivative(a, var), b.as_ref().clone()),
            mul(a.as_ref().clone(), derivative(b, var)),
        ),
        // (f/g)' = (f'g - fg') / g^2
        Expr::Div(a, b) => div(
            sub(
                mul(derivative(a, var), b.as_ref().clone()),
                mul(a.as_ref().clone(), derivative(b, var)),
            ),
            pow(b.as_ref().clone(), Expr::Const(2.0)),
        ),
        Expr::Pow(base, exponent) => {
            if !exponent.contains(var) {
                // (f^n)' = n f^(n-1) f'
                let lowered = pow(base.as_ref().clone(), sub(exponent.as_ref().clone(), Expr::Const(1.0)));
                mul(mul(exponent.as_ref().clone(), lowered), derivative(base, var))
            } else {
                // (f^g)' = f^g (g' ln f + g f'/f)
                let log_term = mul(derivative(exponent, var), base.as_ref().clone().ln());
                let ratio_term = div(
                    mul(exponent.as_ref().clone(), derivative(base, var)),
                    base.as_ref().clone(),
                );
                mul(expr.clone(), add(log_term, ratio_term))
            }
        }
        Expr::Func(func, arg) => {
            let inner = arg.as_ref().clone();
            let outer = match func {
                Func::Sin => inner.cos(),
                Func::Cos => neg(inner.sin()),
                Func::Tan => div(Expr::Const(1.0), pow(inner.cos(), Expr::Const(2.0))),
                Func::Exp => inner.exp(),
                Func::Ln => div(Expr::Const(1.0), inner),
                Func::Sqrt => div(Expr::Const(1.0), mul(Expr::Const(2.0), inner.sqrt())),
                Func::Abs => div(inner.clone(), inner.abs()),
            };
            mul(outer, derivative(arg, var))
        }
        // Leibniz: d/dv ∫_a^b g dt = g(b) b' - g(a) a' + ∫_a^b ∂g/∂v dt
        Expr::Integral {
            integrand,
            var: bound,
            lower,
            upper,
        } => {
            let at_upper = mul(integrand.substitute(bound, upper), derivative(upper, var));
            let at_lower = mul(integrand.substitute(bound, lower), derivative(lower, var));
            let boundary = sub(at_upper, at_lower);
            if bound == var || !integrand.contains(var) {
                return boundary;
            }
            let inner = derivative(integrand, var).simplify();
            if inner == Expr::Const(0.0) {
                return boundary;
            }
            add(
                boundary,
                Expr::Integral {
                    integrand: Box::new(inner),
                    var: bound.clone(),
                    lower: lower.clone(),
                    upper: upper.clone(),
                },
            )
        }
    }
}
