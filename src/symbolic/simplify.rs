//! Local algebraic simplification.
//!
//! Bottom-up rewriting: constant folding, additive and multiplicative
//! identities, sign normalisation and constants-first products. It keeps
//! the trees produced by repeated differentiation and Picard iteration small;
//! it does not try to find a canonical form.

use super::Expr;

impl Expr {
    /// Simplified copy of the expression.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Sym(_) => self.clone(),
            Expr::Neg(a) => neg(a.simplify()),
            Expr::Add(a, b) => add(a.simplify(), b.simplify()),
            Expr::Sub(a, b) => sub(a.simplify(), b.simplify()),
            Expr::Mul(a, b) => mul(a.simplify(), b.simplify()),
            Expr::Div(a, b) => div(a.simplify(), b.simplify()),
            Expr::Pow(a, b) => pow(a.simplify(), b.simplify()),
            Expr::Func(f, a) => match a.simplify() {
                Expr::Const(c) => Expr::Const(f.apply(c)),
                a => Expr::Func(*f, Box::new(a)),
            },
            Expr::Integral {
                integrand,
                var,
                lower,
                upper,
            } => Expr::Integral {
                integrand: Box::new(integrand.simplify()),
                var: var.clone(),
                lower: Box::new(lower.simplify()),
                upper: Box::new(upper.simplify()),
            },
        }
    }
}

pub(crate) fn neg(a: Expr) -> Expr {
    match a {
        Expr::Const(c) => Expr::Const(-c),
        Expr::Neg(inner) => *inner,
        a => Expr::Neg(Box::new(a)),
    }
}

pub(crate) fn add(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x + y),
        (Expr::Const(z), e) | (e, Expr::Const(z)) if z == 0.0 => e,
        (a, Expr::Neg(b)) => sub(a, *b),
        (Expr::Neg(a), b) => sub(b, *a),
        (a, Expr::Const(c)) if c < 0.0 => sub(a, Expr::Const(-c)),
        (a, b) => Expr::Add(Box::new(a), Box::new(b)),
    }
}

pub(crate) fn sub(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x - y),
        (e, Expr::Const(z)) if z == 0.0 => e,
        (Expr::Const(z), e) if z == 0.0 => neg(e),
        (a, Expr::Neg(b)) => add(a, *b),
        (a, Expr::Const(c)) if c < 0.0 => add(a, Expr::Const(-c)),
        (a, b) if a == b => Expr::Const(0.0),
        (a, b) => Expr::Sub(Box::new(a), Box::new(b)),
    }
}

pub(crate) fn mul(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x * y),
        (Expr::Const(z), _) | (_, Expr::Const(z)) if z == 0.0 => Expr::Const(0.0),
        (Expr::Const(o), e) | (e, Expr::Const(o)) if o == 1.0 => e,
        (Expr::Const(m), e) | (e, Expr::Const(m)) if m == -1.0 => neg(e),
        (e, Expr::Const(c)) => mul(Expr::Const(c), e),
        (Expr::Const(c), Expr::Mul(p, q)) => match *p {
            Expr::Const(d) => mul(Expr::Const(c * d), *q),
            p => Expr::Mul(Box::new(Expr::Const(c)), Box::new(Expr::Mul(Box::new(p), q))),
        },
        (Expr::Neg(a), Expr::Neg(b)) => mul(*a, *b),
        (Expr::Neg(a), b) => neg(mul(*a, b)),
        (a, Expr::Neg(b)) => neg(mul(a, *b)),
        (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
    }
}

pub(crate) fn div(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x / y),
        (Expr::Const(z), _) if z == 0.0 => Expr::Const(0.0),
        (e, Expr::Const(o)) if o == 1.0 => e,
        (Expr::Neg(a), b) => neg(div(*a, b)),
        (a, b) if a == b => Expr::Const(1.0),
        (a, b) => Expr::Div(Box::new(a), Box::new(b)),
    }
}

pub(crate) fn pow(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Const(x), Expr::Const(y)) => Expr::Const(x.powf(y)),
        (_, Expr::Const(z)) if z == 0.0 => Expr::Const(1.0),
        (e, Expr::Const(o)) if o == 1.0 => e,
        (Expr::Const(o), _) if o == 1.0 => Expr::Const(1.0),
        (a, b) => Expr::Pow(Box::new(a), Box::new(b)),
    }
}
