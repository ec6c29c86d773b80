//! Expression tree, constructors, substitution and printing.

use std::{
    collections::BTreeSet,
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

use crate::Float;

use super::Symbol;

/// Elementary functions of one argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Func {
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
        }
    }

    /// `log` is accepted as an alias of `ln`.
    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "ln" | "log" => Some(Func::Ln),
            "sqrt" => Some(Func::Sqrt),
            "abs" => Some(Func::Abs),
            _ => None,
        }
    }

    pub fn apply(self, a: Float) -> Float {
        match self {
            Func::Sin => a.sin(),
            Func::Cos => a.cos(),
            Func::Tan => a.tan(),
            Func::Exp => a.exp(),
            Func::Ln => a.ln(),
            Func::Sqrt => a.sqrt(),
            Func::Abs => a.abs(),
        }
    }
}

/// A symbolic expression.
///
/// `Integral` is a definite integral that had no closed form when it was
/// built; `var` is bound inside `integrand` only, the bounds are evaluated
/// outside its scope.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(Float),
    Sym(Symbol),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Func(Func, Box<Expr>),
    Integral {
        integrand: Box<Expr>,
        var: Symbol,
        lower: Box<Expr>,
        upper: Box<Expr>,
    },
}

impl Expr {
    pub fn constant(c: Float) -> Expr {
        Expr::Const(c)
    }

    pub fn symbol(name: impl Into<Symbol>) -> Expr {
        Expr::Sym(name.into())
    }

    pub fn pow(self, exponent: impl Into<Expr>) -> Expr {
        Expr::Pow(Box::new(self), Box::new(exponent.into()))
    }

    pub fn apply(func: Func, arg: Expr) -> Expr {
        Expr::Func(func, Box::new(arg))
    }

    pub fn sin(self) -> Expr {
        Expr::apply(Func::Sin, self)
    }

    pub fn cos(self) -> Expr {
        Expr::apply(Func::Cos, self)
    }

    pub fn tan(self) -> Expr {
        Expr::apply(Func::Tan, self)
    }

    pub fn exp(self) -> Expr {
        Expr::apply(Func::Exp, self)
    }

    pub fn ln(self) -> Expr {
        Expr::apply(Func::Ln, self)
    }

    pub fn sqrt(self) -> Expr {
        Expr::apply(Func::Sqrt, self)
    }

    pub fn abs(self) -> Expr {
        Expr::apply(Func::Abs, self)
    }

    /// Unevaluated definite integral of `integrand` over `var` from `lower`
    /// to `upper`. Use [`Expr::integrate`] to get a closed form when one
    /// exists.
    pub fn integral(integrand: Expr, var: impl Into<Symbol>, lower: Expr, upper: Expr) -> Expr {
        Expr::Integral {
            integrand: Box::new(integrand),
            var: var.into(),
            lower: Box::new(lower),
            upper: Box::new(upper),
        }
    }

    /// The value of a constant expression.
    pub fn as_const(&self) -> Option<Float> {
        match self {
            Expr::Const(c) => Some(*c),
            _ => None,
        }
    }

    /// True when no unevaluated integral remains.
    pub fn is_closed_form(&self) -> bool {
        match self {
            Expr::Const(_) | Expr::Sym(_) => true,
            Expr::Neg(a) | Expr::Func(_, a) => a.is_closed_form(),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Pow(a, b) => {
                a.is_closed_form() && b.is_closed_form()
            }
            Expr::Integral { .. } => false,
        }
    }

    /// Symbols occurring free in the expression.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut out = BTreeSet::new();
        self.collect_free(&mut out);
        out
    }

    fn collect_free(&self, out: &mut BTreeSet<Symbol>) {
        match self {
            Expr::Const(_) => {}
            Expr::Sym(s) => {
                out.insert(s.clone());
            }
            Expr::Neg(a) | Expr::Func(_, a) => a.collect_free(out),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Pow(a, b) => {
                a.collect_free(out);
                b.collect_free(out);
            }
            Expr::Integral {
                integrand,
                var,
                lower,
                upper,
            } => {
                let mut inner = BTreeSet::new();
                integrand.collect_free(&mut inner);
                inner.remove(var);
                out.extend(inner);
                lower.collect_free(out);
                upper.collect_free(out);
            }
        }
    }

    /// Whether `s` occurs free.
    pub fn contains(&self, s: &Symbol) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Sym(t) => t == s,
            Expr::Neg(a) | Expr::Func(_, a) => a.contains(s),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Pow(a, b) => {
                a.contains(s) || b.contains(s)
            }
            Expr::Integral {
                integrand,
                var,
                lower,
                upper,
            } => lower.contains(s) || upper.contains(s) || (var != s && integrand.contains(s)),
        }
    }

    /// Replace every free occurrence of `var` by `value`.
    ///
    /// Integration variables are renamed when `value` mentions them, so no
    /// symbol of `value` is captured.
    pub fn substitute(&self, var: &Symbol, value: &Expr) -> Expr {
        match self {
            Expr::Const(_) => self.clone(),
            Expr::Sym(s) if s == var => value.clone(),
            Expr::Sym(_) => self.clone(),
            Expr::Neg(a) => Expr::Neg(Box::new(a.substitute(var, value))),
            Expr::Func(f, a) => Expr::Func(*f, Box::new(a.substitute(var, value))),
            Expr::Add(a, b) => Expr::Add(Box::new(a.substitute(var, value)), Box::new(b.substitute(var, value))),
            Expr::Sub(a, b) => Expr::Sub(Box::new(a.substitute(var, value)), Box::new(b.substitute(var, value))),
            Expr::Mul(a, b) => Expr::Mul(Box::new(a.substitute(var, value)), Box::new(b.substitute(var, value))),
            Expr::Div(a, b) => Expr::Div(Box::new(a.substitute(var, value)), Box::new(b.substitute(var, value))),
            Expr::Pow(a, b) => Expr::Pow(Box::new(a.substitute(var, value)), Box::new(b.substitute(var, value))),
            Expr::Integral {
                integrand,
                var: bound,
                lower,
                upper,
            } => {
                let lower = Box::new(lower.substitute(var, value));
                let upper = Box::new(upper.substitute(var, value));
                if bound == var || !integrand.contains(var) {
                    return Expr::Integral {
                        integrand: integrand.clone(),
                        var: bound.clone(),
                        lower,
                        upper,
                    };
                }
                let (bound, integrand) = if value.contains(bound) {
                    let renamed = bound.fresh(|s| value.contains(s) || integrand.contains(s) || s == var);
                    let body = integrand.substitute(bound, &Expr::Sym(renamed.clone()));
                    (renamed, body)
                } else {
                    (bound.clone(), integrand.as_ref().clone())
                };
                Expr::Integral {
                    integrand: Box::new(integrand.substitute(var, value)),
                    var: bound,
                    lower,
                    upper,
                }
            }
        }
    }

    /// Binding strength used by `Display`.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Const(c) if c.is_sign_negative() => 3,
            Expr::Pow(..) => 4,
            _ => 5,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "(")?;
            self.fmt_at(f, 0)?;
            return write!(f, ")");
        }
        match self {
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Sym(s) => write!(f, "{}", s),
            Expr::Neg(a) => {
                write!(f, "-")?;
                a.fmt_at(f, 3)
            }
            Expr::Add(a, b) => {
                a.fmt_at(f, 1)?;
                write!(f, " + ")?;
                b.fmt_at(f, 1)
            }
            Expr::Sub(a, b) => {
                a.fmt_at(f, 1)?;
                write!(f, " - ")?;
                b.fmt_at(f, 2)
            }
            Expr::Mul(a, b) => {
                a.fmt_at(f, 2)?;
                write!(f, "*")?;
                b.fmt_at(f, 2)
            }
            Expr::Div(a, b) => {
                a.fmt_at(f, 2)?;
                write!(f, "/")?;
                b.fmt_at(f, 3)
            }
            Expr::Pow(a, b) => {
                a.fmt_at(f, 5)?;
                write!(f, "^")?;
                b.fmt_at(f, 3)
            }
            Expr::Func(func, a) => {
                write!(f, "{}(", func.name())?;
                a.fmt_at(f, 0)?;
                write!(f, ")")
            }
            Expr::Integral {
                integrand,
                var,
                lower,
                upper,
            } => write!(f, "integrate({}, {}, {}, {})", integrand, var, lower, upper),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

impl From<Float> for Expr {
    fn from(c: Float) -> Self {
        Expr::Const(c)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Expr::Sym(s)
    }
}

impl From<&Symbol> for Expr {
    fn from(s: &Symbol) -> Self {
        Expr::Sym(s.clone())
    }
}

macro_rules! binary_op {
    ($tr:ident, $method:ident, $variant:ident) => {
        impl<T: Into<Expr>> $tr<T> for Expr {
            type Output = Expr;

            fn $method(self, rhs: T) -> Expr {
                Expr::$variant(Box::new(self), Box::new(rhs.into()))
            }
        }
    };
}

binary_op!(Add, add, Add);
binary_op!(Sub, sub, Sub);
binary_op!(Mul, mul, Mul);
binary_op!(Div, div, Div);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}
