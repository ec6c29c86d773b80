//! Symbolic expressions in the roles of x and u.
//!
//! The Taylor and Picard methods need exact manipulation of the right-hand
//! side: repeated partial derivatives, substitution of one expression into
//! another and definite integrals. This module provides a small expression
//! tree ([`Expr`]) and the [`Cas`] capability trait through which the
//! methods reach it, so a different engine can be plugged in with the
//! `*_with` entry points.
//!
//! - Differentiation (`Expr::diff`): sum, product, quotient, power and chain
//!   rules; Leibniz rule for unevaluated integrals.
//! - Integration (`Expr::integrate`): linearity, polynomials, `x^c`,
//!   `exp`/`sin`/`cos`/`c^x` of linear arguments. Anything else is kept as
//!   an unevaluated [`Expr::Integral`] that [`Expr::eval`] handles by
//!   adaptive Simpson quadrature.
//! - Parsing: `"x - u".parse::<Expr>()`.

mod diff;
mod engine;
mod eval;
mod expr;
mod integrate;
mod parse;
mod rhs;
mod simplify;

pub use engine::{Cas, Engine};
pub use eval::{Bindings, Quadrature};
pub use expr::{Expr, Func};
pub use rhs::ExprODE;

use std::fmt;

/// A named variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// A symbol derived from `self` for which `taken` is false.
    pub(crate) fn fresh(&self, taken: impl Fn(&Symbol) -> bool) -> Symbol {
        let mut candidate = Symbol(format!("{}_", self.0));
        let mut i = 1;
        while taken(&candidate) {
            candidate = Symbol(format!("{}_{}", self.0, i));
            i += 1;
        }
        candidate
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

/// Which symbols of a right-hand side play the independent variable x and
/// the unknown u.
///
/// ```
/// use steppers::{Expr, Roles};
///
/// let f: Expr = "t * y".parse().unwrap();
/// let roles = Roles::new("t", "y");
/// let v = steppers::taylor_method(0.0, 1.0, 0.1, 3, &f, &roles, 2).unwrap();
/// assert_eq!(v.len(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roles {
    pub x: Symbol,
    pub u: Symbol,
}

impl Roles {
    pub fn new(x: impl Into<Symbol>, u: impl Into<Symbol>) -> Self {
        Self {
            x: x.into(),
            u: u.into(),
        }
    }

    pub(crate) fn contains(&self, s: &Symbol) -> bool {
        *s == self.x || *s == self.u
    }
}

impl Default for Roles {
    fn default() -> Self {
        Roles::new("x", "u")
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(name)
    }
}
