//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use steppers::prelude::*;
//! ```
//!
//! Re-exports included:
//! - The five methods: `euler_method`, `heun_method`, `rk4`, `taylor_method`,
//!   `picard_method` (plus `picard_approximation`).
//! - Core traits and types: `ODE`, `Error`, `Float`.
//! - Symbolic layer: `Expr`, `Symbol`, `Roles`, `Bindings`, `Cas`, `Engine`.
//! - High-level API: `solve`, `solve_expr`, `Options`, `Method`, `Solution`.

pub use crate::{
    Error, Float, ODE,
    methods::{euler_method, heun_method, picard_approximation, picard_method, rk4, taylor_method},
    solve::{Method, Options, Solution, solve, solve_expr},
    symbolic::{Bindings, Cas, Engine, Expr, Roles, Symbol},
};
