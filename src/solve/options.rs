//! Options and method selection for solve

use bon::Builder;

use crate::Float;

/// Method selection for [`solve`](super::solve) and
/// [`solve_expr`](super::solve_expr).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Explicit Euler, order 1
    Euler,
    /// Heun predictor-corrector, order 2
    Heun,
    /// Classic fixed-step RK4
    RK4,
    /// Truncated Taylor series of the given order. Needs a symbolic
    /// right-hand side.
    Taylor(usize),
}

/// Options for [`solve`](super::solve).
///
/// ```
/// use steppers::solve::{Method, Options};
///
/// let options = Options::builder().h(0.1).n(9).build();
/// assert_eq!(options.method, Method::RK4);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Options {
    /// Method to use. Default: RK4.
    #[builder(default = Method::RK4)]
    pub method: Method,
    /// Step size. Negative values integrate towards smaller x.
    pub h: Float,
    /// Step count; the solution has n+2 points.
    pub n: usize,
}
