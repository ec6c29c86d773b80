//! Classical numerical methods for the scalar initial value problem
//! u'(x) = f(x, u), u(x0) = u0.
//!
//! Fixed-step methods ([`euler_method`], [`heun_method`], [`rk4`]) take any
//! [`ODE`] right-hand side, closures included. The series and fixed-point
//! methods ([`taylor_method`], [`picard_method`]) take a symbolic [`Expr`]
//! together with the [`Roles`] naming which symbols play x and u.
//!
//! ```
//! use steppers::prelude::*;
//!
//! let v = euler_method(0.0, 1.0, 0.1, 2, &|x: f64, u: f64| x - u).unwrap();
//! assert_eq!(v.len(), 4);
//!
//! let f: Expr = "x - u".parse().unwrap();
//! let p = picard_method(0.0, 1.0, &f, &Roles::default(), 0.1, 4).unwrap();
//! assert!(p.is_closed_form());
//! ```

mod error;
mod grid;
mod ode;

pub mod methods;
pub mod prelude;
pub mod solve;
pub mod symbolic;

#[cfg(feature = "python")]
mod python;

pub use error::Error;
pub use methods::{
    euler_method, heun_method, picard_approximation, picard_method, rk4, taylor_method,
};
pub use ode::ODE;
pub use symbolic::{Expr, Roles, Symbol};

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Change this to f128, f64, f32 as desired.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
