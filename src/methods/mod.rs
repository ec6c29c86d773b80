//! The five methods for u' = f(x, u), u(x0) = u0.
//!
//! Every method returns a trace aligned with the grid
//! x0, x0 + h, ..., x0 + (n+1)h: n+2 values with `v[0] = u0`.

mod euler;
mod heun;
mod picard;
mod rk4;
mod taylor;

pub use euler::euler_method;
pub use heun::heun_method;
pub use picard::{picard_approximation, picard_approximation_with, picard_method, picard_method_with};
pub use rk4::rk4;
pub use taylor::{taylor_method, taylor_method_with};
