//! User-supplied right-hand side.

use crate::Float;

/// User-supplied right-hand side u' = f(x, u).
///
/// Implement this trait for your problem, or pass a closure: every
/// `Fn(Float, Float) -> Float` is an `ODE`. The fixed-step methods call
/// `ode` with the abscissa `x` and the current value `u` and use the
/// returned slope.
///
/// # Example
///
/// ```
/// use steppers::{ODE, Float};
///
/// struct Decay { k: Float }
/// impl ODE for Decay {
///     fn ode(&self, _x: Float, u: Float) -> Float {
///         -self.k * u
///     }
/// }
///
/// let v = steppers::rk4(0.0, 1.0, 0.1, 9, &Decay { k: 2.0 }).unwrap();
/// assert_eq!(v.len(), 11);
/// ```
pub trait ODE {
    fn ode(&self, x: Float, u: Float) -> Float;
}

impl<F> ODE for F
where
    F: Fn(Float, Float) -> Float,
{
    fn ode(&self, x: Float, u: Float) -> Float {
        self(x, u)
    }
}
