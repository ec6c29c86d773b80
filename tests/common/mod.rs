//! Common utilities for integration tests

use steppers::{Float, ODE};

/// u' = x - u, with u = x - 1 + (u0 + 1 - x0) e^{x0 - x}.
pub struct XMinusU;

impl ODE for XMinusU {
    fn ode(&self, x: Float, u: Float) -> Float {
        x - u
    }
}

impl XMinusU {
    pub const EXPR: &'static str = "x - u";

    pub fn exact(x0: Float, u0: Float, x: Float) -> Float {
        x - 1.0 + (u0 + 1.0 - x0) * (x0 - x).exp()
    }
}

/// u' = -k u
pub struct ExponentialDecay {
    pub k: Float,
}

impl ODE for ExponentialDecay {
    fn ode(&self, _x: Float, u: Float) -> Float {
        -self.k * u
    }
}

/// Ratios e[i] / e[i+1] of successive errors.
pub fn ratios(errors: &[Float]) -> Vec<Float> {
    errors.windows(2).map(|w| w[0] / w[1]).collect()
}

/// Assert every ratio lies in `lo..hi`.
pub fn assert_ratios_within(name: &str, errors: &[Float], lo: Float, hi: Float) {
    for (i, ratio) in ratios(errors).into_iter().enumerate() {
        println!("{} convergence ratio {}->{}: {}", name, i, i + 1, ratio);
        assert!(
            ratio > lo && ratio < hi,
            "{}: ratio {} outside ({}, {})",
            name,
            ratio,
            lo,
            hi
        );
    }
}
