//! # Example: Empirical convergence order
//!
//! Halves h repeatedly on u' = x - u over [0, 1] and prints the endpoint error
//! of each fixed-step method together with the observed order
//! log2(e(h) / e(h/2)).

use steppers::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let f = |x: Float, u: Float| x - u;
    let exact = 2.0 * (-1.0 as Float).exp();

    for method in [Method::Euler, Method::Heun, Method::RK4] {
        println!("{:?}", method);
        let mut previous: Option<Float> = None;
        for steps in [10, 20, 40, 80, 160] {
            let options = Options::builder()
                .method(method)
                .h(1.0 / steps as Float)
                .n(steps - 1)
                .build();
            let sol = solve(&f, 0.0, 1.0, options)?;
            let (_, v) = sol.last().ok_or("empty solution")?;
            let err = (v - exact).abs();
            match previous {
                Some(p) => println!("  steps = {:>4}  error = {:.3e}  order = {:.3}", steps, err, (p / err).log2()),
                None => println!("  steps = {:>4}  error = {:.3e}", steps, err),
            }
            previous = Some(err);
        }
    }
    Ok(())
}
