//! # Example: Comparing the five methods
//!
//! u'(x) = x - u, u(0) = 1, exact solution u = x - 1 + 2 e^{-x}.
//!
//! Runs Euler, Heun, RK4 and Taylor (order 3) with h = 0.1 and n = 2, then
//! the Picard iterates evaluated at x = 0.1, 0.2, 0.3.
//!
//! Set `RUST_LOG=trace` to see every step.

use steppers::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let (x0, u0, h, n) = (0.0, 1.0, 0.1, 2);
    let f = |x: Float, u: Float| x - u;
    let expr: Expr = "x - u".parse()?;
    let roles = Roles::default();
    let exact = |x: Float| x - 1.0 + 2.0 * (-x).exp();

    log::info!("Solving u' = {} with h = {}, n = {}.", expr, h, n);

    let traces = [
        ("Euler", euler_method(x0, u0, h, n, &f)?),
        ("Heun", heun_method(x0, u0, h, n, &f)?),
        ("RK4", rk4(x0, u0, h, n, &f)?),
        ("Taylor(3)", taylor_method(x0, u0, h, n, &expr, &roles, 3)?),
    ];
    for (name, v) in &traces {
        println!("{:<10} {:?}", name, v);
    }
    let grid: Vec<Float> = (0..n + 2).map(|k| x0 + k as Float * h).collect();
    println!("{:<10} {:?}", "exact", grid.iter().map(|&x| exact(x)).collect::<Vec<_>>());

    let phi = picard_approximation(x0, u0, &expr, &roles, 4)?;
    println!("\nPicard φ4(x) = {}", phi);
    for x_eval in [0.1, 0.2, 0.3] {
        let p = picard_method(x0, u0, &expr, &roles, x_eval, 4)?;
        println!("  φ4({}) = {}   exact = {:.10}", x_eval, p, exact(x_eval));
    }

    Ok(())
}
