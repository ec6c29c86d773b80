use steppers::prelude::*;

mod common;
use common::XMinusU;

const X0: Float = 0.0;
const U0: Float = 1.0;
const H: Float = 0.1;
const N: usize = 2;

fn fixed_step_traces() -> Vec<(&'static str, Vec<Float>)> {
    let f: Expr = XMinusU::EXPR.parse().unwrap();
    let roles = Roles::default();
    vec![
        ("euler", euler_method(X0, U0, H, N, &XMinusU).unwrap()),
        ("heun", heun_method(X0, U0, H, N, &XMinusU).unwrap()),
        ("rk4", rk4(X0, U0, H, N, &XMinusU).unwrap()),
        ("taylor", taylor_method(X0, U0, H, N, &f, &roles, 1).unwrap()),
    ]
}

#[test]
fn every_fixed_step_method_returns_n_plus_two_values() {
    for (name, v) in fixed_step_traces() {
        assert_eq!(v.len(), N + 2, "{}", name);
        assert_eq!(v[0], U0, "{}", name);
        assert!(v.iter().all(|u| u.is_finite()), "{}", name);
    }
}

#[test]
fn methods_close_to_exact_solution() {
    let exact = XMinusU::exact(X0, U0, X0 + (N + 1) as Float * H);
    let tolerance = [("euler", 5e-2), ("heun", 2e-3), ("rk4", 1e-6), ("taylor", 5e-2)];
    for ((name, v), (_, tol)) in fixed_step_traces().into_iter().zip(tolerance) {
        let err = (v[N + 1] - exact).abs();
        assert!(err < tol, "{}: error {} >= {}", name, err, tol);
    }
}

#[test]
fn taylor_order_one_matches_euler_exactly() {
    let f: Expr = "x*u - sin(u) + x^2".parse().unwrap();
    let closure = |x: Float, u: Float| x * u - u.sin() + x * x;
    let roles = Roles::default();
    for h in [0.3, 0.1, -0.05] {
        let e = euler_method(0.5, 2.0, h, 7, &closure).unwrap();
        let t = taylor_method(0.5, 2.0, h, 7, &f, &roles, 1).unwrap();
        assert_eq!(e, t, "h = {}", h);
    }
}

#[test]
fn rk4_reproduces_polynomial_solutions() {
    // u = x^2 + 1 solves u' = 2x; u = x^4 solves u' = 4x^3
    let v = rk4(0.0, 1.0, 0.25, 6, &|x: Float, _u: Float| 2.0 * x).unwrap();
    for (k, vk) in v.iter().enumerate() {
        let x = 0.25 * k as Float;
        assert!((vk - (x * x + 1.0)).abs() < 1e-12);
    }
    let v = rk4(0.0, 0.0, 0.5, 4, &|x: Float, _u: Float| 4.0 * x * x * x).unwrap();
    assert!((v[5] - 2.5_f64.powi(4) as Float).abs() < 1e-10);
}

#[test]
fn solve_front_end_matches_direct_calls() {
    let options = |method: Method| Options::builder().method(method).h(H).n(N).build();
    for (method, direct) in [
        (Method::Euler, euler_method(X0, U0, H, N, &XMinusU).unwrap()),
        (Method::Heun, heun_method(X0, U0, H, N, &XMinusU).unwrap()),
        (Method::RK4, rk4(X0, U0, H, N, &XMinusU).unwrap()),
    ] {
        let sol = solve(&XMinusU, X0, U0, options(method)).unwrap();
        assert_eq!(sol.v, direct);
        assert_eq!(sol.x.len(), N + 2);
    }

    let f: Expr = XMinusU::EXPR.parse().unwrap();
    let sol = solve_expr(&f, &Roles::default(), X0, U0, options(Method::Taylor(2))).unwrap();
    assert_eq!(sol.v, taylor_method(X0, U0, H, N, &f, &Roles::default(), 2).unwrap());
}

#[test]
fn renamed_roles() {
    let f: Expr = "t - y".parse().unwrap();
    let roles = Roles::new("t", "y");
    let a = taylor_method(X0, U0, H, N, &f, &roles, 1).unwrap();
    let b = euler_method(X0, U0, H, N, &XMinusU).unwrap();
    assert_eq!(a, b);
}
