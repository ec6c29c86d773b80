//! solve / solve_expr entry points: dispatch by method

use std::cell::Cell;

use crate::{
    Error, Float, ODE,
    grid::grid,
    methods::{euler_method, heun_method, rk4, taylor_method},
    symbolic::{Expr, ExprODE, Roles},
};

use super::{
    options::{Method, Options},
    solution::Solution,
};

/// Solve u' = f(x, u), u(x0) = u0 with a numeric right-hand side.
///
/// [`Method::Taylor`] needs symbolic derivatives and is rejected with
/// [`Error::RequiresExpression`]; use [`solve_expr`] for it.
///
/// ```
/// use steppers::solve::{solve, Method, Options};
///
/// let options = Options::builder().method(Method::Heun).h(0.1).n(2).build();
/// let sol = solve(&|x: f64, u: f64| x - u, 0.0, 1.0, options).unwrap();
/// assert_eq!(sol.v.len(), 4);
/// assert_eq!(sol.nfev, 6);
/// ```
pub fn solve<F>(f: &F, x0: Float, u0: Float, options: Options) -> Result<Solution, Error>
where
    F: ODE + ?Sized,
{
    let Options { method, h, n } = options;
    let counted = Counted {
        f,
        calls: Cell::new(0),
    };

    // Dispatch by method
    let v = match method {
        Method::Euler => euler_method(x0, u0, h, n, &counted)?,
        Method::Heun => heun_method(x0, u0, h, n, &counted)?,
        Method::RK4 => rk4(x0, u0, h, n, &counted)?,
        Method::Taylor(_) => return Err(Error::RequiresExpression(method)),
    };

    Ok(Solution {
        x: grid(x0, h, n),
        v,
        nfev: counted.calls.get(),
        method,
    })
}

/// Solve with a symbolic right-hand side. Supports every [`Method`].
///
/// Symbols of `f` other than the two roles are rejected with
/// [`Error::UnboundSymbol`].
pub fn solve_expr(f: &Expr, roles: &Roles, x0: Float, u0: Float, options: Options) -> Result<Solution, Error> {
    match options.method {
        Method::Taylor(order) => {
            let Options { method, h, n } = options;
            let v = taylor_method(x0, u0, h, n, f, roles, order)?;
            Ok(Solution {
                x: grid(x0, h, n),
                v,
                nfev: order * (n + 1),
                method,
            })
        }
        _ => solve(&ExprODE::new(f, roles)?, x0, u0, options),
    }
}

/// Counts calls to the wrapped right-hand side.
struct Counted<'a, F: ?Sized> {
    f: &'a F,
    calls: Cell<usize>,
}

impl<F: ODE + ?Sized> ODE for Counted<'_, F> {
    fn ode(&self, x: Float, u: Float) -> Float {
        self.calls.set(self.calls.get() + 1);
        self.f.ode(x, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn options(method: Method) -> Options {
        Options::builder().method(method).h(0.1).n(2).build()
    }

    #[test]
    fn counts_evaluations() {
        let f = |x: Float, u: Float| x - u;
        assert_eq!(solve(&f, 0.0, 1.0, options(Method::Euler)).unwrap().nfev, 3);
        assert_eq!(solve(&f, 0.0, 1.0, options(Method::RK4)).unwrap().nfev, 12);
    }

    #[test]
    fn taylor_needs_an_expression() {
        let f = |x: Float, u: Float| x - u;
        assert_eq!(
            solve(&f, 0.0, 1.0, options(Method::Taylor(2))),
            Err(Error::RequiresExpression(Method::Taylor(2)))
        );
    }

    #[test]
    fn expression_and_closure_agree() {
        let expr: Expr = "x - u".parse().unwrap();
        let roles = Roles::default();
        let a = solve_expr(&expr, &roles, 0.0, 1.0, options(Method::RK4)).unwrap();
        let b = solve(&|x: Float, u: Float| x - u, 0.0, 1.0, options(Method::RK4)).unwrap();
        assert_eq!(a, b);

        let t = solve_expr(&expr, &roles, 0.0, 1.0, options(Method::Taylor(1))).unwrap();
        let e = solve(&|x: Float, u: Float| x - u, 0.0, 1.0, options(Method::Euler)).unwrap();
        assert_eq!(t.v, e.v);
        assert_eq!(t.x, e.x);
    }

    #[test]
    fn solution_iteration() {
        let sol = solve(&|_x: Float, u: Float| u, 0.0, 1.0, options(Method::Euler)).unwrap();
        let pairs: Vec<_> = sol.iter().collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], (0.0, 1.0));
        let (x, v) = sol.last().unwrap();
        assert_relative_eq!(x, 0.3, epsilon = 1e-15);
        assert_relative_eq!(v, 1.331, epsilon = 1e-12);
    }
}
