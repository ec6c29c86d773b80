//! Python bindings (feature `python`).
//!
//! Exposes the five methods as the `steppers` extension module. Traces come
//! back as `numpy.ndarray`. Symbolic right-hand sides are passed as strings
//! such as `"x - u"`.

use std::cell::RefCell;

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::grid::{iteration_count, step_count, taylor_order};
use crate::{Error, Expr, Float, ODE, Roles, methods};

impl From<Error> for PyErr {
    fn from(e: Error) -> Self {
        PyValueError::new_err(e.to_string())
    }
}

/// Wrapper that implements `ODE` for a Python callable `f(x, u) -> float`.
///
/// The first exception raised by the callable is kept and re-raised once the
/// method returns; the remaining evaluations see NaN.
struct PyODE<'py> {
    fun: Bound<'py, PyAny>,
    error: RefCell<Option<PyErr>>,
}

impl<'py> PyODE<'py> {
    fn new(fun: Bound<'py, PyAny>) -> Self {
        Self {
            fun,
            error: RefCell::new(None),
        }
    }

    fn raise(self) -> PyResult<()> {
        match self.error.into_inner() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ODE for PyODE<'_> {
    fn ode(&self, x: Float, u: Float) -> Float {
        if self.error.borrow().is_some() {
            return Float::NAN;
        }
        let value = self
            .fun
            .call1((x, u))
            .and_then(|r| r.extract::<Float>().map_err(Into::into));
        match value {
            Ok(v) => v,
            Err(e) => {
                *self.error.borrow_mut() = Some(e);
                Float::NAN
            }
        }
    }
}

/// Run a fixed-step method on a Python callable.
fn fixed_step<'py, M>(py: Python<'py>, n: i64, f: Bound<'py, PyAny>, method: M) -> PyResult<Bound<'py, PyArray1<Float>>>
where
    M: FnOnce(usize, &PyODE<'py>) -> Result<Vec<Float>, Error>,
{
    let n = step_count(n)?;
    let rhs = PyODE::new(f);
    let v = method(n, &rhs);
    rhs.raise()?;
    Ok(PyArray1::from_vec(py, v?))
}

#[pyfunction]
#[pyo3(name = "euler_method")]
#[pyo3(signature = (x0, u0, h, n, f))]
/// Explicit Euler. Returns the n+2 values v[0..n+1] with v[0] = u0.
fn euler_method_py<'py>(
    py: Python<'py>,
    x0: Float,
    u0: Float,
    h: Float,
    n: i64,
    f: Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<Float>>> {
    fixed_step(py, n, f, |n, rhs| methods::euler_method(x0, u0, h, n, rhs))
}

#[pyfunction]
#[pyo3(name = "heun_method")]
#[pyo3(signature = (x0, u0, h, n, f))]
/// Heun's predictor-corrector method. Returns n+2 values.
fn heun_method_py<'py>(
    py: Python<'py>,
    x0: Float,
    u0: Float,
    h: Float,
    n: i64,
    f: Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<Float>>> {
    fixed_step(py, n, f, |n, rhs| methods::heun_method(x0, u0, h, n, rhs))
}

#[pyfunction]
#[pyo3(name = "rk4")]
#[pyo3(signature = (x0, u0, h, n, f))]
/// Classical fourth-order Runge-Kutta. Returns n+2 values.
fn rk4_py<'py>(
    py: Python<'py>,
    x0: Float,
    u0: Float,
    h: Float,
    n: i64,
    f: Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<Float>>> {
    fixed_step(py, n, f, |n, rhs| methods::rk4(x0, u0, h, n, rhs))
}

#[pyfunction]
#[pyo3(name = "taylor_method")]
#[pyo3(signature = (x0, u0, h, n, f, order, x = "x", u = "u"))]
/// Truncated Taylor series of the given order for the expression `f` in the
/// variables named by `x` and `u`.
#[allow(clippy::too_many_arguments)]
fn taylor_method_py<'py>(
    py: Python<'py>,
    x0: Float,
    u0: Float,
    h: Float,
    n: i64,
    f: &str,
    order: i64,
    x: &str,
    u: &str,
) -> PyResult<Bound<'py, PyArray1<Float>>> {
    let expr: Expr = f.parse()?;
    let roles = Roles::new(x, u);
    let v = methods::taylor_method(x0, u0, h, step_count(n)?, &expr, &roles, taylor_order(order)?)?;
    Ok(PyArray1::from_vec(py, v))
}

#[pyfunction]
#[pyo3(name = "picard_method")]
#[pyo3(signature = (x0, u0, f, x_eval, n_iterations, x = "x", u = "u"))]
/// Picard iterate evaluated at `x_eval`.
///
/// Returns a float, or the expression as a string when it still contains
/// integrals without a closed form or symbols other than `x` and `u`.
#[allow(clippy::too_many_arguments)]
fn picard_method_py<'py>(
    py: Python<'py>,
    x0: Float,
    u0: Float,
    f: &str,
    x_eval: Float,
    n_iterations: i64,
    x: &str,
    u: &str,
) -> PyResult<Bound<'py, PyAny>> {
    let expr: Expr = f.parse()?;
    let roles = Roles::new(x, u);
    let p = methods::picard_method(x0, u0, &expr, &roles, x_eval, iteration_count(n_iterations)?)?;
    match p.as_const() {
        Some(v) => Ok(v.into_pyobject(py)?.into_any()),
        None => Ok(p.to_string().into_pyobject(py)?.into_any()),
    }
}

#[pymodule]
fn steppers(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(euler_method_py, m)?)?;
    m.add_function(wrap_pyfunction!(heun_method_py, m)?)?;
    m.add_function(wrap_pyfunction!(rk4_py, m)?)?;
    m.add_function(wrap_pyfunction!(taylor_method_py, m)?)?;
    m.add_function(wrap_pyfunction!(picard_method_py, m)?)?;

    let doc = "Classical methods for u' = f(x, u), u(x0) = u0.\n\n\
               euler_method, heun_method and rk4 take a Python callable f(x, u).\n\
               taylor_method and picard_method take f as an expression string.";
    m.add("__doc__", doc)?;
    Ok(())
}
