//! Errors for the stepping methods and the symbolic engine

use thiserror::Error;

use crate::{Float, solve::Method};

/// Errors returned by the method entry points and the symbolic engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("step size h must be finite (got {0})")]
    InvalidStepSize(Float),
    #[error("step count n must be non-negative (got {0})")]
    InvalidStepCount(i64),
    #[error("taylor order must be at least 1 (got {0})")]
    InvalidOrder(i64),
    #[error("iteration count must be non-negative (got {0})")]
    InvalidIterationCount(i64),
    #[error("parse error at {position}: {message}")]
    Parse { position: usize, message: String },
    #[error("symbol '{0}' has no value bound")]
    UnboundSymbol(String),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("method {0:?} needs a symbolic right-hand side; use solve_expr")]
    RequiresExpression(Method),
}

impl Error {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            position,
            message: message.into(),
        }
    }
}
