//! High-level front-end: pick a method through [`Options`] and get the grid,
//! the trace and evaluation counts back as one [`Solution`].

pub mod options;
pub mod solution;
pub mod dispatch;

// Re-exports for ergonomic access via crate::solve::* and prelude
pub use options::{Method, Options};
pub use solution::Solution;
pub use dispatch::{solve, solve_expr};
