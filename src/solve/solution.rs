//! Solution type for solve: grid, trace and stats.

use crate::Float;

use super::Method;

/// Grid and trace of a fixed-step solve plus basic stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: Vec<Float>,
    pub v: Vec<Float>,
    /// Evaluations of the right-hand side. For Taylor this counts every
    /// evaluated partial derivative.
    pub nfev: usize,
    pub method: Method,
}

impl Solution {
    /// Iterate over `(x_k, v_k)` pairs.
    pub fn iter(&self) -> SolutionIter<'_> {
        SolutionIter {
            x_iter: self.x.iter(),
            v_iter: self.v.iter(),
        }
    }

    /// The final `(x, v)` pair.
    pub fn last(&self) -> Option<(Float, Float)> {
        Some((*self.x.last()?, *self.v.last()?))
    }
}

/// Iterator over (x, v) pairs of a [`Solution`].
pub struct SolutionIter<'a> {
    x_iter: std::slice::Iter<'a, Float>,
    v_iter: std::slice::Iter<'a, Float>,
}

impl Iterator for SolutionIter<'_> {
    type Item = (Float, Float);

    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.x_iter.next()?, *self.v_iter.next()?))
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = (Float, Float);
    type IntoIter = SolutionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
