use crate::{Error, Float, ODE};

use super::{Bindings, Expr, Quadrature, Roles};

/// A symbolic right-hand side viewed as a numeric [`ODE`].
///
/// Construction checks that every free symbol of the expression is one of
/// the roles, so evaluation can only fail on arithmetic, which surfaces as
/// NaN or an infinity in the trace.
#[derive(Clone, Debug)]
pub struct ExprODE<'a> {
    expr: &'a Expr,
    roles: &'a Roles,
    quadrature: Quadrature,
}

impl<'a> ExprODE<'a> {
    pub fn new(expr: &'a Expr, roles: &'a Roles) -> Result<Self, Error> {
        if let Some(s) = expr.free_symbols().into_iter().find(|s| !roles.contains(s)) {
            return Err(Error::UnboundSymbol(s.name().to_string()));
        }
        Ok(Self {
            expr,
            roles,
            quadrature: Quadrature::default(),
        })
    }

    pub fn with_quadrature(mut self, quadrature: Quadrature) -> Self {
        self.quadrature = quadrature;
        self
    }
}

impl ODE for ExprODE<'_> {
    fn ode(&self, x: Float, u: Float) -> Float {
        let bindings = Bindings::new()
            .bind(self.roles.x.clone(), x)
            .bind(self.roles.u.clone(), u);
        self.expr
            .eval_with(&bindings, &self.quadrature)
            .unwrap_or(Float::NAN)
    }
}
