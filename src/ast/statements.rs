use crate::{type_checker::operators::Operator, Span};

use super::expressions::Expr;

/// Statement kinds produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `t0 = t1 = ... = value`
    Assign {
        targets: Vec<Expr>,
        value: Expr,
        span: Span,
    },
    AugAssign {
        target: Expr,
        op: Operator,
        value: Expr,
        span: Span,
    },
    /// `elif` chains are stored as a nested `If` inside `orelse`.
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        span: Span,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
    Expression {
        expression: Expr,
        span: Span,
    },
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Assign { span, .. }
            | Stmt::AugAssign { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Expression { span, .. } => span,
        }
    }
}
