use std::fmt::Display;

use crate::{type_checker::operators::Operator, Span};

/// Literal values that can appear in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Int(value) => write!(f, "{}", value),
            // Debug keeps the fractional part: 2.0 stays `2.0`
            Literal::Float(value) => write!(f, "{:?}", value),
        }
    }
}

/// Expression kinds produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name {
        id: String,
        span: Span,
    },
    Constant {
        value: Literal,
        span: Span,
    },
    List {
        elements: Vec<Expr>,
        span: Span,
    },
    /// `left op0 c0 op1 c1 ...`
    Compare {
        left: Box<Expr>,
        ops: Vec<Operator>,
        comparators: Vec<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
        span: Span,
    },
    Unary {
        op: Operator,
        operand: Box<Expr>,
        span: Span,
    },
    /// A run of the same boolean operator, flattened: `a and b and c`.
    BoolOp {
        op: Operator,
        values: Vec<Expr>,
        span: Span,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
        span: Span,
    },
    Call {
        callee: String,
        arguments: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Name { span, .. }
            | Expr::Constant { span, .. }
            | Expr::List { span, .. }
            | Expr::Compare { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Unary { span, .. }
            | Expr::BoolOp { span, .. }
            | Expr::Subscript { span, .. }
            | Expr::Call { span, .. } => span,
        }
    }
}
