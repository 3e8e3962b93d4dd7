//! Typed statement nodes.
//!
//! A statement renders either as one line or, when it owns a nested block,
//! as a header and a tail around that block. Indentation is left to the
//! driver.

use crate::{
    ast::statements::Stmt,
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    operators::{Operator, OperatorKind},
    symbols::{SymbolTable, Variable},
    typed_expr::{TypedExpr, TypedExprKind},
    types::{ReturnType, SemanticType},
};

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Variable(Variable),
    /// `a[i]`; always refers to an existing array.
    Subscript(TypedExpr),
}

impl AssignTarget {
    fn is_new(&self) -> bool {
        match self {
            AssignTarget::Variable(variable) => variable.is_new(),
            AssignTarget::Subscript(_) => false,
        }
    }

    fn existing_type(&self) -> Option<SemanticType> {
        match self {
            AssignTarget::Variable(variable) => variable.ty,
            AssignTarget::Subscript(subscript) => subscript.ty(),
        }
    }

    fn render(&self) -> Option<String> {
        match self {
            AssignTarget::Variable(variable) => variable.render(),
            AssignTarget::Subscript(subscript) => Some(subscript.text().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtText {
    Line(String),
    Block { header: String, tail: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmtKind {
    Assign {
        targets: Vec<AssignTarget>,
        value: TypedExpr,
    },
    AugAssign {
        target: TypedExpr,
        op: Operator,
        value: TypedExpr,
    },
    If {
        test: TypedExpr,
        body: Vec<TypedStmt>,
    },
    While {
        test: TypedExpr,
        body: Vec<TypedStmt>,
    },
    Return {
        value: Option<TypedExpr>,
        return_type: ReturnType,
    },
    Expression {
        expression: TypedExpr,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedStmt {
    kind: TypedStmtKind,
    text: StmtText,
    span: Span,
}

fn malformed(message: &str, span: &Span) -> Error {
    Error::new(
        ErrorImpl::MalformedNode {
            message: message.to_string(),
        },
        span.start.clone(),
    )
}

fn condition_text(test: &TypedExpr) -> String {
    if test.is_parenthesized() {
        test.text().to_string()
    } else {
        format!("({})", test.text())
    }
}

fn reject_else_branch(orelse: &[Stmt]) -> Result<(), Error> {
    match orelse.first() {
        Some(branch) => Err(Error::new(
            ErrorImpl::UnsupportedElseBranch,
            branch.get_span().start.clone(),
        )),
        None => Ok(()),
    }
}

impl TypedStmt {
    pub fn kind(&self) -> &TypedStmtKind {
        &self.kind
    }

    pub fn text(&self) -> &StmtText {
        &self.text
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// Nested statements of a conditional or loop, empty otherwise.
    pub fn body(&self) -> &[TypedStmt] {
        match &self.kind {
            TypedStmtKind::If { body, .. } | TypedStmtKind::While { body, .. } => body,
            _ => &[],
        }
    }

    /// `t0 = t1 = ... = value;`. New targets are typed from `value` and the
    /// symbol table is updated with them.
    pub fn assign(
        symbols: &mut SymbolTable,
        targets: Vec<AssignTarget>,
        value: TypedExpr,
        span: Span,
    ) -> Result<TypedStmt, Error> {
        if targets.is_empty() {
            return Err(malformed("assignment needs a target", &span));
        }

        let value_type = value.resolved_type()?;

        if targets.len() > 1 {
            if targets.iter().any(AssignTarget::is_new) {
                return Err(Error::new(
                    ErrorImpl::MultipleTargetsNotSupported {
                        message: String::from("Every target must already be defined"),
                    },
                    span.start.clone(),
                ));
            }
            if value_type.is_list() {
                return Err(Error::new(
                    ErrorImpl::MultipleTargetsNotSupported {
                        message: format!(
                            "`{}` values cannot be assigned to several targets",
                            value_type
                        ),
                    },
                    span.start.clone(),
                ));
            }
        }

        let size = match value.kind() {
            TypedExprKind::Array { size, .. } => Some(*size),
            _ => None,
        };

        let mut finalized = Vec::with_capacity(targets.len());
        for (position, target) in targets.into_iter().enumerate() {
            let target = match target {
                AssignTarget::Variable(mut variable) if variable.is_new() => {
                    let size = if position == 0 { size } else { None };
                    if value_type.is_list() && size.is_none() {
                        return Err(Error::new(
                            ErrorImpl::ArrayWithoutSize {
                                variable: variable.name.clone(),
                            },
                            span.start.clone(),
                        ));
                    }

                    symbols.bind(&variable.name, value_type, size, span.start.clone())?;
                    variable.ty = Some(value_type);
                    variable.size = size;
                    AssignTarget::Variable(variable)
                }
                target => {
                    let target_type = target.existing_type();
                    if target_type != Some(value_type) {
                        return Err(Error::new(
                            ErrorImpl::ImplicitCastNotSupported {
                                from: value_type.to_string(),
                                to: target_type.map(|ty| ty.to_string()).unwrap_or_default(),
                            },
                            span.start.clone(),
                        ));
                    }
                    target
                }
            };
            finalized.push(target);
        }

        let mut line = String::new();
        for target in &finalized {
            let rendered = target
                .render()
                .ok_or_else(|| malformed("assignment target has no rendering", &span))?;
            line.push_str(&rendered);
            line.push_str(" = ");
        }
        line.push_str(value.text());
        line.push(';');

        Ok(TypedStmt {
            kind: TypedStmtKind::Assign {
                targets: finalized,
                value,
            },
            text: StmtText::Line(line),
            span,
        })
    }

    /// `target op= value;`
    pub fn aug_assign(
        target: TypedExpr,
        op: Operator,
        value: TypedExpr,
        span: Span,
    ) -> Result<TypedStmt, Error> {
        if op.kind() != OperatorKind::Arithmetic {
            return Err(malformed("augmented assignment only takes arithmetic operators", &span));
        }
        if !matches!(
            target.kind(),
            TypedExprKind::Variable(_) | TypedExprKind::Subscript { .. }
        ) {
            return Err(malformed(
                "augmented assignment needs a variable or subscript target",
                &span,
            ));
        }

        let target_type = target.resolved_type()?;
        let value_type = value.resolved_type()?;
        let spelled = format!("{}=", op);

        if !target_type.is_numeric() || !value_type.is_numeric() {
            return Err(Error::new(
                ErrorImpl::InvalidOperandTypes {
                    operator: spelled,
                    left: target_type.to_string(),
                    right: value_type.to_string(),
                },
                span.start.clone(),
            ));
        }

        match op {
            Operator::Add | Operator::Sub | Operator::Mult if target_type != value_type => {
                return Err(Error::new(
                    ErrorImpl::ImplicitCastNotSupported {
                        from: value_type.to_string(),
                        to: target_type.to_string(),
                    },
                    span.start.clone(),
                ));
            }
            Operator::Div if target_type == SemanticType::Int => {
                return Err(Error::new(
                    ErrorImpl::UnsupportedOperation {
                        operator: spelled,
                        operands: String::from("an `int` target"),
                    },
                    span.start.clone(),
                ));
            }
            Operator::FloorDiv | Operator::Mod
                if target_type != SemanticType::Int || value_type != SemanticType::Int =>
            {
                return Err(Error::new(
                    ErrorImpl::UnsupportedOperation {
                        operator: spelled,
                        operands: format!("`{}` target and `{}` value", target_type, value_type),
                    },
                    span.start.clone(),
                ));
            }
            _ => {}
        }

        let line = format!("{} {}= {};", target.text(), op.spelling(), value.text());
        Ok(TypedStmt {
            kind: TypedStmtKind::AugAssign { target, op, value },
            text: StmtText::Line(line),
            span,
        })
    }

    /// `if (test) { body }`. An `else`/`elif` branch is rejected.
    pub fn if_stmt(
        test: TypedExpr,
        body: Vec<TypedStmt>,
        orelse: &[Stmt],
        span: Span,
    ) -> Result<TypedStmt, Error> {
        reject_else_branch(orelse)?;

        let header = format!("if {} {{", condition_text(&test));
        Ok(TypedStmt {
            kind: TypedStmtKind::If { test, body },
            text: StmtText::Block {
                header,
                tail: String::from("}"),
            },
            span,
        })
    }

    pub fn while_stmt(
        test: TypedExpr,
        body: Vec<TypedStmt>,
        orelse: &[Stmt],
        span: Span,
    ) -> Result<TypedStmt, Error> {
        reject_else_branch(orelse)?;

        let header = format!("while {} {{", condition_text(&test));
        Ok(TypedStmt {
            kind: TypedStmtKind::While { test, body },
            text: StmtText::Block {
                header,
                tail: String::from("}"),
            },
            span,
        })
    }

    /// `return value;`, or `return;` for a bare return (typed `void`).
    pub fn return_stmt(value: Option<TypedExpr>, span: Span) -> Result<TypedStmt, Error> {
        let (return_type, line) = match &value {
            Some(value) => (
                ReturnType::Value(value.resolved_type()?),
                format!("return {};", value.text()),
            ),
            None => (ReturnType::Void, String::from("return;")),
        };

        Ok(TypedStmt {
            kind: TypedStmtKind::Return { value, return_type },
            text: StmtText::Line(line),
            span,
        })
    }

    pub fn expression(expression: TypedExpr, span: Span) -> Result<TypedStmt, Error> {
        let line = format!("{};", expression.text());
        Ok(TypedStmt {
            kind: TypedStmtKind::Expression { expression },
            text: StmtText::Line(line),
            span,
        })
    }
}
