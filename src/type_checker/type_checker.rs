use log::trace;

use crate::{
    ast::{
        expressions::{Expr, Literal},
        statements::Stmt,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    operators::Operator,
    symbols::SymbolTable,
    typed_expr::TypedExpr,
    typed_stmt::{AssignTarget, TypedStmt},
};

/// Array literal elements are constants, optionally signed.
fn array_element(expr: &Expr) -> Result<Literal, Error> {
    match expr {
        Expr::Constant { value, .. } => Ok(*value),
        Expr::Unary { op, operand, .. } => match (op, operand.as_ref()) {
            (
                Operator::UAdd,
                Expr::Constant {
                    value: value @ (Literal::Int(_) | Literal::Float(_)),
                    ..
                },
            ) => Ok(*value),
            (Operator::USub, Expr::Constant { value: Literal::Int(value), .. }) => {
                Ok(Literal::Int(-value))
            }
            (Operator::USub, Expr::Constant { value: Literal::Float(value), .. }) => {
                Ok(Literal::Float(-value))
            }
            _ => Err(non_literal_element(expr)),
        },
        _ => Err(non_literal_element(expr)),
    }
}

fn non_literal_element(expr: &Expr) -> Error {
    Error::new(
        ErrorImpl::MalformedNode {
            message: String::from("Array literal elements must be numeric constants"),
        },
        expr.get_span().start.clone(),
    )
}

pub fn lower_expr(symbols: &SymbolTable, expr: &Expr) -> Result<TypedExpr, Error> {
    let span = expr.get_span().clone();

    match expr {
        Expr::Name { id, .. } => TypedExpr::variable(symbols, id, span),
        Expr::Constant { value, .. } => TypedExpr::constant(*value, span),
        Expr::List { elements, .. } => {
            let elements = elements
                .iter()
                .map(array_element)
                .collect::<Result<Vec<Literal>, Error>>()?;
            TypedExpr::array(elements, span)
        }
        Expr::Compare { left, ops, comparators, .. } => {
            let left = lower_expr(symbols, left)?;
            let comparators = comparators
                .iter()
                .map(|comparator| lower_expr(symbols, comparator))
                .collect::<Result<Vec<TypedExpr>, Error>>()?;
            TypedExpr::compare(left, ops.clone(), comparators, span)
        }
        Expr::Binary { left, op, right, .. } => {
            let left = lower_expr(symbols, left)?;
            let right = lower_expr(symbols, right)?;
            TypedExpr::binary(left, *op, right, span)
        }
        Expr::Unary { op, operand, .. } => {
            let operand = lower_expr(symbols, operand)?;
            TypedExpr::unary(*op, operand, span)
        }
        Expr::BoolOp { op, values, .. } => {
            let values = values
                .iter()
                .map(|value| lower_expr(symbols, value))
                .collect::<Result<Vec<TypedExpr>, Error>>()?;
            TypedExpr::bool_chain(*op, values, span)
        }
        Expr::Subscript { value, slice, .. } => {
            let value = lower_expr(symbols, value)?;
            let index = TypedExpr::index(lower_expr(symbols, slice)?)?;
            TypedExpr::subscript(value, index, span)
        }
        Expr::Call { callee, arguments, .. } => {
            let arguments = arguments
                .iter()
                .map(|argument| lower_expr(symbols, argument))
                .collect::<Result<Vec<TypedExpr>, Error>>()?;
            TypedExpr::call(symbols, callee, arguments, span)
        }
    }
}

pub fn lower_target(symbols: &mut SymbolTable, target: &Expr) -> Result<AssignTarget, Error> {
    match target {
        Expr::Name { id, .. } => Ok(AssignTarget::Variable(symbols.resolve_binding_target(id))),
        Expr::Subscript { .. } => Ok(AssignTarget::Subscript(lower_expr(symbols, target)?)),
        _ => Err(Error::new(
            ErrorImpl::MalformedNode {
                message: String::from("Only names and subscripts can be assigned to"),
            },
            target.get_span().start.clone(),
        )),
    }
}

pub fn lower_stmt(symbols: &mut SymbolTable, stmt: &Stmt) -> Result<TypedStmt, Error> {
    let span = stmt.get_span().clone();

    let lowered = match stmt {
        Stmt::Assign { targets, value, .. } => {
            let value = lower_expr(symbols, value)?;
            let targets = targets
                .iter()
                .map(|target| lower_target(symbols, target))
                .collect::<Result<Vec<AssignTarget>, Error>>()?;
            TypedStmt::assign(symbols, targets, value, span)
        }
        Stmt::AugAssign { target, op, value, .. } => {
            let value = lower_expr(symbols, value)?;
            let target = lower_expr(symbols, target)?;
            TypedStmt::aug_assign(target, *op, value, span)
        }
        Stmt::If { test, body, orelse, .. } => {
            let test = lower_expr(symbols, test)?;
            let body = lower_block(symbols, body)?;
            TypedStmt::if_stmt(test, body, orelse, span)
        }
        Stmt::While { test, body, orelse, .. } => {
            let test = lower_expr(symbols, test)?;
            let body = lower_block(symbols, body)?;
            TypedStmt::while_stmt(test, body, orelse, span)
        }
        Stmt::Return { value, .. } => {
            let value = match value {
                Some(value) => Some(lower_expr(symbols, value)?),
                None => None,
            };
            TypedStmt::return_stmt(value, span)
        }
        Stmt::Expression { expression, .. } => {
            let expression = lower_expr(symbols, expression)?;
            TypedStmt::expression(expression, span)
        }
    }?;

    trace!("lowered statement: {:?}", lowered.text());
    Ok(lowered)
}

pub fn lower_block(symbols: &mut SymbolTable, block: &[Stmt]) -> Result<Vec<TypedStmt>, Error> {
    block.iter().map(|stmt| lower_stmt(symbols, stmt)).collect()
}
