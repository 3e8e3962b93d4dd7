//! Typed expression nodes.
//!
//! Every constructor validates its operands, derives the node's type and
//! renders its target text in one step. A `TypedExpr` that exists is legal;
//! there is no later pass that checks it again.

use crate::{
    ast::expressions::Literal,
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    operators::{Operator, OperatorKind},
    symbols::{SymbolTable, Variable},
    types::{ReturnType, SemanticType},
};

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    Variable(Variable),
    Constant(Literal),
    Array {
        elements: Vec<Literal>,
        size: usize,
    },
    Compare {
        left: Box<TypedExpr>,
        ops: Vec<Operator>,
        comparators: Vec<TypedExpr>,
    },
    Binary {
        left: Box<TypedExpr>,
        op: Operator,
        right: Box<TypedExpr>,
    },
    Unary {
        op: Operator,
        operand: Box<TypedExpr>,
    },
    BoolChain {
        op: Operator,
        values: Vec<TypedExpr>,
    },
    Subscript {
        value: Box<TypedExpr>,
        index: Box<TypedExpr>,
    },
    Index {
        value: Box<TypedExpr>,
    },
    /// `return_type` is `None` when the callee is unknown.
    Call {
        callee: String,
        arguments: Vec<TypedExpr>,
        return_type: Option<ReturnType>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    kind: TypedExprKind,
    ty: Option<SemanticType>,
    text: String,
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

impl TypedExpr {
    pub fn kind(&self) -> &TypedExprKind {
        &self.kind
    }

    /// The node's type; `None` only for calls to unknown or `void` callees
    /// and unary operators applied to them.
    pub fn ty(&self) -> Option<SemanticType> {
        self.ty
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    /// The node's type for positions that need one.
    pub fn resolved_type(&self) -> Result<SemanticType, Error> {
        if let Some(ty) = self.ty {
            return Ok(ty);
        }

        match &self.kind {
            TypedExprKind::Unary { operand, .. } => operand.resolved_type(),
            TypedExprKind::Call {
                return_type: Some(ReturnType::Void),
                ..
            } => Err(Error::new(
                ErrorImpl::UnsupportedType {
                    type_: String::from("void"),
                },
                self.span.start.clone(),
            )),
            TypedExprKind::Call { callee, .. } => Err(Error::new(
                ErrorImpl::UnresolvedReturnType {
                    function: callee.clone(),
                },
                self.span.start.clone(),
            )),
            _ => Err(malformed("expression has no type", &self.span)),
        }
    }

    /// True when the text is already wrapped in parentheses by construction.
    pub fn is_parenthesized(&self) -> bool {
        matches!(
            self.kind,
            TypedExprKind::Compare { .. }
                | TypedExprKind::Binary { .. }
                | TypedExprKind::Unary { .. }
                | TypedExprKind::BoolChain { .. }
        )
    }

    /// A read of a bound name.
    pub fn variable(symbols: &SymbolTable, name: &str, span: Span) -> Result<TypedExpr, Error> {
        let variable = symbols.resolve_reference(name, span.start.clone())?;
        let text = variable
            .render()
            .ok_or_else(|| malformed("variable reference has no rendering", &span))?;

        Ok(TypedExpr {
            ty: variable.ty,
            kind: TypedExprKind::Variable(variable),
            text,
            span,
        })
    }

    pub fn constant(value: Literal, span: Span) -> Result<TypedExpr, Error> {
        let ty = match value {
            Literal::Bool(_) => SemanticType::Bool,
            Literal::Int(_) => SemanticType::Int,
            Literal::Float(number) if number.is_finite() => SemanticType::Float,
            Literal::Float(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: value.to_string(),
                    },
                    span.start.clone(),
                ))
            }
        };

        Ok(TypedExpr {
            kind: TypedExprKind::Constant(value),
            ty: Some(ty),
            text: value.to_string(),
            span,
        })
    }

    /// `{e0, e1, ...}`; all elements `int` or all `float`.
    pub fn array(elements: Vec<Literal>, span: Span) -> Result<TypedExpr, Error> {
        let first = match elements.first() {
            Some(first) => *first,
            None => return Err(Error::new(ErrorImpl::EmptyArrayLiteral, span.start.clone())),
        };

        let element_type = TypedExpr::constant(first, span.clone())?.resolved_type()?;
        let ty = element_type.list_of().ok_or_else(|| {
            Error::new(
                ErrorImpl::UnsupportedType {
                    type_: format!("list[{}]", element_type),
                },
                span.start.clone(),
            )
        })?;

        let mut rendered = Vec::with_capacity(elements.len());
        for element in &elements {
            let element = TypedExpr::constant(*element, span.clone())?;
            let received = element.resolved_type()?;
            if received != element_type {
                return Err(Error::new(
                    ErrorImpl::MixedArrayLiteral {
                        expected: element_type.to_string(),
                        received: received.to_string(),
                    },
                    span.start.clone(),
                ));
            }
            rendered.push(element.text);
        }

        Ok(TypedExpr {
            kind: TypedExprKind::Array {
                size: elements.len(),
                elements,
            },
            ty: Some(ty),
            text: format!("{{{}}}", rendered.join(", ")),
            span,
        })
    }

    /// `left op0 c0 op1 c1 ...`, rendered as the conjunction of each
    /// adjacent pair.
    pub fn compare(
        left: TypedExpr,
        ops: Vec<Operator>,
        comparators: Vec<TypedExpr>,
        span: Span,
    ) -> Result<TypedExpr, Error> {
        if ops.is_empty() || ops.len() != comparators.len() {
            return Err(malformed("comparison needs one comparator per operator", &span));
        }
        if ops.iter().any(|op| op.kind() != OperatorKind::Comparison) {
            return Err(malformed("comparison chains only take comparison operators", &span));
        }

        let mut conditions = Vec::with_capacity(ops.len());
        let mut previous = left.text.as_str();
        for (op, comparator) in ops.iter().zip(&comparators) {
            conditions.push(format!("{} {} {}", previous, op.spelling(), comparator.text));
            previous = comparator.text.as_str();
        }
        let text = format!("({})", conditions.join(" && "));

        Ok(TypedExpr {
            kind: TypedExprKind::Compare {
                left: Box::new(left),
                ops,
                comparators,
            },
            ty: Some(SemanticType::Bool),
            text,
            span,
        })
    }

    pub fn binary(
        left: TypedExpr,
        op: Operator,
        right: TypedExpr,
        span: Span,
    ) -> Result<TypedExpr, Error> {
        if op.kind() != OperatorKind::Arithmetic {
            return Err(malformed("binary operations only take arithmetic operators", &span));
        }

        let left_type = left.resolved_type()?;
        let right_type = right.resolved_type()?;
        let invalid_operands = || {
            Error::new(
                ErrorImpl::InvalidOperandTypes {
                    operator: op.to_string(),
                    left: left_type.to_string(),
                    right: right_type.to_string(),
                },
                span.start.clone(),
            )
        };

        let mut cast = "";
        let ty = match (op, left_type, right_type) {
            (_, SemanticType::Int, SemanticType::Int) => match op {
                Operator::Div => {
                    cast = "(double)";
                    SemanticType::Float
                }
                _ => SemanticType::Int,
            },
            (Operator::FloorDiv | Operator::Mod, _, _)
                if left_type == SemanticType::Float || right_type == SemanticType::Float =>
            {
                return Err(Error::new(
                    ErrorImpl::UnsupportedOperation {
                        operator: op.to_string(),
                        operands: format!("`{}` and `{}` operands", left_type, right_type),
                    },
                    span.start.clone(),
                ));
            }
            (Operator::FloorDiv | Operator::Mod, _, _) => return Err(invalid_operands()),
            (_, l, r) if l.is_numeric() && r.is_numeric() => SemanticType::Float,
            _ => return Err(invalid_operands()),
        };

        let text = format!("({}{} {} {})", cast, left.text, op.spelling(), right.text);

        Ok(TypedExpr {
            kind: TypedExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            ty: Some(ty),
            text,
            span,
        })
    }

    /// `(<op><operand>)`; the type is the operand's.
    pub fn unary(op: Operator, operand: TypedExpr, span: Span) -> Result<TypedExpr, Error> {
        if !matches!(op, Operator::UAdd | Operator::USub | Operator::Not) {
            return Err(malformed("unary operations only take `+`, `-` and `not`", &span));
        }

        let text = format!("({}{})", op.spelling(), operand.text);
        Ok(TypedExpr {
            ty: operand.ty,
            kind: TypedExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            text,
            span,
        })
    }

    pub fn bool_chain(
        op: Operator,
        values: Vec<TypedExpr>,
        span: Span,
    ) -> Result<TypedExpr, Error> {
        if !matches!(op, Operator::And | Operator::Or) {
            return Err(malformed("boolean chains only take `and` and `or`", &span));
        }
        if values.len() < 2 {
            return Err(malformed("boolean chains need at least two operands", &span));
        }

        let separator = format!(" {} ", op.spelling());
        let text = format!(
            "({})",
            values.iter().map(|value| value.text.as_str()).collect::<Vec<&str>>().join(&separator)
        );

        Ok(TypedExpr {
            kind: TypedExprKind::BoolChain { op, values },
            ty: Some(SemanticType::Bool),
            text,
            span,
        })
    }

    /// `value[index]`; `value` must be a variable and `index` must come from
    /// [`TypedExpr::index`].
    pub fn subscript(value: TypedExpr, index: TypedExpr, span: Span) -> Result<TypedExpr, Error> {
        if !matches!(index.kind, TypedExprKind::Index { .. }) {
            return Err(malformed("subscript needs an index node", &span));
        }

        let array_type = value.resolved_type()?;
        // `{1, 2}[0]` and `f()[0]` have no C spelling as array reads
        if !matches!(value.kind, TypedExprKind::Variable(_)) {
            return Err(Error::new(
                ErrorImpl::UnsupportedOperation {
                    operator: String::from("[]"),
                    operands: format!("`{}` values other than variables", array_type),
                },
                span.start.clone(),
            ));
        }

        let ty = array_type.element().ok_or_else(|| {
            Error::new(
                ErrorImpl::UnsupportedType {
                    type_: array_type.to_string(),
                },
                span.start.clone(),
            )
        })?;

        let text = format!("{}[{}]", value.text, index.text);
        Ok(TypedExpr {
            kind: TypedExprKind::Subscript {
                value: Box::new(value),
                index: Box::new(index),
            },
            ty: Some(ty),
            text,
            span,
        })
    }

    pub fn index(value: TypedExpr) -> Result<TypedExpr, Error> {
        let received = value.resolved_type()?;
        if received != SemanticType::Int {
            return Err(Error::new(
                ErrorImpl::InvalidIndexType {
                    received: received.to_string(),
                },
                value.span.start.clone(),
            ));
        }

        Ok(TypedExpr {
            text: value.text.clone(),
            span: value.span.clone(),
            ty: Some(SemanticType::Int),
            kind: TypedExprKind::Index { value: Box::new(value) },
        })
    }

    /// `callee(a0, a1, ...)`, typed by the callee's known return type.
    pub fn call(
        symbols: &SymbolTable,
        callee: &str,
        arguments: Vec<TypedExpr>,
        span: Span,
    ) -> Result<TypedExpr, Error> {
        let return_type = symbols.function_return_type(callee);
        let ty = match return_type {
            Some(ReturnType::Value(ty)) => Some(ty),
            _ => None,
        };

        let text = format!(
            "{}({})",
            callee,
            arguments
                .iter()
                .map(|argument| argument.text.as_str())
                .collect::<Vec<&str>>()
                .join(", ")
        );

        Ok(TypedExpr {
            kind: TypedExprKind::Call {
                callee: callee.to_string(),
                arguments,
                return_type,
            },
            ty,
            text,
            span,
        })
    }
}
