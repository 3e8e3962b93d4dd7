use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InconsistentIndentation => "InconsistentIndentation",
            ErrorImpl::UnsupportedType { .. } => "UnsupportedType",
            ErrorImpl::UnsupportedOperation { .. } => "UnsupportedOperation",
            ErrorImpl::InvalidOperandTypes { .. } => "InvalidOperandTypes",
            ErrorImpl::InvalidIndexType { .. } => "InvalidIndexType",
            ErrorImpl::ImplicitCastNotSupported { .. } => "ImplicitCastNotSupported",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::InconsistentReturnType { .. } => "InconsistentReturnType",
            ErrorImpl::UnresolvedReturnType { .. } => "UnresolvedReturnType",
            ErrorImpl::UnsupportedElseBranch => "UnsupportedElseBranch",
            ErrorImpl::EmptyArrayLiteral => "EmptyArrayLiteral",
            ErrorImpl::MixedArrayLiteral { .. } => "MixedArrayLiteral",
            ErrorImpl::MultipleTargetsNotSupported { .. } => "MultipleTargetsNotSupported",
            ErrorImpl::ArrayWithoutSize { .. } => "ArrayWithoutSize",
            ErrorImpl::MissingParameterType { .. } => "MissingParameterType",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::MalformedNode { .. } => "MalformedNode",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is the statement complete?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InconsistentIndentation => ErrorTip::Suggestion(String::from(
                "Unindent does not match any outer indentation level",
            )),
            ErrorImpl::UnsupportedType { type_ } => {
                ErrorTip::Suggestion(format!("Type `{}` is not supported", type_))
            }
            ErrorImpl::UnsupportedOperation { operator, operands } => ErrorTip::Suggestion(
                format!("`{}` is not supported for {}", operator, operands),
            ),
            ErrorImpl::InvalidOperandTypes { operator, left, right } => ErrorTip::Suggestion(
                format!("`{}` cannot combine `{}` and `{}`", operator, left, right),
            ),
            ErrorImpl::InvalidIndexType { received } => ErrorTip::Suggestion(format!(
                "Index must be `int`, received `{}`",
                received
            )),
            ErrorImpl::ImplicitCastNotSupported { from, to } => ErrorTip::Suggestion(format!(
                "Implicit cast from `{}` to `{}` is not supported",
                from, to
            )),
            ErrorImpl::UndefinedVariable { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` must be assigned before it is used",
                variable
            )),
            ErrorImpl::InconsistentReturnType { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Function already returns `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::UnresolvedReturnType { function } => ErrorTip::Suggestion(format!(
                "Return type of `{}` is unknown, declare it with an extern",
                function
            )),
            ErrorImpl::UnsupportedElseBranch => ErrorTip::Suggestion(String::from(
                "Only single-branch conditionals are supported",
            )),
            ErrorImpl::EmptyArrayLiteral => ErrorTip::Suggestion(String::from(
                "Array literals must have at least one element",
            )),
            ErrorImpl::MixedArrayLiteral { expected, received } => ErrorTip::Suggestion(format!(
                "All elements must be `{}`, found `{}`",
                expected, received
            )),
            ErrorImpl::MultipleTargetsNotSupported { message } => {
                ErrorTip::Suggestion(message.clone())
            }
            ErrorImpl::ArrayWithoutSize { variable } => ErrorTip::Suggestion(format!(
                "Array `{}` must be initialised from an array literal",
                variable
            )),
            ErrorImpl::MissingParameterType { parameter } => ErrorTip::Suggestion(format!(
                "Parameter `{}` needs an annotation or an explicit argument type",
                parameter
            )),
            ErrorImpl::ArgumentCountMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} argument types, received {}",
                    expected, received
                ))
            }
            ErrorImpl::FunctionNotFound { function } => {
                ErrorTip::Suggestion(format!("No function named `{}` in the source", function))
            }
            ErrorImpl::MalformedNode { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("inconsistent indentation")]
    InconsistentIndentation,
    #[error("unsupported type {type_}")]
    UnsupportedType { type_: String },
    #[error("operator {operator} is not supported for {operands}")]
    UnsupportedOperation { operator: String, operands: String },
    #[error("invalid operand types for {operator}: {left} and {right}")]
    InvalidOperandTypes {
        operator: String,
        left: String,
        right: String,
    },
    #[error("index must be int, received {received}")]
    InvalidIndexType { received: String },
    #[error("implicit cast from {from} to {to} is not supported")]
    ImplicitCastNotSupported { from: String, to: String },
    #[error("variable {variable:?} is not defined")]
    UndefinedVariable { variable: String },
    #[error("inconsistent return types: expected {expected}, received {received}")]
    InconsistentReturnType { expected: String, received: String },
    #[error("return type of {function:?} is unresolved")]
    UnresolvedReturnType { function: String },
    #[error("else branches are not supported")]
    UnsupportedElseBranch,
    #[error("empty array literals are not supported")]
    EmptyArrayLiteral,
    #[error("array elements must share one type: expected {expected}, received {received}")]
    MixedArrayLiteral { expected: String, received: String },
    #[error("multiple assignment targets: {message}")]
    MultipleTargetsNotSupported { message: String },
    #[error("array {variable:?} has no known size")]
    ArrayWithoutSize { variable: String },
    #[error("parameter {parameter:?} has no type")]
    MissingParameterType { parameter: String },
    #[error("argument types do not match parameters: expected {expected}, received {received}")]
    ArgumentCountMismatch { expected: usize, received: usize },
    #[error("function {function:?} not found")]
    FunctionNotFound { function: String },
    #[error("malformed node: {message}")]
    MalformedNode { message: String },
}
