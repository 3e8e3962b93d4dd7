use crate::Span;

use super::{statements::Stmt, types::TypeAnnotation};

/// A parsed source file: the function definitions it contains, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub functions: Vec<FunctionDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_annotation: Option<TypeAnnotation>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A formal parameter. The annotation is optional; callers may supply the
/// parameter types separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub annotation: Option<TypeAnnotation>,
    pub span: Span,
}
