//! Type annotations as written in the source.
//!
//! Annotations are kept syntactic here (`int`, `list[float]`, `Foo`); the
//! type checker decides which of them map onto a semantic type.

use std::fmt::Display;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// A bare name such as `int`.
    Symbol { name: String, position: Position },
    /// A subscripted name such as `list[int]`.
    Generic {
        base: Box<TypeAnnotation>,
        arguments: Vec<TypeAnnotation>,
        position: Position,
    },
}

impl TypeAnnotation {
    pub fn get_position(&self) -> &Position {
        match self {
            TypeAnnotation::Symbol { position, .. } => position,
            TypeAnnotation::Generic { position, .. } => position,
        }
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Symbol { name, .. } => write!(f, "{}", name),
            TypeAnnotation::Generic { base, arguments, .. } => {
                let arguments = arguments.iter().map(|a| a.to_string()).collect::<Vec<String>>();
                write!(f, "{}[{}]", base, arguments.join(", "))
            }
        }
    }
}
