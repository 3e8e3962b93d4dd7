//! Type system.
//!
//! Source-level semantic types and their target-level counterparts. The
//! `to_target` table is the only place where the two are related; every
//! spelling of a type in the output goes through it.

use std::fmt::Display;

use crate::{
    ast::types::TypeAnnotation,
    errors::errors::{Error, ErrorImpl},
};

/// The five value categories tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Bool,
    Int,
    Float,
    IntList,
    FloatList,
}

impl SemanticType {
    pub fn is_list(self) -> bool {
        matches!(self, SemanticType::IntList | SemanticType::FloatList)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, SemanticType::Int | SemanticType::Float)
    }

    /// Element type of a list type.
    pub fn element(self) -> Option<SemanticType> {
        match self {
            SemanticType::IntList => Some(SemanticType::Int),
            SemanticType::FloatList => Some(SemanticType::Float),
            _ => None,
        }
    }

    /// List type holding elements of this type.
    pub fn list_of(self) -> Option<SemanticType> {
        match self {
            SemanticType::Int => Some(SemanticType::IntList),
            SemanticType::Float => Some(SemanticType::FloatList),
            _ => None,
        }
    }
}

impl Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticType::Bool => write!(f, "bool"),
            SemanticType::Int => write!(f, "int"),
            SemanticType::Float => write!(f, "float"),
            SemanticType::IntList => write!(f, "list[int]"),
            SemanticType::FloatList => write!(f, "list[float]"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Bool,
    Int,
    Double,
    IntArray,
    DoubleArray,
}

impl TargetType {
    /// Spelling of the scalar part: `double` for both `Double` and
    /// `DoubleArray`.
    pub fn base_spelling(self) -> &'static str {
        match self {
            TargetType::Bool => "bool",
            TargetType::Int | TargetType::IntArray => "int",
            TargetType::Double | TargetType::DoubleArray => "double",
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, TargetType::IntArray | TargetType::DoubleArray)
    }

    /// Local declaration, e.g. `int i` or `double xs[3]`.
    pub fn declaration(self, name: &str, size: Option<usize>) -> Option<String> {
        if self.is_array() {
            size.map(|size| format!("{} {}[{}]", self.base_spelling(), name, size))
        } else {
            Some(format!("{} {}", self.base_spelling(), name))
        }
    }

    /// Parameter declaration; arrays are always passed by pointer.
    pub fn parameter(self, name: &str) -> String {
        if self.is_array() {
            format!("{} *{}", self.base_spelling(), name)
        } else {
            format!("{} {}", self.base_spelling(), name)
        }
    }

    /// Spelling in a function return position.
    pub fn return_spelling(self) -> String {
        if self.is_array() {
            format!("{} *", self.base_spelling())
        } else {
            self.base_spelling().to_string()
        }
    }
}

impl Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_array() {
            write!(f, "{}[]", self.base_spelling())
        } else {
            write!(f, "{}", self.base_spelling())
        }
    }
}

/// Return type of a transpiled function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Value(SemanticType),
}

impl ReturnType {
    pub fn spelling(self) -> String {
        match self {
            ReturnType::Void => String::from("void"),
            ReturnType::Value(ty) => to_target(ty).return_spelling(),
        }
    }
}

impl Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

pub fn to_target(ty: SemanticType) -> TargetType {
    match ty {
        SemanticType::Bool => TargetType::Bool,
        SemanticType::Int => TargetType::Int,
        SemanticType::Float => TargetType::Double,
        SemanticType::IntList => TargetType::IntArray,
        SemanticType::FloatList => TargetType::DoubleArray,
    }
}

/// Maps a declared type onto a semantic type. Accepts `bool`, `int`,
/// `float`, `list[int]` and `list[float]` (`List[...]` as well).
pub fn to_semantic(annotation: &TypeAnnotation) -> Result<SemanticType, Error> {
    let unsupported = || {
        Error::new(
            ErrorImpl::UnsupportedType {
                type_: annotation.to_string(),
            },
            annotation.get_position().clone(),
        )
    };

    match annotation {
        TypeAnnotation::Symbol { name, .. } => match name.as_str() {
            "bool" => Ok(SemanticType::Bool),
            "int" => Ok(SemanticType::Int),
            "float" => Ok(SemanticType::Float),
            _ => Err(unsupported()),
        },
        TypeAnnotation::Generic { base, arguments, .. } => {
            let is_list = matches!(
                base.as_ref(),
                TypeAnnotation::Symbol { name, .. } if name == "list" || name == "List"
            );
            if !is_list || arguments.len() != 1 {
                return Err(unsupported());
            }

            match &arguments[0] {
                TypeAnnotation::Symbol { name, .. } if name == "int" => Ok(SemanticType::IntList),
                TypeAnnotation::Symbol { name, .. } if name == "float" => {
                    Ok(SemanticType::FloatList)
                }
                _ => Err(unsupported()),
            }
        }
    }
}
