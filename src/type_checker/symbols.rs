use std::collections::HashMap;

use log::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::types::{to_target, ReturnType, SemanticType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// This occurrence introduces the name and renders as a declaration.
    New,
    /// This occurrence refers to an existing binding.
    Reuse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: Option<SemanticType>,
    pub size: Option<usize>,
    pub mode: BindingMode,
}

impl Variable {
    pub fn new(
        name: String,
        ty: Option<SemanticType>,
        size: Option<usize>,
        mode: BindingMode,
    ) -> Self {
        Variable { name, ty, size, mode }
    }

    /// Target text for this occurrence, `None` while a `New` binding has no
    /// type (or an array has no size) yet.
    pub fn render(&self) -> Option<String> {
        match self.mode {
            BindingMode::Reuse => Some(self.name.clone()),
            BindingMode::New => self
                .ty
                .and_then(|ty| to_target(ty).declaration(&self.name, self.size)),
        }
    }

    pub fn is_new(&self) -> bool {
        self.mode == BindingMode::New
    }
}

/// Name to variable mapping for one function body, plus the return types of
/// the functions it may call.
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: HashMap<String, Variable>,
    functions: HashMap<String, ReturnType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn declare_parameter(&mut self, name: String, ty: SemanticType) {
        debug!("parameter `{}`: {}", name, ty);
        self.variables
            .insert(name.clone(), Variable::new(name, Some(ty), None, BindingMode::Reuse));
    }

    pub fn declare_function(&mut self, name: String, return_type: ReturnType) {
        debug!("callee `{}` returns {}", name, return_type);
        self.functions.insert(name, return_type);
    }

    pub fn function_return_type(&self, name: &str) -> Option<ReturnType> {
        self.functions.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name).filter(|variable| variable.ty.is_some())
    }

    /// A read of `name`. Entries still waiting for their first value count as
    /// undefined.
    pub fn resolve_reference(&self, name: &str, position: Position) -> Result<Variable, Error> {
        match self.lookup(name) {
            Some(variable) => Ok(Variable {
                mode: BindingMode::Reuse,
                ..variable.clone()
            }),
            None => Err(Error::new(
                ErrorImpl::UndefinedVariable {
                    variable: name.to_string(),
                },
                position,
            )),
        }
    }

    /// A write to `name`: `Reuse` when it is already bound, otherwise a
    /// fresh untyped `New` entry.
    pub fn resolve_binding_target(&mut self, name: &str) -> Variable {
        if let Some(variable) = self.lookup(name) {
            return Variable {
                mode: BindingMode::Reuse,
                ..variable.clone()
            };
        }

        let variable = Variable::new(name.to_string(), None, None, BindingMode::New);
        self.variables.insert(name.to_string(), variable.clone());
        variable
    }

    /// Fixes the type (and array size) of a pending `New` entry. Bound
    /// entries are never retyped.
    pub fn bind(
        &mut self,
        name: &str,
        ty: SemanticType,
        size: Option<usize>,
        position: Position,
    ) -> Result<(), Error> {
        match self.variables.get_mut(name) {
            Some(variable) if variable.ty.is_none() => {
                variable.ty = Some(ty);
                variable.size = size;
                debug!("bound `{}` as {}", name, ty);
                Ok(())
            }
            Some(variable) => Err(Error::new(
                ErrorImpl::MalformedNode {
                    message: format!(
                        "`{}` is already bound as `{}`",
                        name,
                        variable.ty.map(|t| t.to_string()).unwrap_or_default()
                    ),
                },
                position,
            )),
            None => Err(Error::new(
                ErrorImpl::UndefinedVariable {
                    variable: name.to_string(),
                },
                position,
            )),
        }
    }
}
