//! Function-level driver.
//!
//! This module takes one parsed function definition through the whole
//! pipeline: it resolves the parameter types, sets up the symbol table,
//! lowers the body into typed statements, unifies the return type across
//! every `return` and finally renders the C-like text.

use log::debug;

use crate::{
    ast::ast::FunctionDef,
    errors::errors::{Error, ErrorImpl},
    type_checker::{
        symbols::SymbolTable,
        type_checker::lower_block,
        typed_stmt::{StmtText, TypedStmt, TypedStmtKind},
        types::{to_semantic, to_target, ReturnType, SemanticType},
    },
};

/// How nested blocks are indented in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    #[default]
    Tab,
    Spaces(usize),
}

impl IndentStyle {
    pub fn unit(self) -> String {
        match self {
            IndentStyle::Tab => String::from("\t"),
            IndentStyle::Spaces(count) => " ".repeat(count),
        }
    }
}

/// Caller supplied context for one transpilation.
#[derive(Debug, Clone, Default)]
pub struct TranspileOptions {
    /// Parameter types in declaration order. Takes precedence over the
    /// annotations in the source.
    pub param_types: Option<Vec<SemanticType>>,
    /// Functions the body may call, with their return types.
    pub externs: Vec<(String, ReturnType)>,
    pub indent: IndentStyle,
}

/// A resolved formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub name: String,
    pub ty: SemanticType,
}

impl ParameterDecl {
    pub fn render(&self) -> String {
        to_target(self.ty).parameter(&self.name)
    }
}

fn resolve_parameters(
    function: &FunctionDef,
    options: &TranspileOptions,
) -> Result<Vec<ParameterDecl>, Error> {
    if let Some(types) = &options.param_types {
        if types.len() != function.params.len() {
            return Err(Error::new(
                ErrorImpl::ArgumentCountMismatch {
                    expected: function.params.len(),
                    received: types.len(),
                },
                function.span.start.clone(),
            ));
        }

        return Ok(function
            .params
            .iter()
            .zip(types)
            .map(|(param, ty)| ParameterDecl {
                name: param.name.clone(),
                ty: *ty,
            })
            .collect());
    }

    function
        .params
        .iter()
        .map(|param| match &param.annotation {
            Some(annotation) => Ok(ParameterDecl {
                name: param.name.clone(),
                ty: to_semantic(annotation)?,
            }),
            None => Err(Error::new(
                ErrorImpl::MissingParameterType {
                    parameter: param.name.clone(),
                },
                param.span.start.clone(),
            )),
        })
        .collect()
}

fn declared_return_type(function: &FunctionDef) -> Result<Option<ReturnType>, Error> {
    match &function.return_annotation {
        Some(annotation) if annotation.to_string() == "None" => Ok(Some(ReturnType::Void)),
        Some(annotation) => Ok(Some(ReturnType::Value(to_semantic(annotation)?))),
        None => Ok(None),
    }
}

/// Walks `block` (nested blocks included) and folds every return type into
/// `unified`. The first `return` fixes the type.
fn unify_return_types(block: &[TypedStmt], unified: &mut Option<ReturnType>) -> Result<(), Error> {
    for stmt in block {
        if let TypedStmtKind::Return { return_type, .. } = stmt.kind() {
            let return_type = *return_type;
            match *unified {
                None => {
                    debug!("return type fixed as {}", return_type);
                    *unified = Some(return_type);
                }
                Some(expected) if expected != return_type => {
                    return Err(Error::new(
                        ErrorImpl::InconsistentReturnType {
                            expected: expected.to_string(),
                            received: return_type.to_string(),
                        },
                        stmt.get_span().start.clone(),
                    ));
                }
                Some(_) => {}
            }
        }

        unify_return_types(stmt.body(), unified)?;
    }

    Ok(())
}

fn render_block(out: &mut String, block: &[TypedStmt], depth: usize, unit: &str) {
    let indent = unit.repeat(depth);

    for stmt in block {
        match stmt.text() {
            StmtText::Line(line) => {
                out.push_str(&indent);
                out.push_str(line);
                out.push('\n');
            }
            StmtText::Block { header, tail } => {
                out.push_str(&indent);
                out.push_str(header);
                out.push('\n');
                render_block(out, stmt.body(), depth + 1, unit);
                out.push_str(&indent);
                out.push_str(tail);
                out.push('\n');
            }
        }
    }
}

/// Transpiles one function definition into C-like text.
pub fn transpile(function: &FunctionDef, options: &TranspileOptions) -> Result<String, Error> {
    let params = resolve_parameters(function, options)?;
    let declared = declared_return_type(function)?;

    let mut symbols = SymbolTable::new();
    for param in &params {
        symbols.declare_parameter(param.name.clone(), param.ty);
    }
    for (name, return_type) in &options.externs {
        symbols.declare_function(name.clone(), *return_type);
    }
    // Recursive calls can only be typed when the return type is declared
    if let Some(return_type) = declared {
        symbols.declare_function(function.name.clone(), return_type);
    }

    let body = lower_block(&mut symbols, &function.body)?;

    let mut unified = None;
    unify_return_types(&body, &mut unified)?;
    let return_type = unified.unwrap_or(ReturnType::Void);

    if let (Some(expected), Some(annotation)) = (declared, &function.return_annotation) {
        if expected != return_type {
            return Err(Error::new(
                ErrorImpl::InconsistentReturnType {
                    expected: expected.to_string(),
                    received: return_type.to_string(),
                },
                annotation.get_position().clone(),
            ));
        }
    }

    let signature = params.iter().map(ParameterDecl::render).collect::<Vec<String>>().join(", ");

    let mut out = format!("{} {}({}) {{\n", return_type, function.name, signature);
    render_block(&mut out, &body, 1, &options.indent.unit());
    out.push_str("}\n");

    debug!(
        "transpiled `{}`: {} parameter(s), returns {}",
        function.name,
        params.len(),
        return_type
    );

    Ok(out)
}
