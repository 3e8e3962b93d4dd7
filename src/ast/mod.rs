/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree handed to the type checker
///
/// Submodules:
/// - ast: Module and function definitions
/// - expressions: Definitions for the expression kinds
/// - statements: Definitions for the statement kinds
/// - types: Type annotations as written in the source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
