//! Type checking and lowering module.
//!
//! This module turns the syntax tree of one function into typed nodes that
//! already carry their target text. It provides:
//!
//! - The type system (semantic and target types)
//! - The operator model and its target spellings
//! - The symbol table threaded through one function body
//! - Typed expression and statement nodes, built and validated in one step
//! - Lowering functions that walk the syntax tree in source order
//!
//! Every constructor returns a `Result`; the first failure aborts lowering.

pub mod operators;
pub mod symbols;
pub mod type_checker;
pub mod typed_expr;
pub mod typed_stmt;
pub mod types;

#[cfg(test)]
mod tests;
