//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Module` of function definitions. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Function definitions with optional annotations
//! - Statement parsing (assignments, conditionals, loops, returns)
//! - Expression parsing (comparison chains, boolean chains, calls, subscripts)
//! - Type parsing for annotations
//!
//! Blocks are delimited by the `Indent`/`Dedent` tokens the lexer emits.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
