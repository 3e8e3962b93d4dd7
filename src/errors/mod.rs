//! Error types and error handling for the transpiler.
//!
//! This module defines the error types used throughout the transpilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and type validation
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
