//! Text generation module.
//!
//! This module drives the lowering of one function definition and renders
//! the result. It handles:
//!
//! - Parameter types from annotations or from the caller
//! - Known callees and their return types
//! - Return type unification across the whole body
//! - Signature rendering and block indentation

pub mod compiler;
