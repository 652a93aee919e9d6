//! Intermediate Representation (IR) and code generation
//!
//! This module handles the transformation from AST to basic-block IR.

pub mod core;

pub use self::core::*;
