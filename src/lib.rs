//! Basalt - semantic analysis for a small statically-typed language
//!
//! This library implements the semantic core of the Basalt compiler: name
//! resolution over modules and Hindley-Milner type inference with equality
//! constraints. It consumes the untyped AST produced by the parser and
//! produces the same tree with every identifier fully qualified and every
//! expression annotated with its inferred type, ready for code generation.

pub mod analysis;
pub mod ast;
pub mod resolver;
pub mod types;

pub use analysis::{AnalysisError, analyze};
