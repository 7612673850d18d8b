//! # Statement AST Nodes
//!
//! Statements appear only inside blocks. Unlike expressions they do not all
//! produce a meaningful value; a block's value is its final expression
//! statement, or unit when the block ends with any other statement form.
//!
//! ## Overview
//!
//! - **Declaration**: `x := value` / `mut x := value` - introduce a local
//! - **While**: `while cond { ... }` - loop, always unit-valued
//! - **Return**: `return e` / `return` - early exit from the enclosing
//!   function; the inferrer constrains every return against the body type
//! - **Expression**: any expression evaluated in statement position
//!
//! Declarations are *bindings*, not mutation: `x := 1` introduces `x` in the
//! current scope, and re-declaring the same name in the exact same scope is a
//! redefinition error. Mutation goes through assignment (`x = 2`), which
//! requires the binding to have been declared `mut`.
//!
//! ## Related Modules
//!
//! - [`crate::ast::expression`] - expression nodes (statements contain them)
//! - [`crate::resolver`] - scope handling for declarations
//! - [`crate::types::infer`] - typing rules for each statement form

use lachs::Span;

use super::expression::{Expression, Ident};

#[derive(Debug, Clone)]
pub enum Statement<T> {
    Decl(VarDecl<T>),
    While(While<T>),
    Return(Return<T>),
    Expression(Expression<T>),
}

impl<T> Statement<T> {
    /// Get the source position of this statement.
    pub fn position(&self) -> Span {
        match self {
            Statement::Decl(s) => s.position.clone(),
            Statement::While(s) => s.position.clone(),
            Statement::Return(s) => s.position.clone(),
            Statement::Expression(e) => e.position(),
        }
    }

    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> Statement<U> {
        match self {
            Statement::Decl(s) => Statement::Decl(VarDecl {
                name: s.name.map_info(f),
                mutable: s.mutable,
                value: Box::new(s.value.map_info(f)),
                position: s.position,
            }),
            Statement::While(s) => Statement::While(While {
                condition: Box::new(s.condition.map_info(f)),
                body: Box::new(s.body.map_info(f)),
                position: s.position,
            }),
            Statement::Return(s) => Statement::Return(Return {
                value: s.value.map(|v| Box::new(v.map_info(f))),
                position: s.position,
            }),
            Statement::Expression(e) => Statement::Expression(e.map_info(f)),
        }
    }
}

/// Local variable declaration: `x := e` or `mut x := e`.
///
/// The declared name's `info` carries the inferred type of the initializer
/// once the program has been typed.
#[derive(Debug, Clone)]
pub struct VarDecl<T> {
    pub name: Ident<T>,
    pub mutable: bool,
    pub value: Box<Expression<T>>,
    pub position: Span,
}

/// `while cond { body }`. The condition must be boolean; the statement
/// itself is unit-valued.
#[derive(Debug, Clone)]
pub struct While<T> {
    pub condition: Box<Expression<T>>,
    pub body: Box<Expression<T>>,
    pub position: Span,
}

/// `return e` or bare `return` (which returns unit).
#[derive(Debug, Clone)]
pub struct Return<T> {
    pub value: Option<Box<Expression<T>>>,
    pub position: Span,
}
