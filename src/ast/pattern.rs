//! # Pattern Matching AST Nodes
//!
//! Patterns appear on the left-hand side of match arms:
//!
//! - **Literal patterns**: match a specific value (`42`, `'x'`, `true`)
//! - **Identifier patterns**: bind the scrutinee to a name (`n`)
//! - **Wildcard patterns**: match anything without binding (`_`)
//! - **Constructor patterns**: destructure a value of an algebraic data
//!   type (`Cons(head, tail)`); sub-patterns are plain names, matching is
//!   first-order
//!
//! Bindings introduced by a pattern are visible in the arm's body only, as
//! immutable locals.
//!
//! ## Related Modules
//!
//! - [`crate::ast::expression`] - the `match` expression that hosts arms
//! - [`crate::types::infer`] - pattern typing rules

use lachs::Span;

use super::expression::{Expression, Ident};
use super::name::Name;

#[derive(Debug, Clone)]
pub enum Pattern<T> {
    Literal(LiteralPattern<T>),
    Ident(Ident<T>),
    Wildcard(Wildcard<T>),
    Constructor(ConstructorPattern<T>),
}

impl<T> Pattern<T> {
    /// Get the source position of this pattern.
    pub fn position(&self) -> Span {
        match self {
            Pattern::Literal(lit) => lit.position(),
            Pattern::Ident(id) => id.position.clone(),
            Pattern::Wildcard(w) => w.position.clone(),
            Pattern::Constructor(c) => c.position.clone(),
        }
    }

    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> Pattern<U> {
        match self {
            Pattern::Literal(lit) => Pattern::Literal(lit.map_info(f)),
            Pattern::Ident(id) => Pattern::Ident(id.map_info(f)),
            Pattern::Wildcard(w) => Pattern::Wildcard(Wildcard {
                position: w.position,
                info: f(w.info),
            }),
            Pattern::Constructor(c) => Pattern::Constructor(ConstructorPattern {
                name: c.name,
                bindings: c.bindings.into_iter().map(|b| b.map_info(f)).collect(),
                position: c.position,
                info: f(c.info),
            }),
        }
    }
}

/// Literal pattern - matches one concrete value.
#[derive(Debug, Clone)]
pub enum LiteralPattern<T> {
    Integer(i64, Span, T),
    Str(String, Span, T),
    Char(char, Span, T),
    Boolean(bool, Span, T),
    Unit(Span, T),
}

impl<T> LiteralPattern<T> {
    /// Get the source position of this literal pattern.
    pub fn position(&self) -> Span {
        match self {
            LiteralPattern::Integer(_, pos, _) => pos.clone(),
            LiteralPattern::Str(_, pos, _) => pos.clone(),
            LiteralPattern::Char(_, pos, _) => pos.clone(),
            LiteralPattern::Boolean(_, pos, _) => pos.clone(),
            LiteralPattern::Unit(pos, _) => pos.clone(),
        }
    }

    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> LiteralPattern<U> {
        match self {
            LiteralPattern::Integer(v, pos, info) => LiteralPattern::Integer(v, pos, f(info)),
            LiteralPattern::Str(v, pos, info) => LiteralPattern::Str(v, pos, f(info)),
            LiteralPattern::Char(v, pos, info) => LiteralPattern::Char(v, pos, f(info)),
            LiteralPattern::Boolean(v, pos, info) => LiteralPattern::Boolean(v, pos, f(info)),
            LiteralPattern::Unit(pos, info) => LiteralPattern::Unit(pos, f(info)),
        }
    }
}

/// Wildcard pattern `_` - matches any value without binding it.
#[derive(Debug, Clone)]
pub struct Wildcard<T> {
    pub position: Span,
    pub info: T,
}

/// Constructor pattern `C(x, y)` - matches a value built by the named
/// constructor and binds its arguments. A nullary constructor is written
/// without parentheses and carries no bindings.
#[derive(Debug, Clone)]
pub struct ConstructorPattern<T> {
    pub name: Name,
    pub bindings: Vec<Ident<T>>,
    pub position: Span,
    pub info: T,
}

/// Single arm of a match expression: a pattern and the expression evaluated
/// when it matches.
#[derive(Debug, Clone)]
pub struct MatchArm<T> {
    pub pattern: Pattern<T>,
    pub body: Expression<T>,
    pub position: Span,
}

impl<T> MatchArm<T> {
    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> MatchArm<U> {
        MatchArm {
            pattern: self.pattern.map_info(f),
            body: self.body.map_info(f),
            position: self.position,
        }
    }
}
