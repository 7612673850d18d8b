//! # Type Error Definitions
//!
//! Errors produced by the inference phase. All of them are fatal for the
//! current analysis run: inference halts at the first error.
//!
//! Every error carries the source span of the construct that produced it.
//! The `Display` implementation renders the source location when the span
//! carries source text and falls back to a bare message otherwise.

use std::fmt;

use lachs::Span;

use crate::ast::name::Name;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Two types that should be equal cannot be unified.
    Mismatch {
        expected: Type,
        found: Type,
        span: Span,
    },

    /// Unification would need to bind a variable to a type containing it.
    InfiniteType { var: TypeVar, ty: Type, span: Span },

    /// A constructor mentions type variables that are not parameters of its
    /// enclosing type definition.
    UndefinedTypeVariable {
        type_name: Name,
        vars: Vec<TypeVar>,
        span: Span,
    },

    /// Assignment to a variable whose binding is not mutable.
    ImmutableAssign { name: Name, span: Span },

    /// Assignment target is neither a variable nor a dereference.
    NonLValue { span: Span },

    /// `&` applied to something other than a variable.
    NonReferencable { span: Span },

    /// A match expression with no arms.
    EmptyMatch { span: Span },

    /// A feature the inferrer deliberately rejects.
    NotImplemented { feature: &'static str, span: Span },

    /// A name the environment does not know. The resolver guarantees this
    /// cannot happen for resolved programs; it is reachable only when the
    /// inferrer is driven directly over a hand-built tree.
    UnboundName { name: Name, span: Span },
}

impl TypeError {
    pub fn mismatch(expected: Type, found: Type, span: Span) -> Self {
        TypeError::Mismatch {
            expected,
            found,
            span,
        }
    }

    pub fn infinite_type(var: TypeVar, ty: Type, span: Span) -> Self {
        TypeError::InfiniteType { var, ty, span }
    }

    pub fn unbound_name(name: Name, span: Span) -> Self {
        TypeError::UnboundName { name, span }
    }

    /// Attach a source position to a unification failure.
    pub fn from_unify_error(err: UnifyError, span: Span) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => {
                TypeError::mismatch(expected, found, span)
            }
            UnifyError::InfiniteType { var, ty } => TypeError::infinite_type(var, ty, span),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            TypeError::Mismatch { span, .. }
            | TypeError::InfiniteType { span, .. }
            | TypeError::UndefinedTypeVariable { span, .. }
            | TypeError::ImmutableAssign { span, .. }
            | TypeError::NonLValue { span }
            | TypeError::NonReferencable { span }
            | TypeError::EmptyMatch { span }
            | TypeError::NotImplemented { span, .. }
            | TypeError::UnboundName { span, .. } => span,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            TypeError::Mismatch {
                expected, found, ..
            } => format!(
                "type mismatch: expected {}, found {}",
                expected.pretty(),
                found.pretty()
            ),
            TypeError::InfiniteType { var, ty, .. } => format!(
                "cannot construct infinite type: {} = {}",
                var,
                ty.pretty()
            ),
            TypeError::UndefinedTypeVariable {
                type_name, vars, ..
            } => {
                let vars = vars
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "constructor of {} uses undefined type variables: [{}]",
                    type_name, vars
                )
            }
            TypeError::ImmutableAssign { name, .. } => {
                format!("cannot assign to immutable binding {}", name)
            }
            TypeError::NonLValue { .. } => {
                "assignment target must be a variable or a dereference".to_string()
            }
            TypeError::NonReferencable { .. } => {
                "can only take a reference to a variable".to_string()
            }
            TypeError::EmptyMatch { .. } => "match expression has no arms".to_string(),
            TypeError::NotImplemented { feature, .. } => {
                format!("{} are not implemented", feature)
            }
            TypeError::UnboundName { name, .. } => format!("unbound name: {}", name),
        };
        let span = self.span();
        if span.source.is_empty() {
            write!(f, "Type error: {}", msg)
        } else {
            write!(f, "{}", span.to_string(&msg))
        }
    }
}

impl std::error::Error for TypeError {}
