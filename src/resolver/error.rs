//! Errors produced by name resolution. Resolution halts at the first error,
//! before inference begins.

use std::fmt;

use lachs::Span;

use crate::ast::name::Name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A top-level or local whose qualified name is already taken.
    Redefinition { name: Name, span: Span },

    /// A use site with no resolution in scope or through imports.
    Undefined { name: Name, span: Span },

    /// A use site with multiple visible public resolutions.
    Ambiguous {
        name: Name,
        candidates: Vec<Name>,
        span: Span,
    },
}

impl ResolveError {
    pub fn redefinition(name: Name, span: Span) -> Self {
        ResolveError::Redefinition { name, span }
    }

    pub fn undefined(name: Name, span: Span) -> Self {
        ResolveError::Undefined { name, span }
    }

    pub fn ambiguous(name: Name, candidates: Vec<Name>, span: Span) -> Self {
        ResolveError::Ambiguous {
            name,
            candidates,
            span,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            ResolveError::Redefinition { span, .. }
            | ResolveError::Undefined { span, .. }
            | ResolveError::Ambiguous { span, .. } => span,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ResolveError::Redefinition { name, .. } => {
                format!("redefinition of {}", name)
            }
            ResolveError::Undefined { name, .. } => format!("undefined name: {}", name),
            ResolveError::Ambiguous {
                name, candidates, ..
            } => {
                let candidates = candidates
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("ambiguous name {}: candidates are {}", name, candidates)
            }
        };
        let span = self.span();
        if span.source.is_empty() {
            write!(f, "Resolution error: {}", msg)
        } else {
            write!(f, "{}", span.to_string(&msg))
        }
    }
}

impl std::error::Error for ResolveError {}
