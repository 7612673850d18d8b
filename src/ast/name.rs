//! # Names and Qualification
//!
//! Every identifier in a Basalt program is a [`Name`]. The parser produces a
//! mixture of unqualified names (`foo`) and explicitly qualified ones
//! (`collections::list::map`). Name resolution rewrites every use site to the
//! qualified form, so downstream phases only ever see [`Name::Qualified`].
//!
//! A qualified name consists of a path (the module path followed by any
//! enclosing local scope segments) and the base name itself:
//!
//! ```text
//! // top-level `map` in module collections::list:
//! Qualified { path: ["collections", "list"], name: "map" }
//!
//! // parameter `x` of function `map` in the same module:
//! Qualified { path: ["collections", "list", "map"], name: "x" }
//!
//! // local `acc` declared in the first anonymous block inside `map`:
//! Qualified { path: ["collections", "list", "map", "_a"], name: "acc" }
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::resolver`] - rewrites unqualified names to qualified ones
//! - [`crate::types::env`] - type environments are keyed by `Name`

use std::fmt;

/// An identifier, before or after qualification.
///
/// # Variants
///
/// * `Unqualified` - a bare name as written in source (`foo`)
/// * `Qualified` - a name anchored to a module/scope path (`a::b::foo`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Name {
    Unqualified(String),
    Qualified { path: Vec<String>, name: String },
}

impl Name {
    /// Create an unqualified name.
    pub fn unqualified(name: impl Into<String>) -> Self {
        Name::Unqualified(name.into())
    }

    /// Create a qualified name from a path and a base name.
    pub fn qualified(path: Vec<String>, name: impl Into<String>) -> Self {
        Name::Qualified {
            path,
            name: name.into(),
        }
    }

    /// The base name, without any path.
    pub fn base(&self) -> &str {
        match self {
            Name::Unqualified(name) => name,
            Name::Qualified { name, .. } => name,
        }
    }

    /// Whether this name has been resolved to a qualified form.
    pub fn is_qualified(&self) -> bool {
        matches!(self, Name::Qualified { .. })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Name::Unqualified(name) => write!(f, "{}", name),
            Name::Qualified { path, name } => {
                for segment in path {
                    write!(f, "{}::", segment)?;
                }
                write!(f, "{}", name)
            }
        }
    }
}
