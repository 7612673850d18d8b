//! # Type Environment
//!
//! The environment maps resolved names to bindings: a type scheme plus a
//! mutability flag. Lookups instantiate schemes at the use site (handled by
//! the inferrer); the mutability flag gates assignment.
//!
//! ## Scoping
//!
//! Scoping is lexical and LIFO. The environment itself is a flat map; the
//! inferrer realizes scope discipline by snapshotting the environment on
//! scope entry and restoring the snapshot on every exit path, including
//! error propagation. Because resolved names are scope-qualified, two
//! distinct scopes never collide on a key even while both are live.
//!
//! ## Related Modules
//!
//! - [`crate::types::ty`] - schemes stored in bindings
//! - [`crate::types::infer`] - the scoped snapshot/restore discipline

use std::collections::{HashMap, HashSet};

use crate::ast::name::Name;

use super::ty::{TypeScheme, TypeVar};

/// What a name is bound to: its scheme and whether it may be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub scheme: TypeScheme,
    pub mutable: bool,
}

impl Binding {
    pub fn new(scheme: TypeScheme, mutable: bool) -> Self {
        Binding { scheme, mutable }
    }

    /// An immutable binding; the common case for parameters, pattern
    /// bindings and top-levels.
    pub fn immutable(scheme: TypeScheme) -> Self {
        Binding::new(scheme, false)
    }
}

/// Environment mapping resolved names to bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: HashMap<Name, Binding>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn lookup(&self, name: &Name) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn insert(&mut self, name: Name, binding: Binding) {
        self.bindings.insert(name, binding);
    }

    /// Free type variables across every binding; used to decide what may be
    /// generalized at a binding site.
    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        let mut free = HashSet::new();
        for binding in self.bindings.values() {
            free.extend(binding.scheme.free_type_vars());
        }
        free
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ty::Type;

    fn name(n: &str) -> Name {
        Name::qualified(vec!["main".to_string()], n)
    }

    #[test]
    fn test_empty_env() {
        assert!(TypeEnv::empty().lookup(&name("x")).is_none());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut env = TypeEnv::empty();
        env.insert(
            name("x"),
            Binding::immutable(TypeScheme::monomorphic(Type::Int32)),
        );
        let binding = env.lookup(&name("x")).unwrap();
        assert_eq!(binding.scheme.ty, Type::Int32);
        assert!(!binding.mutable);
    }

    #[test]
    fn test_insert_replaces() {
        let mut env = TypeEnv::empty();
        env.insert(
            name("x"),
            Binding::immutable(TypeScheme::monomorphic(Type::Int32)),
        );
        env.insert(
            name("x"),
            Binding::new(TypeScheme::monomorphic(Type::Bool), true),
        );
        let binding = env.lookup(&name("x")).unwrap();
        assert_eq!(binding.scheme.ty, Type::Bool);
        assert!(binding.mutable);
    }

    #[test]
    fn test_free_type_vars_collects_unquantified() {
        let a = TypeVar::new("_a");
        let mut env = TypeEnv::empty();
        env.insert(
            name("x"),
            Binding::immutable(TypeScheme::monomorphic(Type::Var(a.clone()))),
        );
        let free = env.free_type_vars();
        assert_eq!(free.len(), 1);
        assert!(free.contains(&a));
    }

    #[test]
    fn test_free_type_vars_skips_quantified() {
        let a = TypeVar::new("_a");
        let mut env = TypeEnv::empty();
        env.insert(
            name("id"),
            Binding::immutable(TypeScheme::polymorphic(
                vec![a.clone()],
                Type::func(vec![Type::Var(a.clone())], Type::Var(a)),
            )),
        );
        assert!(env.free_type_vars().is_empty());
    }
}
