//! # Type Substitutions
//!
//! A substitution is a finite map from type variables to types, representing
//! the variable assignments discovered during unification.
//!
//! ## Application
//!
//! Applying a substitution rewrites every free occurrence of a mapped
//! variable, recursing structurally through constructors, function types and
//! references:
//!
//! ```text
//! // Substitution: {_a := i32}
//! apply(_a)                  -> i32
//! apply(fn(_a) -> _a)        -> fn(i32) -> i32
//! apply(fn(_a) -> _b)        -> fn(i32) -> _b
//! ```
//!
//! Applied to a scheme, quantified variables are protected: the substitution
//! is restricted to the variables the scheme does not bind before the body
//! is rewritten.
//!
//! ## Composition
//!
//! `a.compose(&b)` builds the substitution that applies `b` first and then
//! `a`:
//!
//! ```text
//! a = {_b := i32}
//! b = {_a := _b}
//!
//! a.compose(&b) = {_a := i32, _b := i32}
//! ```
//!
//! Concretely: `a` is applied to `b`'s range, and on key conflicts `a`'s
//! binding wins. Composition is associative but **not** commutative.
//!
//! ## Related Modules
//!
//! - [`crate::types::ty`] - the types substitutions apply to
//! - [`crate::types::unify`] - produces singleton substitutions
//! - [`crate::types::solve`] - folds unifiers into one final substitution

use std::collections::HashMap;

use super::ty::{Type, TypeScheme, TypeVar};

/// A substitution mapping type variables to types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub HashMap<TypeVar, Type>);

impl Substitution {
    /// Create an empty substitution.
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    /// Create a substitution with a single mapping.
    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply this substitution to a type, rewriting all mapped variables.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Int32 | Type::Float64 | Type::Str | Type::Char | Type::Bool | Type::Unit => {
                ty.clone()
            }
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Con(name, args) => Type::Con(
                name.clone(),
                args.iter().map(|a| self.apply(a)).collect(),
            ),
            Type::Func(params, ret) => Type::Func(
                params.iter().map(|p| self.apply(p)).collect(),
                Box::new(self.apply(ret)),
            ),
            Type::Ptr(inner) => Type::Ptr(Box::new(self.apply(inner))),
        }
    }

    /// Apply this substitution to a scheme. Quantified variables are removed
    /// from the substitution first, so they are never rewritten.
    pub fn apply_scheme(&self, scheme: &TypeScheme) -> TypeScheme {
        let restricted = Substitution(
            self.0
                .iter()
                .filter(|(var, _)| !scheme.vars.contains(var))
                .map(|(var, ty)| (var.clone(), ty.clone()))
                .collect(),
        );
        TypeScheme {
            vars: scheme.vars.clone(),
            ty: restricted.apply(&scheme.ty),
        }
    }

    /// Compose two substitutions: `a.compose(&b)` applies `b` first, then
    /// `a`. `a` is applied to `b`'s range; on conflicting keys `a` wins.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut map = HashMap::new();
        for (var, ty) in &other.0 {
            map.insert(var.clone(), self.apply(ty));
        }
        for (var, ty) in &self.0 {
            map.insert(var.clone(), ty.clone());
        }
        Substitution(map)
    }
}
