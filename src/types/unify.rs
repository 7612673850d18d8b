use std::fmt;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { expected: Type, found: Type },
    InfiniteType { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { expected, found } => {
                write!(
                    f,
                    "type mismatch: expected {}, found {}",
                    expected.pretty(),
                    found.pretty()
                )
            }
            UnifyError::InfiniteType { var, ty } => {
                write!(
                    f,
                    "cannot construct infinite type: {} = {}",
                    var,
                    ty.pretty()
                )
            }
        }
    }
}

/// Bind a variable to a type, refusing to build an infinite type.
fn bind(var: &TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if ty.free_type_vars().contains(var) {
        Err(UnifyError::InfiniteType {
            var: var.clone(),
            ty: ty.clone(),
        })
    } else {
        Ok(Substitution::singleton(var.clone(), ty.clone()))
    }
}

/// Compute a substitution that makes `t1` and `t2` syntactically equal.
pub fn unify(t1: &Type, t2: &Type) -> Result<Substitution, UnifyError> {
    if t1 == t2 {
        return Ok(Substitution::empty());
    }

    match (t1, t2) {
        (Type::Var(v), ty) | (ty, Type::Var(v)) => bind(v, ty),

        (Type::Con(n1, args1), Type::Con(n2, args2)) => {
            if n1 != n2 || args1.len() != args2.len() {
                Err(UnifyError::Mismatch {
                    expected: t1.clone(),
                    found: t2.clone(),
                })
            } else {
                unify_many(args1, args2)
            }
        }

        (Type::Func(params1, ret1), Type::Func(params2, ret2)) => {
            if params1.len() != params2.len() {
                return Err(UnifyError::Mismatch {
                    expected: t1.clone(),
                    found: t2.clone(),
                });
            }
            // Unify the return types alongside the parameters.
            let mut lhs = vec![(**ret1).clone()];
            lhs.extend(params1.iter().cloned());
            let mut rhs = vec![(**ret2).clone()];
            rhs.extend(params2.iter().cloned());
            unify_many(&lhs, &rhs)
        }

        (Type::Ptr(inner1), Type::Ptr(inner2)) => unify(inner1, inner2),

        _ => Err(UnifyError::Mismatch {
            expected: t1.clone(),
            found: t2.clone(),
        }),
    }
}

/// Unify two equal-length lists pairwise, threading each intermediate
/// substitution through the remaining elements.
fn unify_many(ts1: &[Type], ts2: &[Type]) -> Result<Substitution, UnifyError> {
    debug_assert_eq!(ts1.len(), ts2.len());
    match (ts1.split_first(), ts2.split_first()) {
        (Some((head1, tail1)), Some((head2, tail2))) => {
            let s1 = unify(head1, head2)?;
            let tail1: Vec<Type> = tail1.iter().map(|t| s1.apply(t)).collect();
            let tail2: Vec<Type> = tail2.iter().map(|t| s1.apply(t)).collect();
            let s2 = unify_many(&tail1, &tail2)?;
            Ok(s2.compose(&s1))
        }
        _ => Ok(Substitution::empty()),
    }
}
