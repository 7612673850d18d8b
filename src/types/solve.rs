//! Constraint representation and the solver.
//!
//! Inference emits equality constraints into an ambient log instead of
//! unifying eagerly; the solver then folds the log through unification,
//! composing every intermediate unifier into a single substitution. Solving
//! is fail-fast: the first constraint that does not unify aborts the run.

use lachs::Span;

use super::error::TypeError;
use super::subst::Substitution;
use super::ty::Type;
use super::unify::unify;

/// An equality obligation between two types, tagged with the source span of
/// the expression that required it.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub lhs: Type,
    pub rhs: Type,
    pub span: Span,
}

impl Constraint {
    pub fn equal(lhs: Type, rhs: Type, span: Span) -> Self {
        Constraint { lhs, rhs, span }
    }
}

/// Solve a constraint list into a single substitution.
///
/// Each constraint is unified under the substitutions discovered so far:
/// after a constraint is solved, its unifier is applied to the remaining
/// constraints before the fold continues.
pub fn solve(mut constraints: Vec<Constraint>) -> Result<Substitution, TypeError> {
    let mut subst = Substitution::empty();
    for i in 0..constraints.len() {
        let Constraint { lhs, rhs, span } = constraints[i].clone();
        let unifier =
            unify(&lhs, &rhs).map_err(|err| TypeError::from_unify_error(err, span))?;
        if unifier.is_empty() {
            continue;
        }
        for rest in constraints[i + 1..].iter_mut() {
            rest.lhs = unifier.apply(&rest.lhs);
            rest.rhs = unifier.apply(&rest.rhs);
        }
        subst = unifier.compose(&subst);
    }
    Ok(subst)
}
