//! The analysis driver: resolve names, infer types, solve the collected
//! constraints and substitute the solution back into the tree.

use std::fmt;

use crate::ast::Program;
use crate::resolver::{self, ResolveError};
use crate::types::error::TypeError;
use crate::types::infer::Inferrer;
use crate::types::solve::solve;
use crate::types::ty::Type;

/// Errors surfaced by [`analyze`] - everything resolution or inference can
/// produce, plus the program-level check that an entry point exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    Resolve(ResolveError),
    Type(TypeError),
    /// No `main` function in the root `main` module.
    MissingMain,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisError::Resolve(err) => write!(f, "{}", err),
            AnalysisError::Type(err) => write!(f, "{}", err),
            AnalysisError::MissingMain => {
                write!(f, "Analysis error: program must have a 'main' function")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Resolve(err) => Some(err),
            AnalysisError::Type(err) => Some(err),
            AnalysisError::MissingMain => None,
        }
    }
}

impl From<ResolveError> for AnalysisError {
    fn from(err: ResolveError) -> Self {
        AnalysisError::Resolve(err)
    }
}

impl From<TypeError> for AnalysisError {
    fn from(err: TypeError) -> Self {
        AnalysisError::Type(err)
    }
}

/// Analyze a program as produced by the parser.
///
/// This performs, in order:
/// 1. Name resolution - every identifier is rewritten to its fully
///    qualified form
/// 2. Type inference - every expression is annotated and the constraint
///    log is filled
/// 3. The final solve - all constraints collapse into one substitution,
///    which is applied to every annotation in the tree
/// 4. The entry-point check - the root `main` module must define `main`
///
/// The returned tree is a fixed point of the final substitution: applying
/// it again changes nothing.
pub fn analyze(program: Program<()>) -> Result<Program<Type>, AnalysisError> {
    log::debug!("analysis: resolving names");
    let resolved = resolver::resolve(program)?;

    log::debug!("analysis: inferring types");
    let mut inferrer = Inferrer::new();
    let typed = inferrer.infer_program(resolved)?;

    log::debug!("analysis: solving constraints");
    let substitution = solve(inferrer.take_constraints())?;
    let typed = typed.map_info(|ty| substitution.apply(&ty));

    if !inferrer.main_exists() {
        return Err(AnalysisError::MissingMain);
    }
    Ok(typed)
}
