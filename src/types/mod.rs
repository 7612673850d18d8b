pub mod env;
pub mod error;
pub mod infer;
pub mod solve;
pub mod subst;
pub mod ty;
pub mod unify;
