//! Handle layer
//!
//! `GraphBuilder` creates `Var`s; assignment to a `Var` is an explicit call
//! (`assign`, `assign_from`) or a multi-output `commit_multi`.

mod builder;
mod var;

pub use builder::{capture, GraphBuilder};
pub use var::Var;
