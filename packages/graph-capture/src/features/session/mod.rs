//! Build sessions
//!
//! - `Program`: one session's naming authority and commit funnel
//! - `Context`: stack of active programs with guaranteed-pop scope guards

pub mod context;
pub mod program;

pub use context::{Context, ScopeGuard};
pub use program::{borrow_program, Program, SharedProgram};
