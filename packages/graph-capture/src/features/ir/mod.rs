//! Intermediate representation and dead code elimination
//!
//! - domain/: the append-only record log of one session
//! - infrastructure/: backward liveness fixpoint

pub mod domain;
pub mod infrastructure;

pub use domain::IntermediateRepresentation;
