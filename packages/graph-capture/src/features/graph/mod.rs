//! Finalized graph and its inspection surface
//!
//! - domain/: `Graph`, the immutable DCE output and its pure queries
//! - infrastructure/: textual dump and the Petgraph scheduling view

pub mod domain;
pub mod infrastructure;

pub use domain::Graph;
pub use infrastructure::describe_record;
