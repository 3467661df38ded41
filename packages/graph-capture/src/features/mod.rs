//! Feature modules
//!
//! - ir/       - append-only record log and dead code elimination
//! - graph/    - finalized graph, its queries, dump and scheduling view
//! - session/  - programs and the scope stack
//! - handles/  - variable handles and the builder that creates them

pub mod graph;
pub mod handles;
pub mod ir;
pub mod session;
