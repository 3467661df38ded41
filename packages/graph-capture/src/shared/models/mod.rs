//! Value and record models
//!
//! - `Identifier`: names a value flowing through the graph
//! - `NodeId`: names one recorded operation
//! - `OperationRecord`: one application of an operator

mod identifier;
mod record;

pub use identifier::Identifier;
pub use record::{NodeId, OperationRecord};
