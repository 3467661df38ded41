//! Operation record model

use super::identifier::Identifier;
use std::borrow::Borrow;
use std::fmt;

/// Stable id of a recorded operation: `"{operator_class}:{sequence}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// `sequence` is the per-session record counter at commit time
    pub fn new(operator_class: &str, sequence: usize) -> Self {
        NodeId(format!("{}:{}", operator_class, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One recorded application of an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub id: NodeId,
    pub operator_class: String,
    pub inputs: Vec<Identifier>,
    /// Never empty
    pub outputs: Vec<Identifier>,
}

impl OperationRecord {
    pub fn consumes(&self, value: &str) -> bool {
        self.inputs.iter().any(|input| input.as_str() == value)
    }

    pub fn produces(&self, value: &str) -> bool {
        self.outputs.iter().any(|output| output.as_str() == value)
    }
}
