/*
 * Identifier Model
 *
 * Two kinds of value names:
 * - Explicit: supplied by the caller, unique within a Program
 * - Internal: generated for unnamed results, never a liveness root
 *
 * Kinds never compare equal to each other, so a generated name cannot
 * shadow a user name that happens to have the same spelling.
 */

use super::record::NodeId;
use std::fmt;

/// Name of a value in the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    /// User-supplied name
    Explicit(String),

    /// System-generated name for a value the caller did not name
    Internal(String),
}

impl Identifier {
    pub fn explicit(name: impl Into<String>) -> Self {
        Identifier::Explicit(name.into())
    }

    pub fn internal(name: impl Into<String>) -> Self {
        Identifier::Internal(name.into())
    }

    /// Internal identifier for output `index` of record `node`: `"{node}:{index}"`
    pub fn result_of(node: &NodeId, index: usize) -> Self {
        Identifier::Internal(format!("{}:{}", node, index))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Explicit(name) | Identifier::Internal(name) => name,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Identifier::Internal(_))
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Identifier::Explicit(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
