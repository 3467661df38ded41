/*
 * Graph Capture - dataflow DAG recording engine
 *
 * Ordinary-looking code (variables, assignments, operator applications)
 * is recorded as operation records instead of executed. The records are
 * pruned by dead code elimination into an immutable graph that an
 * external executor can inspect and schedule.
 *
 * Layout:
 * - shared/    : Identifier, NodeId, OperationRecord
 * - features/  : ir (record log + DCE), graph, session, handles
 * - config/    : CaptureConfig and its YAML form
 * - errors     : CaptureError
 *
 * Single-threaded by construction: programs are `Rc<RefCell<_>>` and every
 * thread gets its own scope stack.
 */

#![allow(clippy::should_implement_trait)] // AssignPolicy::from_str returns ConfigResult
#![allow(clippy::new_without_default)]

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration
pub mod config;

/// Error types
pub mod errors;

/// Feature slices
pub mod features;

/// Shared models
pub mod shared;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AssignPolicy, CaptureConfig, ConfigError};
pub use errors::{CaptureError, CaptureResult};
pub use features::graph::Graph;
pub use features::handles::{capture, GraphBuilder, Var};
pub use features::ir::IntermediateRepresentation;
pub use features::session::{Context, Program, ScopeGuard, SharedProgram};
pub use shared::models::{Identifier, NodeId, OperationRecord};
