//! Error types for graph-capture
//!
//! Every error here is a build-time programmer error: the recording code
//! described an invalid graph. Nothing is retried mid-session.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for graph-capture operations
#[derive(Debug, Error)]
pub enum CaptureError {
    /// An explicit name was registered twice in one session
    #[error("Var name already exists: {0}")]
    DuplicateName(String),

    /// Push of an absent program, pop on an empty stack, or a guard
    /// releasing a program that is not on top
    #[error("Invalid scope operation: {0}")]
    InvalidScope(String),

    /// Placeholder declared with the internal sentinel as its name
    #[error("Name '{0}' is reserved for unnamed values")]
    ReservedName(String),

    /// Program is already mutably borrowed by another caller on this thread
    #[error("Program is busy: re-entrant recording on the same session")]
    ProgramBusy,

    /// Implicit operation attempted with no active program
    #[error("No active program context")]
    NoActiveScope,

    /// Commit or registration after the session was finalized
    #[error("Program '{program}' is already finalized")]
    AlreadyFinalized { program: String },

    /// Input is neither a placeholder nor produced by an earlier record
    #[error("Value '{value}' consumed by '{operator_class}' has no definition")]
    UndefinedValue {
        value: String,
        operator_class: String,
    },

    /// Anonymous variable read before anything was assigned to it
    #[error("Anonymous variable read before assignment")]
    UnboundVariable,

    /// Commit without any output
    #[error("Operation '{0}' must produce at least one output")]
    EmptyOutputs(String),

    /// Same identifier listed twice in one commit's outputs
    #[error("Operation '{operator_class}' lists output '{value}' more than once")]
    DuplicateOutput {
        operator_class: String,
        value: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CaptureError {
    /// Create an invalid scope error
    pub fn invalid_scope(msg: impl Into<String>) -> Self {
        CaptureError::InvalidScope(msg.into())
    }
}

/// Result type alias for graph-capture operations
pub type CaptureResult<T> = std::result::Result<T, CaptureError>;
