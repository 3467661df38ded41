//! Capture configuration
//!
//! Controls how a recording session names unnamed values, how plain
//! reassignment (`b = a`) is recorded, and how strictly inputs are checked.
//!
//! # Examples
//!
//! ```rust,ignore
//! use graph_capture::config::{AssignPolicy, CaptureConfig};
//!
//! let config = CaptureConfig::default().with_assign_policy(AssignPolicy::MaterializeIdentity);
//! config.validate()?;
//!
//! // Or from a YAML file (v1 schema)
//! let config = CaptureConfig::from_yaml("capture.yaml")?;
//! ```

pub mod capture_config;
pub mod error;
pub mod io;

// Re-exports
pub use capture_config::{AssignPolicy, CaptureConfig, DEFAULT_IDENTITY_OPERATOR, DEFAULT_SENTINEL};
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
