//! Configuration I/O (YAML)
//!
//! Defines the YAML schema. Loading and export live on `CaptureConfig`.

use super::capture_config::AssignPolicy;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_sentinel: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_policy: Option<AssignPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_operator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_inputs: Option<bool>,
}
