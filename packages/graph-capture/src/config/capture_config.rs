//! Session-level capture settings

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use serde::{Deserialize, Serialize};

/// Name that marks a value the caller did not name
pub const DEFAULT_SENTINEL: &str = "__var";

/// Operator class recorded for `b = a` under [`AssignPolicy::MaterializeIdentity`]
pub const DEFAULT_IDENTITY_OPERATOR: &str = "identity";

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// How a plain reassignment `b = a` (no intervening operation) is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignPolicy {
    /// No record; `b` refers to `a`'s producer through an alias
    CopyPropagate,

    /// One `identity([a]) -> [b]` record per reassignment
    MaterializeIdentity,
}

impl AssignPolicy {
    /// Parse policy from string
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "copy_propagate" | "copy" => Ok(Self::CopyPropagate),
            "materialize_identity" | "identity" => Ok(Self::MaterializeIdentity),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CopyPropagate => "copy_propagate",
            Self::MaterializeIdentity => "materialize_identity",
        }
    }
}

impl Default for AssignPolicy {
    fn default() -> Self {
        Self::CopyPropagate
    }
}

impl std::fmt::Display for AssignPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capture configuration for one `Program`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Name that means "no name given"; exempt from the uniqueness check
    pub internal_sentinel: String,

    /// Recording of `b = a`; fixed for the whole session
    pub assign_policy: AssignPolicy,

    /// Operator class used when `assign_policy` materializes identities
    pub identity_operator: String,

    /// Reject inputs that are neither placeholders nor already defined
    pub strict_inputs: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            internal_sentinel: DEFAULT_SENTINEL.to_string(),
            assign_policy: AssignPolicy::default(),
            identity_operator: DEFAULT_IDENTITY_OPERATOR.to_string(),
            strict_inputs: true,
        }
    }
}

impl CaptureConfig {
    pub fn with_assign_policy(mut self, policy: AssignPolicy) -> Self {
        self.assign_policy = policy;
        self
    }

    pub fn with_internal_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.internal_sentinel = sentinel.into();
        self
    }

    pub fn with_identity_operator(mut self, operator_class: impl Into<String>) -> Self {
        self.identity_operator = operator_class.into();
        self
    }

    pub fn with_strict_inputs(mut self, strict: bool) -> Self {
        self.strict_inputs = strict;
        self
    }

    /// Check field values and cross-field consistency
    pub fn validate(&self) -> ConfigResult<()> {
        if self.internal_sentinel.is_empty() {
            return Err(ConfigError::empty_field(
                "internal_sentinel",
                format!("Use the default '{}'.", DEFAULT_SENTINEL),
            ));
        }
        if self.identity_operator.is_empty() {
            return Err(ConfigError::empty_field(
                "identity_operator",
                format!("Use the default '{}'.", DEFAULT_IDENTITY_OPERATOR),
            ));
        }
        if self.assign_policy == AssignPolicy::MaterializeIdentity
            && self.identity_operator == self.internal_sentinel
        {
            return Err(ConfigError::Conflict {
                issue: format!(
                    "identity_operator '{}' equals internal_sentinel",
                    self.identity_operator
                ),
                fix: "pick distinct names for the identity operator and the sentinel".to_string(),
            });
        }
        Ok(())
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML text (v1 schema); unspecified fields keep their defaults
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::default();
        if let Some(sentinel) = export.internal_sentinel {
            config.internal_sentinel = sentinel;
        }
        if let Some(policy) = export.assign_policy {
            config.assign_policy = policy;
        }
        if let Some(operator_class) = export.identity_operator {
            config.identity_operator = operator_class;
        }
        if let Some(strict) = export.strict_inputs {
            config.strict_inputs = strict;
        }

        config.validate()?;
        Ok(config)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            internal_sentinel: Some(self.internal_sentinel.clone()),
            assign_policy: Some(self.assign_policy),
            identity_operator: Some(self.identity_operator.clone()),
            strict_inputs: Some(self.strict_inputs),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
