//! Provisioning modes

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the user supplies the infrastructure behind a logical resource
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum ProvisioningMode {
    /// The user gives connection values directly
    Values,
    /// The user points at an existing cloud resource by id
    Resource,
    /// A recipe provisions the resource (executed outside the rendering engine)
    Recipe,
}

impl ProvisioningMode {
    /// Every mode, in declaration order
    pub const ALL: &'static [ProvisioningMode] = &[Self::Values, Self::Resource, Self::Recipe];

    /// Wire representation of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Resource => "resource",
            Self::Recipe => "recipe",
        }
    }
}

impl fmt::Display for ProvisioningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for mode strings outside the closed set
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown provisioning mode '{0}'")]
pub struct UnknownModeError(pub String);

impl FromStr for ProvisioningMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("values".parse(), Ok(ProvisioningMode::Values));
        assert_eq!("resource".parse(), Ok(ProvisioningMode::Resource));
        assert_eq!("recipe".parse(), Ok(ProvisioningMode::Recipe));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = "Resource".parse::<ProvisioningMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown provisioning mode 'Resource'");
    }

    #[test]
    fn test_serde_is_lowercase() {
        let json = serde_json::to_string(&ProvisioningMode::Resource).unwrap();
        assert_eq!(json, "\"resource\"");
        let mode: ProvisioningMode = serde_json::from_str("\"values\"").unwrap();
        assert_eq!(mode, ProvisioningMode::Values);
    }
}
