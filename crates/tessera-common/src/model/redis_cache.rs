//! Redis cache connector

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BasicResourceProperties, ProvisioningMode, ResourceMetadata, SecretValue};

/// `Applications.Connector/redisCaches`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct RedisCache {
    /// Resource identity
    pub metadata: ResourceMetadata,
    /// User inputs
    pub properties: RedisCacheProperties,
}

/// Inputs of a Redis cache connector
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedisCacheProperties {
    /// Application and environment references
    #[serde(flatten)]
    pub basic: BasicResourceProperties,

    /// Requested provisioning mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ProvisioningMode>,

    /// Id of an existing Azure Redis Cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Host name, when connection values are supplied directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Port, when connection values are supplied directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Secrets, when supplied directly
    #[serde(default, skip_serializing)]
    pub secrets: Option<RedisCacheSecrets>,
}

/// Write-only Redis secrets
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedisCacheSecrets {
    /// Full connection string
    #[serde(default)]
    pub connection_string: Option<SecretValue>,
    /// Access key
    #[serde(default)]
    pub password: Option<SecretValue>,
}
