//! RabbitMQ queue connector

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BasicResourceProperties, ProvisioningMode, ResourceMetadata, SecretValue};

/// `Applications.Connector/rabbitMQMessageQueues`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct RabbitMQQueue {
    /// Resource identity
    pub metadata: ResourceMetadata,
    /// User inputs
    pub properties: RabbitMQQueueProperties,
}

/// Inputs of a RabbitMQ queue connector
///
/// Only values mode exists for this kind, so there is no `resource` field.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RabbitMQQueueProperties {
    /// Application and environment references
    #[serde(flatten)]
    pub basic: BasicResourceProperties,

    /// Requested provisioning mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ProvisioningMode>,

    /// Queue name (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,

    /// Secrets
    #[serde(default, skip_serializing)]
    pub secrets: Option<RabbitMQQueueSecrets>,
}

/// Write-only RabbitMQ secrets
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RabbitMQQueueSecrets {
    /// AMQP connection string
    #[serde(default)]
    pub connection_string: Option<SecretValue>,
}
