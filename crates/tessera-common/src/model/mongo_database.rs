//! MongoDB database connector

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BasicResourceProperties, ProvisioningMode, ResourceMetadata, SecretValue};

/// `Applications.Connector/mongoDatabases`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct MongoDatabase {
    /// Resource identity
    pub metadata: ResourceMetadata,
    /// User inputs
    pub properties: MongoDatabaseProperties,
}

/// Inputs of a MongoDB database connector
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MongoDatabaseProperties {
    /// Application and environment references
    #[serde(flatten)]
    pub basic: BasicResourceProperties,

    /// Requested provisioning mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ProvisioningMode>,

    /// Id of an existing CosmosDB Mongo database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Database name, when supplied directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Secrets, when supplied directly
    #[serde(default, skip_serializing)]
    pub secrets: Option<MongoDatabaseSecrets>,
}

/// Write-only MongoDB secrets
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MongoDatabaseSecrets {
    /// Full connection string
    #[serde(default)]
    pub connection_string: Option<SecretValue>,
    /// User name
    #[serde(default)]
    pub username: Option<SecretValue>,
    /// Password
    #[serde(default)]
    pub password: Option<SecretValue>,
}
