//! SQL database connector

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BasicResourceProperties, ProvisioningMode, ResourceMetadata, SecretValue};

/// `Applications.Connector/sqlDatabases`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct SqlDatabase {
    /// Resource identity
    pub metadata: ResourceMetadata,
    /// User inputs
    pub properties: SqlDatabaseProperties,
}

/// Inputs of a SQL database connector
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SqlDatabaseProperties {
    /// Application and environment references
    #[serde(flatten)]
    pub basic: BasicResourceProperties,

    /// Requested provisioning mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ProvisioningMode>,

    /// Id of an existing Azure SQL database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Fully qualified server name, when supplied directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Database name, when supplied directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Secrets, when supplied directly
    #[serde(default, skip_serializing)]
    pub secrets: Option<SqlDatabaseSecrets>,
}

/// Write-only SQL secrets
#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SqlDatabaseSecrets {
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
