//! Dapr state store connector

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{BasicResourceProperties, ProvisioningMode, ResourceMetadata};

/// `Applications.Connector/daprStateStores`
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct DaprStateStore {
    /// Resource identity
    pub metadata: ResourceMetadata,
    /// User inputs
    pub properties: DaprStateStoreProperties,
}

/// Inputs of a Dapr state store connector
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaprStateStoreProperties {
    /// Application and environment references
    #[serde(flatten)]
    pub basic: BasicResourceProperties,

    /// Requested provisioning mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ProvisioningMode>,

    /// Id of an existing Azure Table Storage table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}
