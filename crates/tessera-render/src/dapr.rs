//! Dapr component serialization types
//!
//! Typed representation of `dapr.io/v1alpha1` Component objects generated for
//! Dapr connectors. Serialized into the manifest of a Kubernetes output
//! resource.

use std::collections::BTreeMap;

use serde::Serialize;

use tessera_common::{Error, Result, DAPR_API_VERSION};

/// Component type for the Azure Table Storage state store
pub const STATE_AZURE_TABLESTORAGE: &str = "state.azure.tablestorage";

/// Dapr Component resource (`dapr.io/v1alpha1` Kind: Component)
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaprComponent {
    pub api_version: String,
    pub kind: String,
    pub metadata: ComponentMetadata,
    pub spec: ComponentSpec,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    #[serde(rename = "type")]
    pub type_: String,
    pub version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataItem>,
}

/// One `name`/`value` entry of a component spec
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

impl DaprComponent {
    /// A component of `component_type` at version `v1`
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        labels: BTreeMap<String, String>,
        component_type: impl Into<String>,
    ) -> Self {
        Self {
            api_version: DAPR_API_VERSION.to_string(),
            kind: "Component".to_string(),
            metadata: ComponentMetadata {
                name: name.into(),
                namespace: namespace.into(),
                labels,
            },
            spec: ComponentSpec {
                type_: component_type.into(),
                version: "v1".to_string(),
                metadata: Vec::new(),
            },
        }
    }

    /// Append a metadata entry
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.metadata.push(MetadataItem {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// JSON manifest for an output resource
    pub fn to_manifest(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::serialization_for_kind(self.kind.clone(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_serializes_with_camel_case_and_type() {
        let component = DaprComponent::new(
            "statestore",
            "apps",
            BTreeMap::from([("app".to_string(), "shop".to_string())]),
            STATE_AZURE_TABLESTORAGE,
        )
        .with_metadata("accountName", "acct")
        .with_metadata("tableName", "orders");

        let json = component.to_manifest().unwrap();

        assert_eq!(json["apiVersion"], "dapr.io/v1alpha1");
        assert_eq!(json["kind"], "Component");
        assert_eq!(json["metadata"]["namespace"], "apps");
        assert_eq!(json["metadata"]["labels"]["app"], "shop");
        assert_eq!(json["spec"]["type"], "state.azure.tablestorage");
        assert_eq!(json["spec"]["version"], "v1");
        assert_eq!(json["spec"]["metadata"][1]["name"], "tableName");
        assert_eq!(json["spec"]["metadata"][1]["value"], "orders");
    }

    #[test]
    fn test_empty_labels_are_omitted() {
        let component = DaprComponent::new("s", "default", BTreeMap::new(), "state.redis");
        let json = component.to_manifest().unwrap();
        assert!(json["metadata"].get("labels").is_none());
        assert!(json["spec"].get("metadata").is_none());
    }
}
