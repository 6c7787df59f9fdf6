//! Dapr state store renderer
//!
//! Resource mode points at an Azure Table Storage table and generates the
//! Dapr `Component` object that exposes it as a state store. The component is
//! owned by the platform, unlike the wrapped cloud resources of other kinds.

use tessera_common::model::{DaprStateStore, LogicalResource, ProvisioningMode, ResourceKind};
use tessera_common::output::{kinds, local_ids, properties, OutputResource, ResourceType};
use tessera_common::value::{names, ComputedValueReference, DeferredReference};
use tessera_common::{Error, Result};
use tracing::debug;

use super::{dispatch, has_output, Connector};
use crate::dapr::{DaprComponent, STATE_AZURE_TABLESTORAGE};
use crate::dispatch::{ModeDispatchTable, StrategyContext};
use crate::renderer::{RenderScope, Renderer, RendererOutput};
use crate::validation;

const BACKING_TYPE: &str = "Microsoft.Storage/storageAccounts/tableServices/tables";
const BACKING_DESCRIPTION: &str = "an Azure Table Storage table";

impl Connector for DaprStateStore {
    fn mode(&self) -> Option<ProvisioningMode> {
        self.properties.mode
    }

    fn backing_resource(&self) -> Option<&str> {
        self.properties.resource.as_deref()
    }

    fn supplied_values(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

fn azure_table_storage_strategy(
    store: &DaprStateStore,
    ctx: &StrategyContext<'_>,
) -> Result<Vec<OutputResource>> {
    let raw = validation::require_resource(store.backing_resource())?;
    let id = validation::parse_backing_resource(raw, BACKING_TYPE, BACKING_DESCRIPTION)?;

    let account_name = id
        .type_segments()
        .first()
        .map(|segment| segment.name.clone())
        .ok_or_else(|| {
            Error::internal_with_context(
                "dapr-statestore-renderer",
                format!("table id {id} has no storage account segment"),
            )
        })?;
    let table_name = id.name();
    let component_name = validation::normalize_resource_name(&store.metadata.name);

    debug!(
        component = %component_name,
        namespace = %ctx.namespace,
        account = %account_name,
        "generating dapr state store component"
    );

    let labels =
        validation::generated_labels(ctx.application_name, &store.metadata.name, ctx.environment);
    let manifest = DaprComponent::new(&component_name, ctx.namespace, labels, STATE_AZURE_TABLESTORAGE)
        .with_metadata("accountName", &account_name)
        .with_metadata("tableName", table_name)
        .to_manifest()?;

    let output = OutputResource::well_known(ResourceType::kubernetes(
        kinds::DAPR_STATESTORE_AZURE_STORAGE,
    ))?
    .with_property(properties::RESOURCE_ID, id.as_str())
    .with_property(properties::STORAGE_ACCOUNT_NAME, account_name)
    .with_property(properties::TABLE_NAME, table_name)
    .with_property(properties::KUBERNETES_NAME, &component_name)
    .with_property(properties::KUBERNETES_NAMESPACE, ctx.namespace)
    .with_property(properties::COMPONENT_NAME, component_name)
    .with_manifest(manifest);
    Ok(vec![output])
}

/// Renderer for `Applications.Connector/daprStateStores`
#[derive(Debug)]
pub struct DaprStateStoreRenderer {
    table: ModeDispatchTable<DaprStateStore>,
}

impl Default for DaprStateStoreRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DaprStateStoreRenderer {
    /// Create a renderer supporting resource mode only
    pub fn new() -> Self {
        Self {
            table: ModeDispatchTable::new(ResourceKind::DaprStateStore)
                .with(ProvisioningMode::Resource, azure_table_storage_strategy),
        }
    }
}

impl Renderer for DaprStateStoreRenderer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::DaprStateStore
    }

    fn supported_modes(&self) -> Vec<ProvisioningMode> {
        self.table.supported_modes()
    }

    fn render_in_scope(
        &self,
        resource: &LogicalResource,
        scope: &RenderScope,
    ) -> Result<RendererOutput> {
        let LogicalResource::DaprStateStore(store) = resource else {
            return Err(Error::model_conversion(self.kind(), resource.kind()));
        };

        let resources = dispatch(&self.table, store, scope)?;

        let mut output = RendererOutput {
            resources,
            ..Default::default()
        };
        if has_output(&output.resources, &local_ids::DAPR_STATESTORE_AZURE_STORAGE) {
            output.computed_values.insert(
                names::COMPONENT_NAME.to_string(),
                ComputedValueReference::Deferred(DeferredReference::property(
                    local_ids::DAPR_STATESTORE_AZURE_STORAGE,
                    properties::COMPONENT_NAME,
                )),
            );
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{EnvironmentContext, RenderOptions};
    use serde_json::json;
    use std::collections::BTreeMap;
    use tessera_common::output::Provider;
    use tessera_common::{ErrorCode, APPLICATION_LABEL_KEY, RESOURCE_LABEL_KEY};

    const TABLE_ID: &str = "/subscriptions/test-sub/resourceGroups/test-group/providers/Microsoft.Storage/storageAccounts/teststorage/tableServices/default/tables/orders";

    fn store(properties: serde_json::Value) -> LogicalResource {
        let mut props = json!({
            "application": "/subscriptions/test-sub/resourceGroups/test-group/providers/Applications.Core/applications/Shop"
        });
        if let (Some(base), Some(extra)) = (props.as_object_mut(), properties.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(json!({
            "type": "Applications.Connector/daprStateStores",
            "metadata": {
                "id": "/subscriptions/test-sub/resourceGroups/test-group/providers/Applications.Connector/daprStateStores/OrderStore",
                "name": "OrderStore"
            },
            "properties": props
        }))
        .unwrap()
    }

    // =========================================================================
    // Story: Generating a state store component
    // =========================================================================

    #[test]
    fn story_resource_mode_generates_component() {
        let options = RenderOptions {
            namespace: "shop-ns".to_string(),
            environment: Some(EnvironmentContext {
                name: "prod".to_string(),
                labels: BTreeMap::from([("tier".to_string(), "gold".to_string())]),
            }),
        };
        let output = DaprStateStoreRenderer::new()
            .render(&store(json!({ "mode": "resource", "resource": TABLE_ID })), &options)
            .unwrap();

        assert_eq!(output.resources.len(), 1);
        let component = &output.resources[0];
        assert_eq!(component.local_id, local_ids::DAPR_STATESTORE_AZURE_STORAGE);
        assert_eq!(component.resource_type.provider, Provider::Kubernetes);
        assert!(component.managed);
        assert_eq!(component.properties[properties::STORAGE_ACCOUNT_NAME], "teststorage");
        assert_eq!(component.properties[properties::TABLE_NAME], "orders");
        assert_eq!(component.properties[properties::KUBERNETES_NAMESPACE], "shop-ns");

        let manifest = component.manifest.as_ref().unwrap();
        assert_eq!(manifest["metadata"]["name"], "orderstore");
        assert_eq!(manifest["metadata"]["namespace"], "shop-ns");
        assert_eq!(manifest["metadata"]["labels"][APPLICATION_LABEL_KEY], "shop");
        assert_eq!(manifest["metadata"]["labels"][RESOURCE_LABEL_KEY], "orderstore");
        assert_eq!(manifest["metadata"]["labels"]["tier"], "gold");
        assert_eq!(manifest["spec"]["type"], STATE_AZURE_TABLESTORAGE);

        let name = output.computed_values[names::COMPONENT_NAME]
            .as_deferred()
            .unwrap();
        assert_eq!(name.property_reference(), Some(properties::COMPONENT_NAME));
        assert!(output.secret_values.is_empty());
    }

    #[test]
    fn story_values_mode_is_unsupported() {
        let err = DaprStateStoreRenderer::new()
            .render(&store(json!({ "mode": "values" })), &RenderOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::BadRequest));
        assert!(err.to_string().ends_with("supported mode values: [resource]"));
    }

    #[test]
    fn story_storage_account_is_wrong_category() {
        let err = DaprStateStoreRenderer::new()
            .render(
                &store(json!({
                    "mode": "resource",
                    "resource": "/subscriptions/test-sub/resourceGroups/test-group/providers/Microsoft.Storage/storageAccounts/teststorage"
                })),
                &RenderOptions::default(),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "the 'resource' field must refer to an Azure Table Storage table"
        );
    }
}
