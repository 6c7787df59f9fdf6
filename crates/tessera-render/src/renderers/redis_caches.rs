//! Redis cache renderer
//!
//! Resource mode wraps an existing Azure Cache for Redis; host and port are
//! read from the deployed cache and the access key through `listKeys`.

use std::collections::BTreeMap;

use tessera_common::model::{LogicalResource, ProvisioningMode, RedisCache, ResourceKind};
use tessera_common::output::{kinds, local_ids, properties, OutputResource, ResourceType};
use tessera_common::value::{
    actions, names, ComputedValueReference, DeferredReference, SecretValueReference,
};
use tessera_common::{Error, Result};

use super::{
    dispatch, has_output, literal, literal_secret, present, present_values, values_strategy,
    Connector,
};
use crate::dispatch::{ModeDispatchTable, StrategyContext};
use crate::renderer::{RenderScope, Renderer, RendererOutput};
use crate::validation;

const BACKING_TYPE: &str = "Microsoft.Cache/Redis";
const BACKING_DESCRIPTION: &str = "an Azure Redis Cache";

impl Connector for RedisCache {
    fn mode(&self) -> Option<ProvisioningMode> {
        self.properties.mode
    }

    fn backing_resource(&self) -> Option<&str> {
        self.properties.resource.as_deref()
    }

    fn supplied_values(&self) -> Vec<&'static str> {
        let props = &self.properties;
        let secrets = props.secrets.as_ref();
        present(&[
            (names::HOST, props.host.is_some()),
            (names::PORT, props.port.is_some()),
            (
                names::CONNECTION_STRING,
                secrets.is_some_and(|s| s.connection_string.is_some()),
            ),
            (
                names::PASSWORD,
                secrets.is_some_and(|s| s.password.is_some()),
            ),
        ])
    }
}

fn azure_redis_strategy(
    cache: &RedisCache,
    _ctx: &StrategyContext<'_>,
) -> Result<Vec<OutputResource>> {
    let raw = validation::require_resource(cache.backing_resource())?;
    let id = validation::parse_backing_resource(raw, BACKING_TYPE, BACKING_DESCRIPTION)?;

    let output = OutputResource::well_known(ResourceType::azure(kinds::AZURE_REDIS))?
        .with_property(properties::REDIS_RESOURCE_ID, id.as_str())
        .with_property(properties::REDIS_NAME, id.name())
        .unmanaged();
    Ok(vec![output])
}

/// Renderer for `Applications.Connector/redisCaches`
#[derive(Debug)]
pub struct RedisCacheRenderer {
    table: ModeDispatchTable<RedisCache>,
}

impl Default for RedisCacheRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RedisCacheRenderer {
    /// Create a renderer supporting resource and values modes
    pub fn new() -> Self {
        Self {
            table: ModeDispatchTable::new(ResourceKind::RedisCache)
                .with(ProvisioningMode::Resource, azure_redis_strategy)
                .with(ProvisioningMode::Values, values_strategy::<RedisCache>),
        }
    }
}

impl Renderer for RedisCacheRenderer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::RedisCache
    }

    fn supported_modes(&self) -> Vec<ProvisioningMode> {
        self.table.supported_modes()
    }

    fn render_in_scope(
        &self,
        resource: &LogicalResource,
        scope: &RenderScope,
    ) -> Result<RendererOutput> {
        let LogicalResource::RedisCache(cache) = resource else {
            return Err(Error::model_conversion(self.kind(), resource.kind()));
        };

        let resources = dispatch(&self.table, cache, scope)?;

        let (computed_values, secret_values) =
            if has_output(&resources, &local_ids::AZURE_REDIS) {
                deferred_values()
            } else {
                literal_values(cache)
            };

        Ok(RendererOutput {
            resources,
            computed_values,
            secret_values,
        })
    }
}

type Values = (
    BTreeMap<String, ComputedValueReference>,
    BTreeMap<String, SecretValueReference>,
);

fn deferred_values() -> Values {
    let host = DeferredReference::property(local_ids::AZURE_REDIS, properties::REDIS_HOST);
    let port = DeferredReference::property(local_ids::AZURE_REDIS, properties::REDIS_PORT);
    let primary_key = DeferredReference::action(local_ids::AZURE_REDIS, actions::LIST_KEYS)
        .selecting(actions::PRIMARY_KEY_SELECTOR);
    // connection string is assembled from host, port and key after retrieval
    let connection_string = primary_key
        .clone()
        .with_transformer(ResourceType::azure(kinds::AZURE_REDIS));

    let computed = BTreeMap::from([
        (names::HOST.to_string(), ComputedValueReference::Deferred(host)),
        (names::PORT.to_string(), ComputedValueReference::Deferred(port)),
    ]);
    let secrets = BTreeMap::from([
        (
            names::PASSWORD.to_string(),
            SecretValueReference::Deferred(primary_key),
        ),
        (
            names::CONNECTION_STRING.to_string(),
            SecretValueReference::Deferred(connection_string),
        ),
    ]);
    (computed, secrets)
}

fn literal_values(cache: &RedisCache) -> Values {
    let props = &cache.properties;
    let secrets = props.secrets.as_ref();

    let computed = present_values([
        (names::HOST, literal(props.host.as_ref())),
        (names::PORT, literal(props.port.as_ref())),
    ]);
    let secrets = present_values([
        (
            names::CONNECTION_STRING,
            literal_secret(secrets.and_then(|s| s.connection_string.as_ref())),
        ),
        (
            names::PASSWORD,
            literal_secret(secrets.and_then(|s| s.password.as_ref())),
        ),
    ]);
    (computed, secrets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderOptions;
    use serde_json::json;
    use tessera_common::ErrorCode;

    const APP_ID: &str =
        "/subscriptions/test-sub/resourceGroups/test-group/providers/Applications.Core/applications/test-app";
    const CACHE_ID: &str =
        "/subscriptions/test-sub/resourceGroups/testGroup/providers/Microsoft.Cache/Redis/testCache";

    fn cache(properties: serde_json::Value) -> LogicalResource {
        let mut props = json!({ "application": APP_ID });
        if let (Some(base), Some(extra)) = (props.as_object_mut(), properties.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(json!({
            "type": "Applications.Connector/redisCaches",
            "metadata": {
                "id": "/subscriptions/test-sub/resourceGroups/test-group/providers/Applications.Connector/redisCaches/redis0",
                "name": "redis0"
            },
            "properties": props
        }))
        .unwrap()
    }

    fn render(resource: &LogicalResource) -> Result<RendererOutput> {
        RedisCacheRenderer::new().render(resource, &RenderOptions::default())
    }

    // =========================================================================
    // Story: Wrapping an existing cache
    // =========================================================================

    #[test]
    fn story_resource_mode_wraps_existing_cache() {
        let output = render(&cache(json!({ "mode": "resource", "resource": CACHE_ID }))).unwrap();

        assert_eq!(output.resources.len(), 1);
        let wrapped = &output.resources[0];
        assert_eq!(wrapped.local_id, local_ids::AZURE_REDIS);
        assert_eq!(wrapped.resource_type, ResourceType::azure(kinds::AZURE_REDIS));
        assert!(!wrapped.managed);
        assert_eq!(wrapped.properties[properties::REDIS_RESOURCE_ID], CACHE_ID);
        assert_eq!(wrapped.properties[properties::REDIS_NAME], "testCache");

        let host = output.computed_values[names::HOST].as_deferred().unwrap();
        assert_eq!(host.local_id(), &local_ids::AZURE_REDIS);
        assert_eq!(host.property_reference(), Some(properties::REDIS_HOST));

        let password = output.secret_values[names::PASSWORD].as_deferred().unwrap();
        assert_eq!(password.action_name(), Some(actions::LIST_KEYS));
        assert_eq!(password.value_selector(), Some(actions::PRIMARY_KEY_SELECTOR));
        assert_eq!(password.transformer(), None);

        let connection = output.secret_values[names::CONNECTION_STRING]
            .as_deferred()
            .unwrap();
        assert_eq!(
            connection.transformer(),
            Some(&ResourceType::azure(kinds::AZURE_REDIS))
        );
    }

    #[test]
    fn story_resource_mode_requires_resource() {
        let err = render(&cache(json!({ "mode": "resource" }))).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::Invalid));
        assert_eq!(err.field(), Some("resource"));
    }

    // =========================================================================
    // Story: Direct values
    // =========================================================================

    #[test]
    fn story_values_mode_passes_values_through() {
        let output = render(&cache(json!({
            "mode": "values",
            "host": "hello.com",
            "port": 1234,
            "secrets": { "connectionString": "test-connection-string", "password": "testpassword" }
        })))
        .unwrap();

        assert!(output.resources.is_empty());
        assert_eq!(
            output.computed_values[names::HOST].as_literal(),
            Some(&json!("hello.com"))
        );
        assert_eq!(
            output.computed_values[names::PORT].as_literal(),
            Some(&json!(1234))
        );
        assert_eq!(
            output.secret_values[names::PASSWORD]
                .as_literal()
                .map(|s| s.expose()),
            Some("testpassword")
        );
        assert_eq!(
            output.secret_values[names::CONNECTION_STRING]
                .as_literal()
                .map(|s| s.expose()),
            Some("test-connection-string")
        );
    }

    #[test]
    fn story_values_mode_omits_unsupplied_values() {
        let output = render(&cache(json!({ "mode": "values", "host": "localhost" }))).unwrap();
        assert_eq!(output.computed_values.len(), 1);
        assert!(output.secret_values.is_empty());
    }

    #[test]
    fn story_values_mode_rejects_resource() {
        let err = render(&cache(json!({ "mode": "values", "resource": CACHE_ID }))).unwrap_err();
        assert_eq!(err.field(), Some("resource"));
        assert!(err.to_string().contains("mode is 'values'"));
    }

    #[test]
    fn story_resource_and_values_conflict() {
        let err = render(&cache(json!({
            "mode": "resource",
            "resource": CACHE_ID,
            "host": "hello.com",
            "secrets": { "password": "p" }
        })))
        .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::Invalid));
        assert_eq!(
            err.to_string(),
            "the 'resource' field cannot be combined with directly supplied values: host, password"
        );
    }

    // =========================================================================
    // Story: Invalid inputs
    // =========================================================================

    #[test]
    fn test_recipe_mode_is_bad_request() {
        let err = render(&cache(json!({ "mode": "recipe" }))).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::BadRequest));
        assert!(err.to_string().contains("[resource, values]"));
    }

    #[test]
    fn test_wrong_kind_is_model_conversion() {
        let sql: LogicalResource = serde_json::from_value(json!({
            "type": "Applications.Connector/sqlDatabases",
            "metadata": { "id": "/subscriptions/s/resourceGroups/g/providers/Applications.Connector/sqlDatabases/db", "name": "db" },
            "properties": { "application": APP_ID, "mode": "values" }
        }))
        .unwrap();

        let err = render(&sql).unwrap_err();
        assert!(matches!(err, Error::ModelConversion { .. }));
    }
}
