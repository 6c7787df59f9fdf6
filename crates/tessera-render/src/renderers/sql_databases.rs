//! SQL database renderer

use tessera_common::model::{LogicalResource, ProvisioningMode, ResourceKind, SqlDatabase};
use tessera_common::output::{kinds, local_ids, properties, OutputResource, ResourceType};
use tessera_common::value::{names, ComputedValueReference, DeferredReference};
use tessera_common::{Error, Result};

use super::{
    dispatch, has_output, literal, literal_secret, present, present_values, values_strategy,
    Connector,
};
use crate::dispatch::{ModeDispatchTable, StrategyContext};
use crate::renderer::{RenderScope, Renderer, RendererOutput};
use crate::validation;

const BACKING_TYPE: &str = "Microsoft.Sql/servers/databases";
const BACKING_DESCRIPTION: &str = "an Azure SQL Database";

impl Connector for SqlDatabase {
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
            (names::SERVER, props.server.is_some()),
            (names::DATABASE, props.database.is_some()),
            (
                names::CONNECTION_STRING,
                secrets.is_some_and(|s| s.connection_string.is_some()),
            ),
            (
                names::USERNAME,
                secrets.is_some_and(|s| s.username.is_some()),
            ),
            (
                names::PASSWORD,
                secrets.is_some_and(|s| s.password.is_some()),
            ),
        ])
    }
}

fn azure_sql_strategy(
    database: &SqlDatabase,
    _ctx: &StrategyContext<'_>,
) -> Result<Vec<OutputResource>> {
    let raw = validation::require_resource(database.backing_resource())?;
    let id = validation::parse_backing_resource(raw, BACKING_TYPE, BACKING_DESCRIPTION)?;

    let output = OutputResource::well_known(ResourceType::azure(kinds::AZURE_SQL_DATABASE))?
        .with_property(properties::RESOURCE_ID, id.as_str())
        .with_property(properties::RESOURCE_NAME, id.name())
        .unmanaged();
    Ok(vec![output])
}

/// Renderer for `Applications.Connector/sqlDatabases`
///
/// Azure SQL exposes no key-listing action, so resource mode yields only the
/// server and database names; credentials come through values mode.
#[derive(Debug)]
pub struct SqlDatabaseRenderer {
    table: ModeDispatchTable<SqlDatabase>,
}

impl Default for SqlDatabaseRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDatabaseRenderer {
    /// Create a renderer supporting resource and values modes
    pub fn new() -> Self {
        Self {
            table: ModeDispatchTable::new(ResourceKind::SqlDatabase)
                .with(ProvisioningMode::Resource, azure_sql_strategy)
                .with(ProvisioningMode::Values, values_strategy::<SqlDatabase>),
        }
    }
}

impl Renderer for SqlDatabaseRenderer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::SqlDatabase
    }

    fn supported_modes(&self) -> Vec<ProvisioningMode> {
        self.table.supported_modes()
    }

    fn render_in_scope(
        &self,
        resource: &LogicalResource,
        scope: &RenderScope,
    ) -> Result<RendererOutput> {
        let LogicalResource::SqlDatabase(database) = resource else {
            return Err(Error::model_conversion(self.kind(), resource.kind()));
        };

        let resources = dispatch(&self.table, database, scope)?;

        if has_output(&resources, &local_ids::AZURE_SQL_DATABASE) {
            let deferred = |property: &'static str| {
                ComputedValueReference::Deferred(DeferredReference::property(
                    local_ids::AZURE_SQL_DATABASE,
                    property,
                ))
            };
            return Ok(RendererOutput {
                resources,
                computed_values: [
                    (names::SERVER.to_string(), deferred(properties::SQL_SERVER_FQDN)),
                    (names::DATABASE.to_string(), deferred(properties::SQL_DATABASE_NAME)),
                ]
                .into(),
                secret_values: Default::default(),
            });
        }

        let props = &database.properties;
        let secrets = props.secrets.as_ref();
        Ok(RendererOutput {
            resources,
            computed_values: present_values([
                (names::SERVER, literal(props.server.as_ref())),
                (names::DATABASE, literal(props.database.as_ref())),
            ]),
            secret_values: present_values([
                (
                    names::CONNECTION_STRING,
                    literal_secret(secrets.and_then(|s| s.connection_string.as_ref())),
                ),
                (
                    names::USERNAME,
                    literal_secret(secrets.and_then(|s| s.username.as_ref())),
                ),
                (
                    names::PASSWORD,
                    literal_secret(secrets.and_then(|s| s.password.as_ref())),
                ),
            ]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RenderOptions;
    use serde_json::json;

    const APP_ID: &str =
        "/subscriptions/test-sub/resourceGroups/test-group/providers/Applications.Core/applications/test-app";
    const DATABASE_ID: &str = "/subscriptions/test-sub/resourceGroups/test-group/providers/Microsoft.Sql/servers/test-server/databases/test-database";

    fn sql(properties: serde_json::Value) -> LogicalResource {
        let mut props = json!({ "application": APP_ID });
        if let (Some(base), Some(extra)) = (props.as_object_mut(), properties.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(json!({
            "type": "Applications.Connector/sqlDatabases",
            "metadata": {
                "id": "/subscriptions/test-sub/resourceGroups/test-group/providers/Applications.Connector/sqlDatabases/sql0",
                "name": "sql0"
            },
            "properties": props
        }))
        .unwrap()
    }

    fn render(resource: &LogicalResource) -> Result<RendererOutput> {
        SqlDatabaseRenderer::new().render(resource, &RenderOptions::default())
    }

    #[test]
    fn story_resource_mode_defers_server_and_database() {
        let output = render(&sql(json!({ "mode": "resource", "resource": DATABASE_ID }))).unwrap();

        assert_eq!(output.resources.len(), 1);
        assert_eq!(output.resources[0].local_id, local_ids::AZURE_SQL_DATABASE);
        assert_eq!(
            output.resources[0].properties[properties::RESOURCE_NAME],
            "test-database"
        );

        let server = output.computed_values[names::SERVER].as_deferred().unwrap();
        assert_eq!(server.property_reference(), Some(properties::SQL_SERVER_FQDN));
        let database = output.computed_values[names::DATABASE].as_deferred().unwrap();
        assert_eq!(database.property_reference(), Some(properties::SQL_DATABASE_NAME));
        assert!(output.secret_values.is_empty());
    }

    #[test]
    fn story_server_id_is_wrong_category() {
        let err = render(&sql(json!({
            "mode": "resource",
            "resource": "/subscriptions/test-sub/resourceGroups/test-group/providers/Microsoft.Sql/servers/test-server"
        })))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "the 'resource' field must refer to an Azure SQL Database"
        );
    }

    #[test]
    fn story_values_mode_uses_literals() {
        let output = render(&sql(json!({
            "mode": "values",
            "server": "sql.example.com",
            "database": "inventory",
            "secrets": { "connectionString": "Server=sql.example.com" }
        })))
        .unwrap();

        assert!(output.resources.is_empty());
        assert_eq!(
            output.computed_values[names::SERVER].as_literal(),
            Some(&json!("sql.example.com"))
        );
        assert_eq!(output.secret_values.len(), 1);
    }
}
