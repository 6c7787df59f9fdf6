//! MongoDB database renderer
//!
//! Resource mode wraps a CosmosDB Mongo database. The owning account is the
//! parent of the database id; the connection string is read through the
//! account's `listConnectionStrings` action.

use tessera_common::model::{LogicalResource, MongoDatabase, ProvisioningMode, ResourceKind};
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

const BACKING_TYPE: &str = "Microsoft.DocumentDB/databaseAccounts/mongodbDatabases";
const BACKING_DESCRIPTION: &str = "a CosmosDB Mongo Database";

impl Connector for MongoDatabase {
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

fn cosmos_mongo_strategy(
    database: &MongoDatabase,
    _ctx: &StrategyContext<'_>,
) -> Result<Vec<OutputResource>> {
    let raw = validation::require_resource(database.backing_resource())?;
    let id = validation::parse_backing_resource(raw, BACKING_TYPE, BACKING_DESCRIPTION)?;
    let account = id.parent().ok_or_else(|| {
        Error::internal_with_context(
            "mongo-renderer",
            format!("database id {id} has no parent account"),
        )
    })?;

    let output = OutputResource::well_known(ResourceType::azure(kinds::AZURE_COSMOSDB_MONGO))?
        .with_property(properties::COSMOS_ACCOUNT_ID, account.as_str())
        .with_property(properties::COSMOS_ACCOUNT_NAME, account.name())
        .with_property(properties::COSMOS_DATABASE_ID, id.as_str())
        .with_property(properties::COSMOS_DATABASE_NAME, id.name())
        .unmanaged();
    Ok(vec![output])
}

/// Renderer for `Applications.Connector/mongoDatabases`
#[derive(Debug)]
pub struct MongoDatabaseRenderer {
    table: ModeDispatchTable<MongoDatabase>,
}

impl Default for MongoDatabaseRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MongoDatabaseRenderer {
    /// Create a renderer supporting resource and values modes
    pub fn new() -> Self {
        Self {
            table: ModeDispatchTable::new(ResourceKind::MongoDatabase)
                .with(ProvisioningMode::Resource, cosmos_mongo_strategy)
                .with(ProvisioningMode::Values, values_strategy::<MongoDatabase>),
        }
    }
}

impl Renderer for MongoDatabaseRenderer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::MongoDatabase
    }

    fn supported_modes(&self) -> Vec<ProvisioningMode> {
        self.table.supported_modes()
    }

    fn render_in_scope(
        &self,
        resource: &LogicalResource,
        scope: &RenderScope,
    ) -> Result<RendererOutput> {
        let LogicalResource::MongoDatabase(database) = resource else {
            return Err(Error::model_conversion(self.kind(), resource.kind()));
        };

        let resources = dispatch(&self.table, database, scope)?;

        let mut output = RendererOutput {
            resources,
            ..Default::default()
        };

        if has_output(&output.resources, &local_ids::AZURE_COSMOSDB_MONGO) {
            output.computed_values.insert(
                names::DATABASE.to_string(),
                ComputedValueReference::Deferred(DeferredReference::property(
                    local_ids::AZURE_COSMOSDB_MONGO,
                    properties::COSMOS_DATABASE_NAME,
                )),
            );
            output.secret_values.insert(
                names::CONNECTION_STRING.to_string(),
                SecretValueReference::Deferred(
                    DeferredReference::action(
                        local_ids::AZURE_COSMOSDB_MONGO,
                        actions::LIST_CONNECTION_STRINGS,
                    )
                    .selecting(actions::FIRST_CONNECTION_STRING_SELECTOR)
                    .with_transformer(ResourceType::azure(kinds::AZURE_COSMOSDB_MONGO)),
                ),
            );
        } else {
            let props = &database.properties;
            let secrets = props.secrets.as_ref();
            output.computed_values =
                present_values([(names::DATABASE, literal(props.database.as_ref()))]);
            output.secret_values = present_values([
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
            ]);
        }

        Ok(output)
    }
}
