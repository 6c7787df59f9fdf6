//! Output resources
//!
//! An [`OutputResource`] is one concrete piece of infrastructure a logical
//! resource renders to. Each carries a [`LocalId`] that is stable and unique
//! within a single render result; deferred value references point at outputs
//! through that id.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{Error, Result};

/// Well-known output resource kinds
pub mod kinds {
    /// Azure Cache for Redis
    pub const AZURE_REDIS: &str = "azure.redis";
    /// CosmosDB Mongo database
    pub const AZURE_COSMOSDB_MONGO: &str = "azure.cosmosdb.mongo";
    /// Azure SQL database
    pub const AZURE_SQL_DATABASE: &str = "azure.sql.database";
    /// Dapr state store component backed by Azure Table Storage
    pub const DAPR_STATESTORE_AZURE_STORAGE: &str = "dapr.statestore.azurestorage";
}

/// Well-known local ids, one per reserved (provider, kind) pair
pub mod local_ids {
    use super::LocalId;

    /// Wrapped Azure Cache for Redis
    pub const AZURE_REDIS: LocalId = LocalId::from_static("AzureRedis");
    /// Wrapped CosmosDB Mongo database
    pub const AZURE_COSMOSDB_MONGO: LocalId = LocalId::from_static("AzureCosmosDBMongo");
    /// Wrapped Azure SQL database
    pub const AZURE_SQL_DATABASE: LocalId = LocalId::from_static("AzureSqlDatabase");
    /// Generated Dapr state store component
    pub const DAPR_STATESTORE_AZURE_STORAGE: LocalId =
        LocalId::from_static("DaprStateStoreAzureStorage");
}

/// Property keys recorded on output resources
pub mod properties {
    /// Resource id of a wrapped cloud resource
    pub const RESOURCE_ID: &str = "resourceid";
    /// Name of a wrapped cloud resource
    pub const RESOURCE_NAME: &str = "resourcename";
    /// Redis cache id
    pub const REDIS_RESOURCE_ID: &str = "redisresourceid";
    /// Redis cache name
    pub const REDIS_NAME: &str = "redisname";
    /// Redis host (filled in after deployment)
    pub const REDIS_HOST: &str = "redishost";
    /// Redis port (filled in after deployment)
    pub const REDIS_PORT: &str = "redisport";
    /// CosmosDB account id
    pub const COSMOS_ACCOUNT_ID: &str = "cosmosaccountid";
    /// CosmosDB account name
    pub const COSMOS_ACCOUNT_NAME: &str = "cosmosaccountname";
    /// CosmosDB database id
    pub const COSMOS_DATABASE_ID: &str = "cosmosdatabaseid";
    /// CosmosDB database name
    pub const COSMOS_DATABASE_NAME: &str = "cosmosdatabasename";
    /// SQL server fully qualified domain name (filled in after deployment)
    pub const SQL_SERVER_FQDN: &str = "fullyQualifiedDomainName";
    /// SQL database name
    pub const SQL_DATABASE_NAME: &str = "databasename";
    /// Storage account name
    pub const STORAGE_ACCOUNT_NAME: &str = "storageaccountname";
    /// Table name
    pub const TABLE_NAME: &str = "tablename";
    /// Kubernetes object name
    pub const KUBERNETES_NAME: &str = "name";
    /// Kubernetes object namespace
    pub const KUBERNETES_NAMESPACE: &str = "namespace";
    /// Dapr component name
    pub const COMPONENT_NAME: &str = "componentname";
}

// =============================================================================
// Resource type
// =============================================================================

/// Platform that owns an output resource
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Azure Resource Manager
    Azure,
    /// Kubernetes API server
    Kubernetes,
}

impl Provider {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::Kubernetes => "kubernetes",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of an output resource: provider plus provider-specific kind
#[derive(Clone, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceType {
    /// Owning platform
    pub provider: Provider,
    /// Kind within the platform, e.g. `azure.redis`
    #[serde(rename = "type")]
    pub kind: Cow<'static, str>,
}

impl ResourceType {
    /// Azure resource type with a static kind
    pub const fn azure(kind: &'static str) -> Self {
        Self {
            provider: Provider::Azure,
            kind: Cow::Borrowed(kind),
        }
    }

    /// Kubernetes resource type with a static kind
    pub const fn kubernetes(kind: &'static str) -> Self {
        Self {
            provider: Provider::Kubernetes,
            kind: Cow::Borrowed(kind),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.kind)
    }
}

// =============================================================================
// Local id
// =============================================================================

/// Identifier of an output resource within one render result
#[derive(Clone, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct LocalId(Cow<'static, str>);

impl LocalId {
    /// A local id from a static string
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// A local id from an owned string
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// The id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reserved local id for a resource type, if one exists
    pub fn well_known(resource_type: &ResourceType) -> Option<LocalId> {
        let id = match (resource_type.provider, resource_type.kind.as_ref()) {
            (Provider::Azure, kinds::AZURE_REDIS) => local_ids::AZURE_REDIS,
            (Provider::Azure, kinds::AZURE_COSMOSDB_MONGO) => local_ids::AZURE_COSMOSDB_MONGO,
            (Provider::Azure, kinds::AZURE_SQL_DATABASE) => local_ids::AZURE_SQL_DATABASE,
            (Provider::Kubernetes, kinds::DAPR_STATESTORE_AZURE_STORAGE) => {
                local_ids::DAPR_STATESTORE_AZURE_STORAGE
            }
            _ => return None,
        };
        Some(id)
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Output resource
// =============================================================================

/// One concrete resource produced by rendering
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputResource {
    /// Id unique within the render result
    pub local_id: LocalId,
    /// Provider and kind
    pub resource_type: ResourceType,
    /// Whether the platform owns the lifecycle of this resource
    pub managed: bool,
    /// Provider-specific key/value identity
    pub properties: BTreeMap<String, String>,
    /// Full object for providers that take manifests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<serde_json::Value>,
    /// Local ids this resource must be deployed after
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<LocalId>,
}

impl OutputResource {
    /// An output resource with an explicit local id
    pub fn new(local_id: LocalId, resource_type: ResourceType) -> Self {
        Self {
            local_id,
            resource_type,
            managed: true,
            properties: BTreeMap::new(),
            manifest: None,
            dependencies: Vec::new(),
        }
    }

    /// An output resource using the reserved local id of its type
    ///
    /// Fails with an internal error when the type has no reservation.
    pub fn well_known(resource_type: ResourceType) -> Result<Self> {
        let local_id = LocalId::well_known(&resource_type).ok_or_else(|| {
            Error::internal_with_context(
                "output-resource",
                format!("no well-known local id for resource type {resource_type}"),
            )
        })?;
        Ok(Self::new(local_id, resource_type))
    }

    /// Record a provider property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Attach a full object manifest
    pub fn with_manifest(mut self, manifest: serde_json::Value) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Deploy after another output of the same result
    pub fn depends_on(mut self, local_id: LocalId) -> Self {
        self.dependencies.push(local_id);
        self
    }

    /// Mark as a wrapper around a user-owned resource
    pub fn unmanaged(mut self) -> Self {
        self.managed = false;
        self
    }
}
