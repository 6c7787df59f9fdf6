//! Logical resource data model
//!
//! A [`LogicalResource`] is what the user declares: one connector per kind,
//! tagged on `type` with the fully qualified resource type. Every kind carries
//! the same metadata and [`BasicResourceProperties`] plus its own
//! kind-specific inputs.

mod dapr_state_store;
mod mode;
mod mongo_database;
mod rabbitmq_queue;
mod redis_cache;
mod secret;
mod sql_database;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use dapr_state_store::{DaprStateStore, DaprStateStoreProperties};
pub use mode::{ProvisioningMode, UnknownModeError};
pub use mongo_database::{MongoDatabase, MongoDatabaseProperties, MongoDatabaseSecrets};
pub use rabbitmq_queue::{RabbitMQQueue, RabbitMQQueueProperties, RabbitMQQueueSecrets};
pub use redis_cache::{RedisCache, RedisCacheProperties, RedisCacheSecrets};
pub use secret::SecretValue;
pub use sql_database::{SqlDatabase, SqlDatabaseProperties, SqlDatabaseSecrets};

// =============================================================================
// Shared properties
// =============================================================================

/// Identity of a logical resource
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ResourceMetadata {
    /// Resource identifier of the logical resource itself
    pub id: String,
    /// Resource name
    pub name: String,
}

/// Properties every logical resource carries
///
/// Both are kept as raw strings; renderers parse them and report malformed
/// values as client errors. An empty string means the resource has none.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BasicResourceProperties {
    /// Resource id of the owning application
    #[serde(default)]
    pub application: String,
    /// Resource id of the target environment
    #[serde(default)]
    pub environment: String,
}

// =============================================================================
// Kind
// =============================================================================

/// Closed set of logical resource kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// `Applications.Connector/redisCaches`
    RedisCache,
    /// `Applications.Connector/mongoDatabases`
    MongoDatabase,
    /// `Applications.Connector/sqlDatabases`
    SqlDatabase,
    /// `Applications.Connector/rabbitMQMessageQueues`
    RabbitMQQueue,
    /// `Applications.Connector/daprStateStores`
    DaprStateStore,
}

impl ResourceKind {
    /// Every kind the engine knows about
    pub const ALL: &'static [ResourceKind] = &[
        Self::RedisCache,
        Self::MongoDatabase,
        Self::SqlDatabase,
        Self::RabbitMQQueue,
        Self::DaprStateStore,
    ];

    /// Fully qualified resource type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedisCache => "Applications.Connector/redisCaches",
            Self::MongoDatabase => "Applications.Connector/mongoDatabases",
            Self::SqlDatabase => "Applications.Connector/sqlDatabases",
            Self::RabbitMQQueue => "Applications.Connector/rabbitMQMessageQueues",
            Self::DaprStateStore => "Applications.Connector/daprStateStores",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Logical resource
// =============================================================================

/// A user-declared resource, one variant per kind
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(tag = "type")]
pub enum LogicalResource {
    /// Redis cache connector
    #[serde(rename = "Applications.Connector/redisCaches")]
    RedisCache(RedisCache),
    /// MongoDB database connector
    #[serde(rename = "Applications.Connector/mongoDatabases")]
    MongoDatabase(MongoDatabase),
    /// SQL database connector
    #[serde(rename = "Applications.Connector/sqlDatabases")]
    SqlDatabase(SqlDatabase),
    /// RabbitMQ queue connector
    #[serde(rename = "Applications.Connector/rabbitMQMessageQueues")]
    RabbitMQQueue(RabbitMQQueue),
    /// Dapr state store connector
    #[serde(rename = "Applications.Connector/daprStateStores")]
    DaprStateStore(DaprStateStore),
}

impl LogicalResource {
    /// Kind of this resource
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::RedisCache(_) => ResourceKind::RedisCache,
            Self::MongoDatabase(_) => ResourceKind::MongoDatabase,
            Self::SqlDatabase(_) => ResourceKind::SqlDatabase,
            Self::RabbitMQQueue(_) => ResourceKind::RabbitMQQueue,
            Self::DaprStateStore(_) => ResourceKind::DaprStateStore,
        }
    }

    /// Metadata of this resource
    pub fn metadata(&self) -> &ResourceMetadata {
        match self {
            Self::RedisCache(r) => &r.metadata,
            Self::MongoDatabase(r) => &r.metadata,
            Self::SqlDatabase(r) => &r.metadata,
            Self::RabbitMQQueue(r) => &r.metadata,
            Self::DaprStateStore(r) => &r.metadata,
        }
    }

    /// Application and environment references
    pub fn basic(&self) -> &BasicResourceProperties {
        match self {
            Self::RedisCache(r) => &r.properties.basic,
            Self::MongoDatabase(r) => &r.properties.basic,
            Self::SqlDatabase(r) => &r.properties.basic,
            Self::RabbitMQQueue(r) => &r.properties.basic,
            Self::DaprStateStore(r) => &r.properties.basic,
        }
    }

    /// Provisioning mode requested by the user, if any
    pub fn mode(&self) -> Option<ProvisioningMode> {
        match self {
            Self::RedisCache(r) => r.properties.mode,
            Self::MongoDatabase(r) => r.properties.mode,
            Self::SqlDatabase(r) => r.properties.mode,
            Self::RabbitMQQueue(r) => r.properties.mode,
            Self::DaprStateStore(r) => r.properties.mode,
        }
    }
}
