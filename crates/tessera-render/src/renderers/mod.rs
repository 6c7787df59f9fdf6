//! Per-kind renderers
//!
//! Every connector kind has one renderer built around a
//! [`ModeDispatchTable`]. The shared pieces live here: the [`Connector`] view
//! of a kind's inputs, the generic values-mode strategy, and the dispatch
//! path that applies the conflict policy before running a strategy.

mod dapr_state_stores;
mod mongo_databases;
mod rabbitmq_queues;
mod redis_caches;
mod sql_databases;

pub use dapr_state_stores::DaprStateStoreRenderer;
pub use mongo_databases::MongoDatabaseRenderer;
pub use rabbitmq_queues::RabbitMQQueueRenderer;
pub use redis_caches::RedisCacheRenderer;
pub use sql_databases::SqlDatabaseRenderer;

use std::collections::BTreeMap;

use tessera_common::model::{ProvisioningMode, SecretValue};
use tessera_common::output::{LocalId, OutputResource};
use tessera_common::value::{ComputedValueReference, SecretValueReference};
use tessera_common::Result;

use crate::dispatch::{ModeDispatchTable, StrategyContext};
use crate::renderer::RenderScope;
use crate::validation;

/// Uniform view of a connector's user inputs
pub(crate) trait Connector {
    /// Requested mode
    fn mode(&self) -> Option<ProvisioningMode>;

    /// Raw id of the backing resource, if given
    fn backing_resource(&self) -> Option<&str>;

    /// Names of the direct values and secrets the user supplied
    fn supplied_values(&self) -> Vec<&'static str>;
}

/// Values mode: the user supplies everything, nothing is provisioned
pub(crate) fn values_strategy<R: Connector>(
    resource: &R,
    _ctx: &StrategyContext<'_>,
) -> Result<Vec<OutputResource>> {
    validation::forbid_resource(resource.backing_resource())?;
    Ok(Vec::new())
}

/// Select the strategy, apply the conflict policy, and run the strategy
pub(crate) fn dispatch<R: Connector>(
    table: &ModeDispatchTable<R>,
    resource: &R,
    scope: &RenderScope,
) -> Result<Vec<OutputResource>> {
    let strategy = table.strategy_for(resource.mode())?;
    validation::reject_conflicts(resource.backing_resource(), &resource.supplied_values())?;

    let ctx = StrategyContext {
        application_name: scope.application_name(),
        namespace: &scope.namespace,
        environment: scope.environment_context.as_ref(),
    };
    strategy(resource, &ctx)
}

/// Returns true if the render result contains `local_id`
pub(crate) fn has_output(resources: &[OutputResource], local_id: &LocalId) -> bool {
    resources.iter().any(|r| &r.local_id == local_id)
}

/// Record names of the present optional fields
pub(crate) fn present(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, is_set)| *is_set)
        .map(|(name, _)| *name)
        .collect()
}

/// Literal computed value from an optional input
pub(crate) fn literal<T: Into<serde_json::Value> + Clone>(
    value: Option<&T>,
) -> Option<ComputedValueReference> {
    value.map(|v| ComputedValueReference::Literal(v.clone().into()))
}

/// Literal secret value from an optional input
pub(crate) fn literal_secret(value: Option<&SecretValue>) -> Option<SecretValueReference> {
    value.map(|v| SecretValueReference::Literal(v.clone()))
}

/// Named values map, dropping the entries that were not supplied
pub(crate) fn present_values<V, const N: usize>(
    entries: [(&str, Option<V>); N],
) -> BTreeMap<String, V> {
    entries
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}
