//! RabbitMQ queue renderer
//!
//! There is no managed RabbitMQ offering to wrap, so values mode is the only
//! mode and the queue name is required.

use tessera_common::model::{LogicalResource, ProvisioningMode, RabbitMQQueue, ResourceKind};
use tessera_common::output::OutputResource;
use tessera_common::value::names;
use tessera_common::{Error, Result};

use super::{dispatch, literal, literal_secret, present, present_values, Connector};
use crate::dispatch::{ModeDispatchTable, StrategyContext};
use crate::renderer::{RenderScope, Renderer, RendererOutput};
use crate::validation;

impl Connector for RabbitMQQueue {
    fn mode(&self) -> Option<ProvisioningMode> {
        self.properties.mode
    }

    fn backing_resource(&self) -> Option<&str> {
        None
    }

    fn supplied_values(&self) -> Vec<&'static str> {
        let props = &self.properties;
        present(&[
            (names::QUEUE, props.queue.is_some()),
            (
                names::CONNECTION_STRING,
                props
                    .secrets
                    .as_ref()
                    .is_some_and(|s| s.connection_string.is_some()),
            ),
        ])
    }
}

fn queue_values_strategy(
    queue: &RabbitMQQueue,
    _ctx: &StrategyContext<'_>,
) -> Result<Vec<OutputResource>> {
    validation::require_field(names::QUEUE, queue.properties.queue.as_deref())?;
    Ok(Vec::new())
}

/// Renderer for `Applications.Connector/rabbitMQMessageQueues`
#[derive(Debug)]
pub struct RabbitMQQueueRenderer {
    table: ModeDispatchTable<RabbitMQQueue>,
}

impl Default for RabbitMQQueueRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RabbitMQQueueRenderer {
    /// Create a renderer supporting values mode only
    pub fn new() -> Self {
        Self {
            table: ModeDispatchTable::new(ResourceKind::RabbitMQQueue)
                .with(ProvisioningMode::Values, queue_values_strategy),
        }
    }
}

impl Renderer for RabbitMQQueueRenderer {
    fn kind(&self) -> ResourceKind {
        ResourceKind::RabbitMQQueue
    }

    fn supported_modes(&self) -> Vec<ProvisioningMode> {
        self.table.supported_modes()
    }

    fn render_in_scope(
        &self,
        resource: &LogicalResource,
        scope: &RenderScope,
    ) -> Result<RendererOutput> {
        let LogicalResource::RabbitMQQueue(queue) = resource else {
            return Err(Error::model_conversion(self.kind(), resource.kind()));
        };

        let resources = dispatch(&self.table, queue, scope)?;

        let props = &queue.properties;
        Ok(RendererOutput {
            resources,
            computed_values: present_values([(names::QUEUE, literal(props.queue.as_ref()))]),
            secret_values: present_values([(
                names::CONNECTION_STRING,
                literal_secret(
                    props
                        .secrets
                        .as_ref()
                        .and_then(|s| s.connection_string.as_ref()),
                ),
            )]),
        })
    }
}
