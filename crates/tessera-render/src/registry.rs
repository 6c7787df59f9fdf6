//! Renderer registry
//!
//! Maps each resource kind to its renderer and drives a render end to end:
//! lookup, scope resolution, mode check, rendering, and output validation.
//!
//! The registry is built once by its owner and shared by reference; it holds
//! no mutable state, so renders on different threads never contend.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use tessera_common::model::{LogicalResource, ResourceKind};
use tessera_common::{Error, Result};

use crate::renderer::{RenderOptions, Renderer, RendererOutput};
use crate::renderers::{
    DaprStateStoreRenderer, MongoDatabaseRenderer, RabbitMQQueueRenderer, RedisCacheRenderer,
    SqlDatabaseRenderer,
};

/// Built-in renderer for a kind
///
/// Exhaustive over [`ResourceKind`]: a new kind does not compile until it has
/// a renderer here.
fn builtin_renderer(kind: ResourceKind) -> Arc<dyn Renderer> {
    match kind {
        ResourceKind::RedisCache => Arc::new(RedisCacheRenderer::new()),
        ResourceKind::MongoDatabase => Arc::new(MongoDatabaseRenderer::new()),
        ResourceKind::SqlDatabase => Arc::new(SqlDatabaseRenderer::new()),
        ResourceKind::RabbitMQQueue => Arc::new(RabbitMQQueueRenderer::new()),
        ResourceKind::DaprStateStore => Arc::new(DaprStateStoreRenderer::new()),
    }
}

/// Registry of renderers, one per resource kind
pub struct RendererRegistry {
    renderers: BTreeMap<ResourceKind, Arc<dyn Renderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl RendererRegistry {
    /// Create a registry with the built-in renderer for every kind
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in ResourceKind::ALL {
            registry.register(builtin_renderer(*kind));
        }
        registry
    }

    /// Create a registry with no renderers
    pub fn empty() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Register a renderer, replacing any earlier one for the same kind
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) {
        self.renderers.insert(renderer.kind(), renderer);
    }

    /// Renderer for `kind`
    pub fn get(&self, kind: ResourceKind) -> Option<&Arc<dyn Renderer>> {
        self.renderers.get(&kind)
    }

    /// Registered kinds, in stable order
    pub fn kinds(&self) -> Vec<ResourceKind> {
        self.renderers.keys().copied().collect()
    }

    /// Render a logical resource
    ///
    /// A kind with no registered renderer is a model conversion error; the
    /// rest of the pipeline is [`Renderer::render`]. On any error no partial
    /// output is returned.
    #[instrument(
        skip_all,
        fields(
            kind = %resource.kind(),
            id = %resource.metadata().id,
            mode = tracing::field::Empty,
        )
    )]
    pub fn render(
        &self,
        resource: &LogicalResource,
        options: &RenderOptions,
    ) -> Result<RendererOutput> {
        let kind = resource.kind();
        let renderer = self.get(kind).ok_or_else(|| {
            let registered = self
                .kinds()
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Error::model_conversion(format!("one of [{registered}]"), kind)
        })?;

        if let Some(mode) = resource.mode() {
            tracing::Span::current().record("mode", mode.as_str());
        }

        let output = renderer.render(resource, options)?;

        debug!(
            outputs = output.resources.len(),
            computed = output.computed_values.len(),
            secrets = output.secret_values.len(),
            "rendered resource"
        );
        Ok(output)
    }
}
