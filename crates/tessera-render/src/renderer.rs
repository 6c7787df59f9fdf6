//! Renderer contract
//!
//! A [`Renderer`] turns one kind of [`LogicalResource`] into a
//! [`RendererOutput`]: the output resources to create plus the computed and
//! secret values consumers connect through. Rendering is pure; it never
//! touches a provisioning API.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use tessera_common::model::{LogicalResource, ProvisioningMode, ResourceKind};
use tessera_common::output::{LocalId, OutputResource};
use tessera_common::value::{ComputedValueReference, DeferredReference, SecretValueReference};
use tessera_common::{Error, ResourceId, ResourceIdError, Result, DEFAULT_NAMESPACE};

use crate::dispatch::unsupported_mode;

const OUTPUT_CONTEXT: &str = "renderer-output";

// =============================================================================
// Options
// =============================================================================

/// Environment details passed through to renderers unchanged
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentContext {
    /// Environment name
    pub name: String,
    /// Labels the environment asks generated objects to carry
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Caller-supplied options for one render
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Target namespace for namespaced providers
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Environment details, when the caller has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentContext>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            environment: None,
        }
    }
}

impl RenderOptions {
    /// Options targeting a namespace
    pub fn in_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            environment: None,
        }
    }
}

// =============================================================================
// Scope
// =============================================================================

/// Application and environment a resource renders into
#[derive(Clone, Debug, PartialEq)]
pub struct RenderScope {
    /// Parsed application id, absent when the resource names none
    pub application: Option<ResourceId>,
    /// Parsed environment id, absent when the resource names none
    pub environment: Option<ResourceId>,
    /// Target namespace
    pub namespace: String,
    /// Environment details from the caller
    pub environment_context: Option<EnvironmentContext>,
}

impl RenderScope {
    /// Resolve the scope of a resource
    ///
    /// The application is parsed before anything else so that a bad
    /// application id produces the same error whatever else is wrong.
    pub fn resolve(resource: &LogicalResource, options: &RenderOptions) -> Result<Self> {
        let basic = resource.basic();
        let application = parse_scope_property("application", &basic.application)?;
        let environment = parse_scope_property("environment", &basic.environment)?;

        Ok(Self {
            application,
            environment,
            namespace: options.namespace.clone(),
            environment_context: options.environment.clone(),
        })
    }

    /// Name of the owning application, empty when there is none
    pub fn application_name(&self) -> &str {
        self.application.as_ref().map_or("", |id| id.name())
    }
}

/// Parse an application or environment id
///
/// Empty means absent. Anything else must address a resource; a bare scope
/// such as a resource group is rejected.
fn parse_scope_property(field: &str, raw: &str) -> Result<Option<ResourceId>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let fail = |e: ResourceIdError| {
        Error::invalid_field(
            field,
            format!("failed to parse {field} from the property: {e}"),
        )
    };

    let id = ResourceId::parse(raw).map_err(fail)?;
    if !id.is_resource() {
        return Err(fail(ResourceIdError::Invalid(raw.to_string())));
    }
    Ok(Some(id))
}

// =============================================================================
// Output
// =============================================================================

/// Everything a render produces
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RendererOutput {
    /// Output resources in deployment order
    pub resources: Vec<OutputResource>,
    /// Non-secret values by name
    pub computed_values: BTreeMap<String, ComputedValueReference>,
    /// Secret values by name
    pub secret_values: BTreeMap<String, SecretValueReference>,
}

impl RendererOutput {
    /// Look up an output resource by local id
    pub fn resource(&self, local_id: &LocalId) -> Option<&OutputResource> {
        self.resources.iter().find(|r| &r.local_id == local_id)
    }

    /// Check the internal consistency of the output
    ///
    /// Local ids must be unique, dependencies must point inside this output,
    /// and every deferred value must point at one of its resources. Any
    /// violation is a renderer defect and reported as an internal error.
    pub fn validate(&self) -> Result<()> {
        let mut ids = BTreeSet::new();
        for resource in &self.resources {
            if !ids.insert(&resource.local_id) {
                return Err(Error::internal_with_context(
                    OUTPUT_CONTEXT,
                    format!("duplicate local id {}", resource.local_id),
                ));
            }
        }

        for resource in &self.resources {
            if let Some(missing) = resource.dependencies.iter().find(|d| !ids.contains(d)) {
                return Err(Error::internal_with_context(
                    OUTPUT_CONTEXT,
                    format!(
                        "output resource {} depends on unknown local id {missing}",
                        resource.local_id
                    ),
                ));
            }
        }

        let deferred = self
            .computed_values
            .iter()
            .filter_map(|(name, v)| v.as_deferred().map(|d| (name, d)))
            .chain(
                self.secret_values
                    .iter()
                    .filter_map(|(name, v)| v.as_deferred().map(|d| (name, d))),
            );
        for (name, reference) in deferred {
            check_deferred_target(name, reference, &ids)?;
        }

        Ok(())
    }
}

fn check_deferred_target(
    name: &str,
    reference: &DeferredReference,
    ids: &BTreeSet<&LocalId>,
) -> Result<()> {
    if ids.contains(reference.local_id()) {
        return Ok(());
    }
    Err(Error::internal_with_context(
        OUTPUT_CONTEXT,
        format!(
            "value '{name}' is deferred to local id {} which is not an output resource",
            reference.local_id()
        ),
    ))
}

// =============================================================================
// Renderer trait
// =============================================================================

/// Transformation from one kind of logical resource to a render result
///
/// Implementations are immutable once built and shared across threads.
pub trait Renderer: Send + Sync {
    /// The kind this renderer accepts
    fn kind(&self) -> ResourceKind;

    /// Modes this renderer can dispatch, sorted
    fn supported_modes(&self) -> Vec<ProvisioningMode>;

    /// Returns true if `mode` has a strategy
    fn supports(&self, mode: ProvisioningMode) -> bool {
        self.supported_modes().contains(&mode)
    }

    /// Render a resource whose scope is already resolved
    ///
    /// Callers guarantee `resource.kind() == self.kind()`; implementations
    /// still report a mismatch as a model conversion error.
    fn render_in_scope(
        &self,
        resource: &LogicalResource,
        scope: &RenderScope,
    ) -> Result<RendererOutput>;

    /// Render a resource
    ///
    /// Checks the kind, resolves the scope, checks the mode, renders, and
    /// validates the output before returning it.
    fn render(&self, resource: &LogicalResource, options: &RenderOptions) -> Result<RendererOutput> {
        if resource.kind() != self.kind() {
            return Err(Error::model_conversion(self.kind(), resource.kind()));
        }
        let scope = RenderScope::resolve(resource, options)?;

        let mode = resource.mode();
        if !mode.is_some_and(|m| self.supports(m)) {
            debug!(kind = %self.kind(), requested = ?mode, "mode not supported");
            return Err(unsupported_mode(self.kind(), mode, &self.supported_modes()));
        }

        let output = self.render_in_scope(resource, &scope)?;
        output.validate()?;
        Ok(output)
    }
}
