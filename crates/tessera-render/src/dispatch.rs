//! Mode dispatch tables
//!
//! Each renderer owns one [`ModeDispatchTable`] mapping the provisioning
//! modes it supports to strategy functions. The table is built once and read
//! concurrently afterwards; a mode missing from it is the unsupported-mode
//! client error, never a fallback.

use std::collections::BTreeMap;
use std::fmt;

use tessera_common::model::{ProvisioningMode, ResourceKind};
use tessera_common::output::OutputResource;
use tessera_common::{Error, Result};

use crate::renderer::EnvironmentContext;

/// Inputs a strategy needs besides the resource itself
#[derive(Clone, Copy, Debug)]
pub struct StrategyContext<'a> {
    /// Name of the owning application
    pub application_name: &'a str,
    /// Target namespace for namespaced providers
    pub namespace: &'a str,
    /// Environment details from the caller
    pub environment: Option<&'a EnvironmentContext>,
}

/// A provisioning strategy: resource in, output resources out
pub type StrategyFn<R> = fn(&R, &StrategyContext<'_>) -> Result<Vec<OutputResource>>;

/// Immutable map from provisioning mode to strategy for one resource kind
pub struct ModeDispatchTable<R> {
    kind: ResourceKind,
    strategies: BTreeMap<ProvisioningMode, StrategyFn<R>>,
}

impl<R> ModeDispatchTable<R> {
    /// An empty table for `kind`
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            strategies: BTreeMap::new(),
        }
    }

    /// Add a strategy for `mode`, replacing any earlier entry
    pub fn with(mut self, mode: ProvisioningMode, strategy: StrategyFn<R>) -> Self {
        self.strategies.insert(mode, strategy);
        self
    }

    /// Kind this table dispatches for
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Supported modes, sorted by their wire name
    pub fn supported_modes(&self) -> Vec<ProvisioningMode> {
        let mut modes: Vec<_> = self.strategies.keys().copied().collect();
        modes.sort_by_key(|m| m.as_str());
        modes
    }

    /// Strategy for `mode`
    ///
    /// An absent mode and a mode without an entry are both `BadRequest`
    /// client errors listing the supported modes.
    pub fn strategy_for(&self, mode: Option<ProvisioningMode>) -> Result<StrategyFn<R>> {
        mode.and_then(|m| self.strategies.get(&m).copied())
            .ok_or_else(|| unsupported_mode(self.kind, mode, &self.supported_modes()))
    }

    /// Look up the strategy for `mode` and run it
    pub fn dispatch(
        &self,
        mode: Option<ProvisioningMode>,
        resource: &R,
        ctx: &StrategyContext<'_>,
    ) -> Result<Vec<OutputResource>> {
        let strategy = self.strategy_for(mode)?;
        strategy(resource, ctx)
    }
}

impl<R> fmt::Debug for ModeDispatchTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeDispatchTable")
            .field("kind", &self.kind)
            .field("modes", &self.supported_modes())
            .finish()
    }
}

/// Client error for a mode a kind cannot dispatch
///
/// `supported` is listed in the order given; callers pass it sorted.
pub fn unsupported_mode(
    kind: ResourceKind,
    mode: Option<ProvisioningMode>,
    supported: &[ProvisioningMode],
) -> Error {
    let listed = supported
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let message = match mode {
        Some(mode) => format!(
            "invalid mode '{mode}' for {kind}, supported mode values: [{listed}]"
        ),
        None => format!("mode must be specified for {kind}, supported mode values: [{listed}]"),
    };
    Error::bad_request(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::output::{kinds, ResourceType};
    use tessera_common::ErrorCode;

    struct Widget;

    fn no_outputs(_: &Widget, _: &StrategyContext<'_>) -> Result<Vec<OutputResource>> {
        Ok(Vec::new())
    }

    fn one_output(_: &Widget, _: &StrategyContext<'_>) -> Result<Vec<OutputResource>> {
        Ok(vec![OutputResource::well_known(ResourceType::azure(
            kinds::AZURE_REDIS,
        ))?])
    }

    fn table() -> ModeDispatchTable<Widget> {
        ModeDispatchTable::new(ResourceKind::RedisCache)
            .with(ProvisioningMode::Values, no_outputs)
            .with(ProvisioningMode::Resource, one_output)
    }

    fn ctx() -> StrategyContext<'static> {
        StrategyContext {
            application_name: "app",
            namespace: "default",
            environment: None,
        }
    }

    // =========================================================================
    // Story: Dispatch by mode
    // =========================================================================

    #[test]
    fn story_each_mode_runs_its_own_strategy() {
        let table = table();
        let values = table
            .dispatch(Some(ProvisioningMode::Values), &Widget, &ctx())
            .unwrap();
        let resource = table
            .dispatch(Some(ProvisioningMode::Resource), &Widget, &ctx())
            .unwrap();

        assert!(values.is_empty());
        assert_eq!(resource.len(), 1);
    }

    #[test]
    fn story_missing_mode_lists_sorted_modes() {
        let err = table()
            .dispatch(Some(ProvisioningMode::Recipe), &Widget, &ctx())
            .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::BadRequest));
        assert_eq!(
            err.to_string(),
            "invalid mode 'recipe' for Applications.Connector/redisCaches, supported mode values: [resource, values]"
        );
    }

    #[test]
    fn story_absent_mode_is_client_error() {
        let err = table().strategy_for(None).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::BadRequest));
        assert!(err.to_string().ends_with("supported mode values: [resource, values]"));
    }

    #[test]
    fn test_supported_modes_sorted_by_name() {
        let table = ModeDispatchTable::new(ResourceKind::RedisCache)
            .with(ProvisioningMode::Values, no_outputs)
            .with(ProvisioningMode::Recipe, no_outputs)
            .with(ProvisioningMode::Resource, one_output);
        assert_eq!(
            table.supported_modes(),
            vec![
                ProvisioningMode::Recipe,
                ProvisioningMode::Resource,
                ProvisioningMode::Values
            ]
        );
    }

    #[test]
    fn test_debug_lists_kind_and_modes() {
        let debug = format!("{:?}", table());
        assert!(debug.contains("RedisCache"));
        assert!(debug.contains("Resource"));
    }
}
