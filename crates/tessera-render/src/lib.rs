//! Rendering engine for Tessera logical resources
//!
//! Turns a [`LogicalResource`](tessera_common::model::LogicalResource) into the
//! output resources that must exist for it plus the computed and secret values
//! consumers connect through. Values that are only known once the outputs are
//! deployed are returned as deferred references; nothing here performs I/O.
//!
//! ```ignore
//! use tessera_render::{RenderOptions, RendererRegistry};
//!
//! let registry = RendererRegistry::new();
//! let output = registry.render(&resource, &RenderOptions::in_namespace("shop"))?;
//! ```

#![deny(missing_docs)]

mod dapr;
pub mod dispatch;
pub mod registry;
pub mod renderer;
pub mod renderers;
pub mod validation;

pub use dispatch::{ModeDispatchTable, StrategyContext, StrategyFn};
pub use registry::RendererRegistry;
pub use renderer::{EnvironmentContext, RenderOptions, RenderScope, Renderer, RendererOutput};
