//! Common types for Tessera: errors, identifiers, and the resource models

#![deny(missing_docs)]

pub mod error;
pub mod model;
pub mod output;
pub mod resource_id;
pub mod telemetry;
pub mod value;

pub use error::{Error, ErrorCode};
pub use resource_id::{ResourceId, ResourceIdError};

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Namespace used for Kubernetes outputs when the caller supplies none
pub const DEFAULT_NAMESPACE: &str = "default";

/// Label key carrying the owning application name on generated objects
pub const APPLICATION_LABEL_KEY: &str = "app.tessera.dev/application";

/// Label key carrying the logical resource name on generated objects
pub const RESOURCE_LABEL_KEY: &str = "app.tessera.dev/resource";

/// Dapr API version for generated components
pub const DAPR_API_VERSION: &str = "dapr.io/v1alpha1";
