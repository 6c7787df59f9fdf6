//! Input validation shared by renderers
//!
//! Every failure here is a client error carrying the offending field name.

use std::collections::BTreeMap;

use tessera_common::{Error, ResourceId, Result, APPLICATION_LABEL_KEY, RESOURCE_LABEL_KEY};

use crate::renderer::EnvironmentContext;

/// Field holding the id of a backing resource
pub const RESOURCE_FIELD: &str = "resource";

/// Parse the backing resource id and check its type
///
/// `description` names the expected category in the error, e.g.
/// "an Azure Redis Cache".
pub fn parse_backing_resource(
    raw: &str,
    expected_type: &str,
    description: &str,
) -> Result<ResourceId> {
    let id = ResourceId::parse(raw).map_err(|_| {
        Error::invalid_field(
            RESOURCE_FIELD,
            "the 'resource' field must be a valid resource id",
        )
    })?;

    if !id.is_type(expected_type) {
        return Err(Error::invalid_field(
            RESOURCE_FIELD,
            format!("the 'resource' field must refer to {description}"),
        ));
    }

    Ok(id)
}

/// The backing resource id, which resource mode requires
pub fn require_resource(resource: Option<&str>) -> Result<&str> {
    resource.ok_or_else(|| {
        Error::invalid_field(
            RESOURCE_FIELD,
            "the 'resource' field must be specified when mode is 'resource'",
        )
    })
}

/// Values mode takes no backing resource
pub fn forbid_resource(resource: Option<&str>) -> Result<()> {
    match resource {
        Some(_) => Err(Error::invalid_field(
            RESOURCE_FIELD,
            "the 'resource' field cannot be specified when mode is 'values'",
        )),
        None => Ok(()),
    }
}

/// Reject a backing resource combined with directly supplied values
///
/// `supplied` lists the names of the direct values and secrets present.
pub fn reject_conflicts(resource: Option<&str>, supplied: &[&str]) -> Result<()> {
    if resource.is_none() || supplied.is_empty() {
        return Ok(());
    }
    Err(Error::invalid_field(
        RESOURCE_FIELD,
        format!(
            "the 'resource' field cannot be combined with directly supplied values: {}",
            supplied.join(", ")
        ),
    ))
}

/// A required string field
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::invalid_field(
            field,
            format!("the '{field}' field must be specified"),
        )),
    }
}

/// Kubernetes object name for a logical resource name
pub fn normalize_resource_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Labels for objects generated on behalf of a logical resource
///
/// Environment labels come first so the ownership labels always win.
pub fn generated_labels(
    application_name: &str,
    resource_name: &str,
    environment: Option<&EnvironmentContext>,
) -> BTreeMap<String, String> {
    let mut labels = environment
        .map(|env| env.labels.clone())
        .unwrap_or_default();
    labels.insert(
        APPLICATION_LABEL_KEY.to_string(),
        normalize_resource_name(application_name),
    );
    labels.insert(
        RESOURCE_LABEL_KEY.to_string(),
        normalize_resource_name(resource_name),
    );
    labels
}
