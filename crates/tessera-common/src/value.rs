//! Value references
//!
//! Consumers connect to a logical resource through named values. A value is
//! either known at render time ([`ValueReference::Literal`]) or read later from
//! a deployed output resource ([`ValueReference::Deferred`]).

use serde::Serialize;

use crate::model::SecretValue;
use crate::output::{LocalId, ResourceType};

/// Well-known value names
pub mod names {
    /// Host name
    pub const HOST: &str = "host";
    /// Port
    pub const PORT: &str = "port";
    /// Database name
    pub const DATABASE: &str = "database";
    /// Server name
    pub const SERVER: &str = "server";
    /// Queue name
    pub const QUEUE: &str = "queue";
    /// Dapr component name
    pub const COMPONENT_NAME: &str = "componentName";
    /// User name
    pub const USERNAME: &str = "username";
    /// Password or access key
    pub const PASSWORD: &str = "password";
    /// Full connection string
    pub const CONNECTION_STRING: &str = "connectionString";
}

/// Well-known deferred actions and selectors
pub mod actions {
    /// Azure action returning access keys
    pub const LIST_KEYS: &str = "listKeys";
    /// Azure action returning connection strings
    pub const LIST_CONNECTION_STRINGS: &str = "listConnectionStrings";
    /// Selector for the primary key of a `listKeys` response
    pub const PRIMARY_KEY_SELECTOR: &str = "/primaryKey";
    /// Selector for the first connection string of a `listConnectionStrings` response
    pub const FIRST_CONNECTION_STRING_SELECTOR: &str = "/connectionStrings/0/connectionString";
}

/// A value resolved later from a deployed output resource
///
/// Always names the output it reads from and either a property of that
/// output or an action to invoke on it.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeferredReference {
    local_id: LocalId,
    #[serde(skip_serializing_if = "Option::is_none")]
    property_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transformer: Option<ResourceType>,
}

impl DeferredReference {
    /// Read a property of an output resource
    pub fn property(local_id: LocalId, property_reference: impl Into<String>) -> Self {
        Self {
            local_id,
            property_reference: Some(property_reference.into()),
            action: None,
            value_selector: None,
            transformer: None,
        }
    }

    /// Invoke an action on an output resource
    pub fn action(local_id: LocalId, action: impl Into<String>) -> Self {
        Self {
            local_id,
            property_reference: None,
            action: Some(action.into()),
            value_selector: None,
            transformer: None,
        }
    }

    /// Select a field of the property or action result (JSON pointer)
    pub fn selecting(mut self, value_selector: impl Into<String>) -> Self {
        self.value_selector = Some(value_selector.into());
        self
    }

    /// Post-process the resolved value with a provider-specific transformer
    pub fn with_transformer(mut self, transformer: ResourceType) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Output resource this reference reads from
    pub fn local_id(&self) -> &LocalId {
        &self.local_id
    }

    /// Property to read, if this is a property reference
    pub fn property_reference(&self) -> Option<&str> {
        self.property_reference.as_deref()
    }

    /// Action to invoke, if this is an action reference
    pub fn action_name(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Selector applied to the resolved value
    pub fn value_selector(&self) -> Option<&str> {
        self.value_selector.as_deref()
    }

    /// Transformer applied to the resolved value
    pub fn transformer(&self) -> Option<&ResourceType> {
        self.transformer.as_ref()
    }
}

/// A named value, either known now or resolved after deployment
#[derive(Clone, Debug, PartialEq)]
pub enum ValueReference<T> {
    /// Value known at render time
    Literal(T),
    /// Value read from a deployed output resource
    Deferred(DeferredReference),
}

impl<T> ValueReference<T> {
    /// The deferred reference, if any
    pub fn as_deferred(&self) -> Option<&DeferredReference> {
        match self {
            Self::Deferred(reference) => Some(reference),
            Self::Literal(_) => None,
        }
    }

    /// The literal value, if any
    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// Returns true if the value is resolved after deployment
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

/// Non-secret value reference
pub type ComputedValueReference = ValueReference<serde_json::Value>;

/// Secret value reference
pub type SecretValueReference = ValueReference<SecretValue>;

impl Serialize for ComputedValueReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Literal(value) => map.serialize_entry("value", value)?,
            Self::Deferred(reference) => map.serialize_entry("deferred", reference)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{kinds, local_ids};
    use serde_json::json;

    #[test]
    fn test_action_reference_with_refinements() {
        let reference = DeferredReference::action(local_ids::AZURE_REDIS, actions::LIST_KEYS)
            .selecting(actions::PRIMARY_KEY_SELECTOR)
            .with_transformer(ResourceType::azure(kinds::AZURE_REDIS));

        assert_eq!(reference.local_id(), &local_ids::AZURE_REDIS);
        assert_eq!(reference.action_name(), Some("listKeys"));
        assert_eq!(reference.property_reference(), None);
        assert_eq!(reference.value_selector(), Some("/primaryKey"));
        assert_eq!(
            reference.transformer(),
            Some(&ResourceType::azure(kinds::AZURE_REDIS))
        );
    }

    #[test]
    fn test_computed_value_serializes_by_variant() {
        let literal = ComputedValueReference::Literal(json!(6379));
        assert_eq!(serde_json::to_value(&literal).unwrap(), json!({"value": 6379}));

        let deferred = ComputedValueReference::Deferred(DeferredReference::property(
            local_ids::AZURE_REDIS,
            "redishost",
        ));
        assert_eq!(
            serde_json::to_value(&deferred).unwrap(),
            json!({"deferred": {"localId": "AzureRedis", "propertyReference": "redishost"}})
        );
    }

    #[test]
    fn test_secret_literal_debug_is_redacted() {
        let secret = SecretValueReference::Literal(SecretValue::new("hunter2"));
        assert!(!format!("{secret:?}").contains("hunter2"));
        assert!(secret.as_literal().is_some());
        assert!(!secret.is_deferred());
    }
}
