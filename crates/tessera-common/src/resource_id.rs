//! Structured resource identifiers
//!
//! Parses ARM/UCP-style identifiers such as
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Cache/Redis/{name}`
//! or `/planes/tessera/local/resourceGroups/{rg}/providers/Applications.Core/applications/{name}`.
//!
//! Segments before the `providers` keyword are scope pairs; after it come the
//! provider namespace and one or more `{type}/{name}` pairs. Keyword and type
//! comparisons are ASCII case-insensitive, matching ARM semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const PROVIDERS_KEYWORD: &str = "providers";
const PLANES_KEYWORD: &str = "planes";

/// Error returned when a string is not a well-formed resource identifier
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResourceIdError {
    /// The input does not follow the identifier grammar
    #[error("'{0}' is not a valid resource id")]
    Invalid(String),
}

/// A scope segment (`subscriptions/{id}`, `resourceGroups/{name}`, `planes/{type}/{name}`)
///
/// For planes the name holds both the plane type and plane name (`tessera/local`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeSegment {
    /// Scope kind, e.g. `subscriptions`
    pub kind: String,
    /// Scope name
    pub name: String,
}

/// A resource type segment following the provider namespace
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeSegment {
    /// Resource type, e.g. `Redis` or `databaseAccounts`
    pub kind: String,
    /// Resource name
    pub name: String,
}

/// A parsed resource identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    id: String,
    scopes: Vec<ScopeSegment>,
    provider_namespace: Option<String>,
    types: Vec<TypeSegment>,
}

impl ResourceId {
    /// Parse a resource identifier
    pub fn parse(input: &str) -> Result<Self, ResourceIdError> {
        let invalid = || ResourceIdError::Invalid(input.to_string());

        let rest = input.strip_prefix('/').ok_or_else(invalid)?;
        if rest.is_empty() {
            return Err(invalid());
        }

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }

        let (scope_part, type_part) = match providers_position(&segments) {
            Some(i) => (&segments[..i], Some(&segments[i + 1..])),
            None => (&segments[..], None),
        };

        let scopes = parse_scopes(scope_part).ok_or_else(invalid)?;

        let (provider_namespace, types) = match type_part {
            Some(part) => {
                // namespace + at least one type/name pair
                if part.len() < 3 || (part.len() - 1) % 2 != 0 {
                    return Err(invalid());
                }
                let types = part[1..]
                    .chunks(2)
                    .map(|pair| TypeSegment {
                        kind: pair[0].to_string(),
                        name: pair[1].to_string(),
                    })
                    .collect();
                (Some(part[0].to_string()), types)
            }
            None => (None, Vec::new()),
        };

        if scopes.is_empty() && types.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            id: input.to_string(),
            scopes,
            provider_namespace,
            types,
        })
    }

    /// The identifier as originally supplied
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Name of the addressed resource (or of the innermost scope for scope ids)
    pub fn name(&self) -> &str {
        self.types
            .last()
            .map(|t| t.name.as_str())
            .or_else(|| self.scopes.last().map(|s| s.name.as_str()))
            .unwrap_or_default()
    }

    /// Fully qualified resource type, e.g. `Microsoft.Cache/Redis`
    ///
    /// Returns `None` for scope ids.
    pub fn resource_type(&self) -> Option<String> {
        let namespace = self.provider_namespace.as_deref()?;
        let mut out = namespace.to_string();
        for segment in &self.types {
            out.push('/');
            out.push_str(&segment.kind);
        }
        Some(out)
    }

    /// Returns true if the resource type equals `expected` (ASCII case-insensitive)
    pub fn is_type(&self, expected: &str) -> bool {
        self.resource_type()
            .is_some_and(|t| t.eq_ignore_ascii_case(expected))
    }

    /// Provider namespace, e.g. `Microsoft.Cache`
    pub fn provider_namespace(&self) -> Option<&str> {
        self.provider_namespace.as_deref()
    }

    /// Scope segments in order
    pub fn scope_segments(&self) -> &[ScopeSegment] {
        &self.scopes
    }

    /// Type segments in order
    pub fn type_segments(&self) -> &[TypeSegment] {
        &self.types
    }

    /// Find the name of a scope by kind (e.g. `resourceGroups`)
    pub fn find_scope(&self, kind: &str) -> Option<&str> {
        self.scopes
            .iter()
            .find(|s| s.kind.eq_ignore_ascii_case(kind))
            .map(|s| s.name.as_str())
    }

    /// Returns true if this id addresses a scope rather than a resource
    pub fn is_scope(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns true if this id addresses a resource
    pub fn is_resource(&self) -> bool {
        !self.types.is_empty()
    }

    /// The parent resource (drops the last type segment)
    ///
    /// `.../databaseAccounts/acct/mongodbDatabases/db` yields `.../databaseAccounts/acct`.
    /// Returns `None` for top-level resources and scopes.
    pub fn parent(&self) -> Option<ResourceId> {
        if self.types.len() < 2 {
            return None;
        }
        let types = self.types[..self.types.len() - 1].to_vec();
        let mut id = String::new();
        for scope in &self.scopes {
            id.push('/');
            id.push_str(&scope.kind);
            id.push('/');
            id.push_str(&scope.name);
        }
        id.push('/');
        id.push_str(PROVIDERS_KEYWORD);
        id.push('/');
        id.push_str(self.provider_namespace.as_deref().unwrap_or_default());
        for segment in &types {
            id.push('/');
            id.push_str(&segment.kind);
            id.push('/');
            id.push_str(&segment.name);
        }
        Some(Self {
            id,
            scopes: self.scopes.clone(),
            provider_namespace: self.provider_namespace.clone(),
            types,
        })
    }
}

/// Index of the `providers` keyword
///
/// Only scope-kind positions are considered, so a scope named `providers`
/// (e.g. `resourceGroups/providers`) is not mistaken for the keyword.
fn providers_position(segments: &[&str]) -> Option<usize> {
    let starts_with_plane = segments
        .first()
        .is_some_and(|s| s.eq_ignore_ascii_case(PLANES_KEYWORD));
    let first_kind = if starts_with_plane { 3 } else { 0 };

    (first_kind..segments.len())
        .step_by(2)
        .find(|&i| segments[i].eq_ignore_ascii_case(PROVIDERS_KEYWORD))
}

/// Parse scope pairs. A leading `planes/{type}/{name}` is a three-segment scope.
fn parse_scopes(segments: &[&str]) -> Option<Vec<ScopeSegment>> {
    let mut scopes = Vec::new();
    let mut rest = segments;

    if rest
        .first()
        .is_some_and(|s| s.eq_ignore_ascii_case(PLANES_KEYWORD))
    {
        if rest.len() < 3 {
            return None;
        }
        scopes.push(ScopeSegment {
            kind: rest[0].to_string(),
            name: format!("{}/{}", rest[1], rest[2]),
        });
        rest = &rest[3..];
    }

    if rest.len() % 2 != 0 {
        return None;
    }
    scopes.extend(rest.chunks(2).map(|pair| ScopeSegment {
        kind: pair[0].to_string(),
        name: pair[1].to_string(),
    }));
    Some(scopes)
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
