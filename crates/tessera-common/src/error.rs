//! Error types for the Tessera rendering engine
//!
//! Errors are split by who has to act on them:
//! - `ModelConversion`: the caller handed a resource to the wrong renderer
//! - `Client`: the user's request is malformed or inconsistent, surfaced verbatim
//! - `Internal`: a renderer broke one of its own invariants
//!
//! Rendering is pure computation, so none of these are ever retried.

use std::fmt;

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Stable error codes reported to API clients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A field holds a malformed or inconsistent value
    Invalid,
    /// The request as a whole cannot be served (e.g. unsupported provisioning mode)
    BadRequest,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::BadRequest => "BadRequest",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for Tessera operations
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The logical resource does not match the renderer it was given to
    #[error("invalid model conversion: expected {expected}, got {actual}")]
    ModelConversion {
        /// Resource kind the renderer handles
        expected: String,
        /// Resource kind that was actually supplied
        actual: String,
    },

    /// Malformed or inconsistent user input
    #[error("{message}")]
    Client {
        /// Stable code for API responses
        code: ErrorCode,
        /// Human-readable message, surfaced verbatim to the user
        message: String,
        /// The offending property (e.g., "resource", "application")
        field: Option<String>,
    },

    /// Renderer invariant violation
    #[error("internal error [{context}]: {message}")]
    Internal {
        /// Description of what failed
        message: String,
        /// Where the violation was detected (e.g., "redis-renderer", "renderer-output")
        context: String,
    },

    /// Serialization of a generated manifest failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The manifest kind being serialized (if known)
        kind: Option<String>,
    },
}

impl Error {
    /// Create a model conversion error
    pub fn model_conversion(expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        Self::ModelConversion {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an `Invalid` client error not tied to a single field
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Client {
            code: ErrorCode::Invalid,
            message: msg.into(),
            field: None,
        }
    }

    /// Create an `Invalid` client error for a specific field
    pub fn invalid_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Client {
            code: ErrorCode::Invalid,
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a `BadRequest` client error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::Client {
            code: ErrorCode::BadRequest,
            message: msg.into(),
            field: None,
        }
    }

    /// Create an internal error with the given message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
            context: UNKNOWN_CONTEXT.to_string(),
        }
    }

    /// Create an internal error with context
    pub fn internal_with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
            context: context.into(),
        }
    }

    /// Create a serialization error with manifest kind context
    pub fn serialization_for_kind(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Returns true if the end user has to fix their request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    /// Client error code, if this is a client error
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Client { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The offending field, if the error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Client { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Get the context if this error has one
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Internal { context, .. } => Some(context),
            _ => None,
        }
    }
}
