// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the RushDB SDK

use serde_json::Value;
use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for RushDB SDK operations
#[derive(Error, Debug)]
pub enum Error {
    /// Nested payload could not be flattened into a creation plan.
    /// Raised locally, before any request is sent.
    #[error("Validation error in '{label}' at '{key_path}': {message}")]
    Validation {
        /// Label of the root object being normalized
        label: String,
        /// Dotted path of the offending key, relative to the root
        key_path: String,
        /// What is wrong with the value
        message: String,
    },

    /// Positional access past the end of a result page
    #[error("Index {index} out of range for result page of {len} items")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of items on the page
        len: usize,
    },

    /// The server answered with an error payload
    #[error("Remote error: {message}")]
    Remote {
        /// HTTP status, when the transport knows it
        status: Option<u16>,
        /// Server-provided message
        message: String,
        /// Full decoded error body
        details: Value,
    },

    /// Transaction lifecycle errors
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// A record is missing one of its internal fields
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Invalid operation errors
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection errors reported by a transport
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base URL or request path could not be turned into a URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn validation(
        label: impl Into<String>,
        key_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation {
            label: label.into(),
            key_path: key_path.into(),
            message: message.into(),
        }
    }

    /// Build a [`Error::Remote`] from a decoded error response body.
    ///
    /// Transports call this for non-success responses. The body's `message`
    /// field is used when present, otherwise a generic status message.
    pub fn from_remote_body(status: Option<u16>, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| match status {
                Some(code) => format!("Request failed with status {}", code),
                None => "Request failed".to_string(),
            });

        Error::Remote {
            status,
            message,
            details: body,
        }
    }

    /// Whether this error came from the server rather than from local checks
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. } | Error::Connection(_))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::InvalidOperation(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::InvalidOperation(s.to_string())
    }
}
