//! Error types and result aliases for archapi operations.
//!
//! Every client operation fails with an [`ArchApiError`]. The variant tells the
//! caller *where* the failure happened (before the request, in transport, in
//! decoding, or on the remote side) and every variant records which
//! [`Operation`] was running.

use std::fmt;

use thiserror::Error;

/// Remote operation an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// AUR RPC `search` request
    Search,
    /// AUR RPC `info`/`multiinfo` request
    Info,
    /// Mirror status feed request
    ListMirrors,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Search => "search",
            Operation::Info => "info",
            Operation::ListMirrors => "mirror list",
        };
        f.write_str(name)
    }
}

/// Which part of a response failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    /// The outer RPC envelope (`version`, `type`, `results`, ...)
    Envelope,
    /// The `results` payload of a well-formed envelope
    Payload,
    /// The mirror status document
    MirrorList,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStage::Envelope => "envelope",
            DecodeStage::Payload => "payload",
            DecodeStage::MirrorList => "document",
        };
        f.write_str(name)
    }
}

/// Failure reported by a transport implementation.
///
/// `status` is set when the server answered but the answer could not be used.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Create a transport error with no underlying cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a transport error wrapping a lower-level error
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error for an unusable HTTP status
    pub fn status(status: u16) -> Self {
        Self {
            message: format!("server returned HTTP status {}", status),
            status: Some(status),
            source: None,
        }
    }

    /// Create a status error keeping the reason the body was unusable
    pub fn status_with_source<E>(status: u16, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..Self::status(status)
        }
    }

    /// HTTP status that caused this error, if any
    pub fn http_status(&self) -> Option<u16> {
        self.status
    }
}

/// Unified error type for all archapi operations
#[derive(Error, Debug)]
pub enum ArchApiError {
    /// A local precondition failed; no request was sent.
    #[error("archapi: invalid {operation} request: {reason}")]
    Validation { operation: Operation, reason: String },

    /// The transport could not deliver a usable response.
    #[error("archapi: {operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// The response body did not have the expected shape.
    #[error("archapi: failed to decode {operation} {stage}: {source}")]
    Decode {
        operation: Operation,
        stage: DecodeStage,
        #[source]
        source: serde_json::Error,
    },

    /// The remote service answered with an in-band error message.
    #[error("archapi: {operation} rejected by server: {message}")]
    Application { operation: Operation, message: String },
}

/// Result type alias for archapi operations
pub type ArchApiResult<T> = Result<T, ArchApiError>;

impl ArchApiError {
    pub fn validation(operation: Operation, reason: impl Into<String>) -> Self {
        Self::Validation {
            operation,
            reason: reason.into(),
        }
    }

    pub fn transport(operation: Operation, source: TransportError) -> Self {
        Self::Transport { operation, source }
    }

    pub fn decode(operation: Operation, stage: DecodeStage, source: serde_json::Error) -> Self {
        Self::Decode {
            operation,
            stage,
            source,
        }
    }

    pub fn application(operation: Operation, message: impl Into<String>) -> Self {
        Self::Application {
            operation,
            message: message.into(),
        }
    }

    /// Operation that produced this error
    pub fn operation(&self) -> Operation {
        match self {
            ArchApiError::Validation { operation, .. }
            | ArchApiError::Transport { operation, .. }
            | ArchApiError::Decode { operation, .. }
            | ArchApiError::Application { operation, .. } => *operation,
        }
    }

    /// Check if the remote service itself reported this error
    pub fn is_remote(&self) -> bool {
        matches!(self, ArchApiError::Application { .. })
    }

    /// Check if repeating the request might succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ArchApiError::Transport { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ArchApiError::Validation { .. } => Some("Pass at least one package name"),
            ArchApiError::Transport { .. } => {
                Some("Check your internet connection or the configured endpoint URL")
            }
            ArchApiError::Decode { .. } => {
                Some("The endpoint may not be an AUR RPC or mirror status URL")
            }
            ArchApiError::Application { operation: Operation::Search, .. } => {
                Some("Use a longer search term or a different --by field")
            }
            ArchApiError::Application { .. } => None,
        }
    }
}
