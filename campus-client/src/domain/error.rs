//! Client-facing error taxonomy.
//!
//! Failures bubble to the immediate caller unmodified: there is no retry,
//! backoff, or centralised recovery in this layer. Presenting an error to
//! the user is the presentation layer's concern.

use serde_json::Value;

/// Stable machine-readable code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The server rejected the payload (validation-class 4xx).
    InvalidRequest,
    /// The server reported a conflicting state (409).
    Conflict,
    /// The requested entity does not exist server-side (404).
    NotFound,
    /// The request never completed: connection, timeout, or 5xx failure.
    Transport,
    /// The response body did not match the expected wire shape.
    Decode,
    /// An unexpected failure inside this layer.
    Internal,
}

impl ErrorCode {
    /// Snake-case token for log lines and assertions.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::Internal => "internal",
        }
    }
}

/// Error surfaced by every operation in this crate.
///
/// Carries a stable [`ErrorCode`], a human-readable message, and optionally
/// the structured problem payload the server returned alongside a non-2xx
/// status.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Error {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Structured problem payload returned by the server, if any.
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach the server's structured problem payload.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Transport, message)
    }

    /// Convenience constructor for [`ErrorCode::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Decode, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Convenient result alias for operations in this crate.
pub type ClientResult<T> = Result<T, Error>;
