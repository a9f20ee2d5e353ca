//! Port abstraction for the HTTP-style transport.
//!
//! The transport executes exactly one request per call and reports the
//! response verbatim: status interpretation belongs to the entity service,
//! so a 404 here is a successful `execute`, not an error. Timeouts are the
//! adapter's responsibility; this layer imposes none of its own.

use async_trait::async_trait;

use crate::domain::error::Error;

/// Request method issued against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch one entity or a collection.
    Get,
    /// Create an entity.
    Post,
    /// Update an entity.
    Put,
    /// Remove an entity.
    Delete,
}

impl Method {
    /// Wire token of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One request handed to the transport.
///
/// `path` is relative to the api root (e.g. `buildings/5`); the adapter owns
/// absolute URL construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    /// Method to issue.
    pub method: Method,
    /// Path relative to the api root.
    pub path: String,
    /// Query parameters in serialisation order.
    pub query: Vec<(String, String)>,
    /// JSON body, for `POST` and `PUT`.
    pub body: Option<serde_json::Value>,
}

impl WireRequest {
    /// Bodyless `GET` of the given path.
    #[must_use]
    pub const fn get(path: String) -> Self {
        Self {
            method: Method::Get,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// `POST` of a JSON payload.
    #[must_use]
    pub const fn post(path: String, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// `PUT` of a JSON payload.
    #[must_use]
    pub const fn put(path: String, body: serde_json::Value) -> Self {
        Self {
            method: Method::Put,
            path,
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Bodyless `DELETE` of the given path.
    #[must_use]
    pub const fn delete(path: String) -> Self {
        Self {
            method: Method::Delete,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach query parameters, preserving their order.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// One response reported by the transport, status judged by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in wire order.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

/// Failures raised before a response could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built or sent.
    #[error("transport request failed: {message}")]
    Request {
        /// Adapter-provided description.
        message: String,
    },
    /// No connection could be established or it broke mid-flight.
    #[error("transport connection failed: {message}")]
    Connect {
        /// Adapter-provided description.
        message: String,
    },
    /// The adapter's deadline elapsed before a response arrived.
    #[error("transport timed out: {message}")]
    Timeout {
        /// Adapter-provided description.
        message: String,
    },
}

impl TransportError {
    /// Constructor for [`TransportError::Request`].
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Constructor for [`TransportError::Connect`].
    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    /// Constructor for [`TransportError::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Self::transport(error.to_string())
    }
}

/// Port for issuing one HTTP-style request per operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and report the response verbatim.
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

/// Fixture transport for unit tests where the wire is not under test.
///
/// Answers every request with an empty JSON object and a 200 status, which
/// decodes into any entity model (all fields are optional).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTransport;

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, _request: WireRequest) -> Result<WireResponse, TransportError> {
        Ok(WireResponse {
            status: 200,
            headers: Vec::new(),
            body: b"{}".to_vec(),
        })
    }
}
