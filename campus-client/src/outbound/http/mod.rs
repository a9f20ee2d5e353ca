//! Reqwest-backed transport adapter.
//!
//! Owns transport details only: absolute URL construction from the api
//! root, request serialisation, the request timeout, and the mapping of
//! reqwest failures onto [`TransportError`]. Status interpretation stays
//! with the entity service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::ports::{Method, Transport, TransportError, WireRequest, WireResponse};

const DEFAULT_USER_AGENT: &str = "campus-client/0.1";

/// Transport adapter issuing HTTP requests against one api root.
pub struct HttpTransport {
    client: Client,
    api_root: Url,
}

impl HttpTransport {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(api_root: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(api_root, timeout, DEFAULT_USER_AGENT)
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_user_agent(
        api_root: Url,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_root: ensure_trailing_slash(api_root),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let url = join_path(&self.api_root, &request.path)?;
        let mut builder = self.client.request(reqwest_method(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(map_transport_error)?.to_vec();

        Ok(WireResponse {
            status,
            headers,
            body,
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

// Url::join drops the last path segment unless the base ends with a slash.
fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn join_path(api_root: &Url, path: &str) -> Result<Url, TransportError> {
    api_root
        .join(path)
        .map_err(|error| TransportError::request(format!("invalid request path `{path}`: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::connect(error.to_string())
    }
}
