//! Outbound adapters implementing the domain ports.

pub mod http;

pub use http::HttpTransport;
