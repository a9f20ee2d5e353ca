//! Ports crossed by the domain layer.
//!
//! The only outbound dependency of this layer is the request/response
//! transport; adapters live under `outbound`.

mod transport;

#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{FixtureTransport, Method, Transport, TransportError, WireRequest, WireResponse};
