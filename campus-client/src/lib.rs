//! Client-side data access for the campus administration API.
//!
//! The crate maps each administrative entity (buildings, building data
//! definitions, notifications, informational records) onto its REST
//! collection, normalises payloads in both directions through one seam per
//! entity type, and keeps independently rendered views consistent after a
//! mutation through a change-notification bus instead of a shared store.
//!
//! Layout follows a ports-and-adapters split: `domain` holds the models, the
//! transport port, the generic entity service, the notification bus, and the
//! dialog/view coordination; `outbound` holds the reqwest transport adapter.

pub mod client;
pub mod domain;
pub mod outbound;

pub use client::{CampusClient, ClientConfig};
