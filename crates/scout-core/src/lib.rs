//! scout-core: Shared types and state for beacon-scout.
//!
//! This crate provides the pieces every other beacon-scout crate agrees on:
//! - Beacon observations as reported by a scan source
//! - The derived `NetworkKey` and the `NetworkRecord` kept per network
//! - The `NetworkRegistry` shared between the scanner and the presenter
//! - The observation line format written to the journal

pub mod registry;
pub mod types;

pub use registry::NetworkRegistry;
pub use types::{Beacon, Channel, NetworkKey, NetworkRecord, Observation};
