//! MedPortal Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer, plus configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;
pub mod telemetry;

pub use adapters::ReqwestTransport;
pub use crate::config::{ConfigError, PortalConfig};
pub use persistence::{FileKeyValueStorage, MemoryStorage, default_storage_path};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
