//! Core Kernel - Shared building blocks for the claims client
//!
//! This crate holds the ports-and-adapters plumbing used by the domain crate
//! and its infrastructure adapters:
//! - A unified `PortError` for transport failures
//! - Marker and health-check traits for adapters
//! - Per-operation metadata used for request correlation

pub mod ports;

pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    OperationMetadata,
};
