//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Explorer transport (HTTP)
//! - Configuration

pub mod config;
pub mod explorer_transport;

pub use config::AppConfig;
pub use explorer_transport::HttpExplorerTransport;
