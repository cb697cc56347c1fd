//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod explorer_transport;

pub use explorer_transport::{ExplorerCall, ExplorerResponse, ExplorerTransport, VerificationPayload};
