//! Domain Layer
//!
//! Core business types: deployment target profiles, the network registry,
//! verification requests/outcomes, and the outbound gateway trait (port).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;
pub mod registry;

pub use gateways::explorer_transport::ExplorerTransport;
pub use models::network_profile::{
    ApiKey, CompilerProfile, ExplorerProfile, NetworkProfile, RetryPolicy, Toolchain,
};
pub use models::verification::{
    ContractAddress, ContractRef, FailureCause, VerificationFailure, VerificationJob,
    VerificationOutcome, VerificationReceipt, VerificationRequest,
};
pub use registry::NetworkRegistry;
