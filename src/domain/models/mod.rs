//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod network_profile;
pub mod verification;

pub use network_profile::{ApiKey, CompilerProfile, ExplorerProfile, NetworkProfile, RetryPolicy, Toolchain};
pub use verification::{
    ContractAddress, ContractRef, FailureCause, VerificationFailure, VerificationJob,
    VerificationOutcome, VerificationReceipt, VerificationRequest,
};
