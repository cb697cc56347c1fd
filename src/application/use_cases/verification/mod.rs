//! Verification Use Cases
//!
//! Business logic for resolving deployment targets and submitting
//! source-verification jobs.

mod submit_verification;
mod verify_contract;

pub use submit_verification::SubmitVerificationUseCase;
pub use verify_contract::VerifyContractUseCase;
