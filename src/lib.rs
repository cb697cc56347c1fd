//! Multi-Chain Contract Verification Orchestrator
//!
//! Resolves a network name to its deployment target profile (RPC endpoint,
//! chain id, compiler toolchain, explorer) and submits deployed contract
//! source + constructor arguments to the matching explorer for public
//! verification, following Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
