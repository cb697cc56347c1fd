//! Error Types
//!
//! Layered error enums: domain invariant violations, registry integrity
//! errors, configuration errors, and transport errors. Submission-time
//! transport errors never cross the submitter boundary as errors; they are
//! folded into failure outcomes (see `domain::models::verification`).

use std::time::Duration;

use thiserror::Error;

/// Domain-level errors representing profile and request invariant violations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("rollup toolchain requires a non-empty base-layer network")]
    EmptyBaseNetwork,

    #[error("standard toolchain does not take a base-layer network")]
    UnexpectedBaseNetwork,

    #[error("explorer configuration is missing a verify endpoint")]
    MissingVerifyUrl,

    #[error("invalid contract address '{0}'")]
    InvalidAddress(String),

    #[error("invalid contract reference '{0}': expected 'path:ContractName'")]
    InvalidContractRef(String),
}

/// Registry integrity and resolution errors
///
/// These are structural: they indicate a misconfigured system rather than a
/// transient condition, and are raised to the caller.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("chain id {chain_id} is shared by networks '{first}' and '{second}'")]
    DuplicateChainId {
        chain_id: u64,
        first: String,
        second: String,
    },

    #[error("network '{0}' is registered more than once")]
    DuplicateNetworkId(String),
}

/// Configuration loading and mapping errors
///
/// Fatal at startup; the registry must not be built from invalid input.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("network '{network}' failed validation: {messages:?}")]
    Validation {
        network: String,
        messages: Vec<String>,
    },

    #[error("network '{network}' is misconfigured: {source}")]
    Network {
        network: String,
        source: DomainError,
    },

    #[error("job for network '{network}' is invalid: {source}")]
    Job {
        network: String,
        source: DomainError,
    },
}

/// Transport-level errors from the explorer call
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("explorer call timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Connect(String),

    #[error("explorer rejected the call with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Flatten validator errors into per-field messages
#[must_use]
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message.as_ref().map_or("invalid", |m| m.as_ref())
                )
            })
        })
        .collect()
}
