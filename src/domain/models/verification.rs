//! Verification Requests and Outcomes
//!
//! One verification job pairs a deployed contract address with the source
//! reference and constructor arguments needed to reproduce its bytecode.
//! Outcomes are explicit values: a submission either yields a receipt or a
//! failure carrying the original request data for diagnostics, so a batch
//! of independent jobs can complete even when some fail.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::shared::errors::{DomainError, TransportError};

#[allow(clippy::expect_used)]
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"));

/// Deployed contract address (0x-prefixed, 20 bytes hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractAddress(String);

impl ContractAddress {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ContractAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if ADDRESS_RE.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidAddress(value.to_string()))
        }
    }
}

impl TryFrom<String> for ContractAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Fully-qualified source reference in `path:ContractName` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRef {
    path: String,
    name: String,
}

impl ContractRef {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ContractRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.name)
    }
}

impl TryFrom<&str> for ContractRef {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.rsplit_once(':') {
            Some((path, name)) if !path.is_empty() && !name.is_empty() => Ok(Self {
                path: path.to_string(),
                name: name.to_string(),
            }),
            _ => Err(DomainError::InvalidContractRef(value.to_string())),
        }
    }
}

/// One verification job: address, source reference and constructor
/// arguments in constructor-declared order
///
/// Transient value created per verification attempt. Constructor arguments
/// are opaque ABI-encodable values; they are never reordered and their
/// types are never inferred here.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    id: Uuid,
    address: ContractAddress,
    contract: ContractRef,
    constructor_args: Vec<String>,
}

impl VerificationRequest {
    #[must_use]
    pub fn new(address: ContractAddress, contract: ContractRef, constructor_args: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            address,
            contract,
            constructor_args,
        }
    }

    /// Correlation id for structured logs
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn address(&self) -> &ContractAddress {
        &self.address
    }

    #[must_use]
    pub fn contract(&self) -> &ContractRef {
        &self.contract
    }

    #[must_use]
    pub fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }
}

/// One batch entry: which network to verify against, and what to verify
#[derive(Debug, Clone)]
pub struct VerificationJob {
    pub network: String,
    pub request: VerificationRequest,
}

/// Why a submission failed
#[derive(Debug, Clone, Error)]
pub enum FailureCause {
    #[error("network has no explorer configured; verification unsupported")]
    VerificationUnsupported,

    #[error("explorer call timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("explorer rejected the submission: {0}")]
    Rejected(String),
}

impl FailureCause {
    /// Whether a retry could plausibly succeed
    ///
    /// Everything except a missing explorer is transient: explorers reject
    /// submissions for freshly deployed contracts until bytecode is indexed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::VerificationUnsupported)
    }
}

impl From<TransportError> for FailureCause {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout(budget) => Self::Timeout(budget),
            TransportError::Connect(message) => Self::Transport(message),
            TransportError::Rejected { status, message } => {
                Self::Rejected(format!("status {status}: {message}"))
            }
        }
    }
}

/// Explorer accepted the submission
#[derive(Debug, Clone)]
pub struct VerificationReceipt {
    address: ContractAddress,
    tracking_id: Option<String>,
    browser_url: Url,
    submitted_at: DateTime<Utc>,
}

impl VerificationReceipt {
    #[must_use]
    pub fn new(address: ContractAddress, tracking_id: Option<String>, browser_url: Url) -> Self {
        Self {
            address,
            tracking_id,
            browser_url,
            submitted_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn address(&self) -> &ContractAddress {
        &self.address
    }

    /// Opaque identifier returned by the explorer, if any
    #[must_use]
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    #[must_use]
    pub fn browser_url(&self) -> &Url {
        &self.browser_url
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// Submission failed; carries the original request data so an operator can
/// retry out-of-band
#[derive(Debug, Clone)]
pub struct VerificationFailure {
    address: ContractAddress,
    constructor_args: Vec<String>,
    cause: FailureCause,
}

impl VerificationFailure {
    #[must_use]
    pub fn new(request: &VerificationRequest, cause: FailureCause) -> Self {
        Self {
            address: request.address().clone(),
            constructor_args: request.constructor_args().to_vec(),
            cause,
        }
    }

    #[must_use]
    pub fn address(&self) -> &ContractAddress {
        &self.address
    }

    #[must_use]
    pub fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    #[must_use]
    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }
}

/// Terminal outcome of one submission
#[derive(Debug, Clone)]
pub enum VerificationOutcome {
    Submitted(VerificationReceipt),
    Failed(VerificationFailure),
}

impl VerificationOutcome {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    #[must_use]
    pub fn failure(&self) -> Option<&VerificationFailure> {
        match self {
            Self::Submitted(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}
