//! Deployment Target Profiles
//!
//! Value objects describing one blockchain deployment target: where to
//! reach it, which compiler toolchain builds for it, and which explorer
//! (if any) accepts source-verification submissions for it. All profiles
//! are constructed once from static configuration and are read-only for
//! the lifetime of the process.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::shared::errors::DomainError;

/// Compiler toolchain variant for a deployment target.
///
/// Rollup-style networks need a chain-specific compiler pipeline anchored
/// to a base-layer (settlement) network; everything else uses the standard
/// EVM compiler. Marked non-exhaustive so further toolchain variants can
/// carry their own coupling data.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    Standard,
    Rollup { base_network: String },
}

/// Compiler profile: toolchain variant plus opaque version/settings
/// passed through to the explorer unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerProfile {
    toolchain: Toolchain,
    version: String,
    settings: BTreeMap<String, serde_json::Value>,
}

impl CompilerProfile {
    /// Create a standard EVM compiler profile
    #[must_use]
    pub fn standard(version: impl Into<String>, settings: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            toolchain: Toolchain::Standard,
            version: version.into(),
            settings,
        }
    }

    /// Create a rollup compiler profile anchored to a base-layer network
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyBaseNetwork` if the base-layer network
    /// reference is empty.
    pub fn rollup(
        base_network: impl Into<String>,
        version: impl Into<String>,
        settings: BTreeMap<String, serde_json::Value>,
    ) -> Result<Self, DomainError> {
        let base_network = base_network.into();
        if base_network.trim().is_empty() {
            return Err(DomainError::EmptyBaseNetwork);
        }
        Ok(Self {
            toolchain: Toolchain::Rollup { base_network },
            version: version.into(),
            settings,
        })
    }

    #[must_use]
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn settings(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.settings
    }

    /// Base-layer network for rollup toolchains, `None` for standard
    #[must_use]
    pub fn base_network(&self) -> Option<&str> {
        match &self.toolchain {
            Toolchain::Standard => None,
            Toolchain::Rollup { base_network } => Some(base_network),
        }
    }
}

/// Explorer API credential, zeroed from memory on drop
///
/// Some explorers accept a placeholder instead of a real key; those are
/// represented as `None` at the profile level (see [`ApiKey::from_raw`]).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    /// Placeholder accepted by keyless explorers in configuration input
    const PLACEHOLDER: &'static str = "empty";

    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Interpret a raw configuration value, treating a blank value or the
    /// `"empty"` placeholder as "no key required"
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::PLACEHOLDER) {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Bounded retry policy for verification submissions
///
/// Explorers commonly need a short delay after deployment before bytecode
/// is indexed, so transient failures are retried with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff delay after the given attempt (1-based): doubles each attempt
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay * 2u32.saturating_pow(exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
        }
    }
}

/// Explorer profile: where and how to submit source verification
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerProfile {
    api_url: Url,
    browser_url: Url,
    verify_url: Url,
    api_key: Option<ApiKey>,
    retry: RetryPolicy,
}

impl ExplorerProfile {
    #[must_use]
    pub fn new(
        api_url: Url,
        browser_url: Url,
        verify_url: Url,
        api_key: Option<ApiKey>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            api_url,
            browser_url,
            verify_url,
            api_key,
            retry,
        }
    }

    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    #[must_use]
    pub fn browser_url(&self) -> &Url {
        &self.browser_url
    }

    #[must_use]
    pub fn verify_url(&self) -> &Url {
        &self.verify_url
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    #[must_use]
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

/// One deployment target: network identity, endpoint, compiler toolchain
/// and optional explorer
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkProfile {
    id: String,
    rpc_url: String,
    chain_id: u64,
    compiler: CompilerProfile,
    explorer: Option<ExplorerProfile>,
}

impl NetworkProfile {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        rpc_url: impl Into<String>,
        chain_id: u64,
        compiler: CompilerProfile,
        explorer: Option<ExplorerProfile>,
    ) -> Self {
        Self {
            id: id.into(),
            rpc_url: rpc_url.into(),
            chain_id,
            compiler,
            explorer,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// RPC endpoint, opaque to this crate; passed through to callers
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[must_use]
    pub fn compiler(&self) -> &CompilerProfile {
        &self.compiler
    }

    /// Explorer profile, absent for networks without source verification
    #[must_use]
    pub fn explorer(&self) -> Option<&ExplorerProfile> {
        self.explorer.as_ref()
    }

    #[must_use]
    pub fn supports_verification(&self) -> bool {
        self.explorer.is_some()
    }
}
