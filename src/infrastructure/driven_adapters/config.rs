//! Application Configuration
//!
//! Loads configuration from files and environment variables, validates the
//! raw input, and maps it into domain profiles. The network table is the
//! single source of truth for deployment targets: adding a chain means
//! extending the configuration, never the runtime state.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;
use validator::Validate;

use crate::domain::models::network_profile::{
    ApiKey, CompilerProfile, ExplorerProfile, NetworkProfile, RetryPolicy,
};
use crate::domain::models::verification::{
    ContractAddress, ContractRef, VerificationJob, VerificationRequest,
};
use crate::shared::errors::{validation_messages, ConfigurationError, DomainError};

/// Submitter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitterConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SubmitterConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Raw compiler toolchain kind as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
    Standard,
    Rollup,
}

/// Raw compiler section for one network
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompilerConfig {
    pub kind: CompilerKind,
    pub base_network: Option<String>,
    #[validate(length(min = 1, message = "compiler version must not be empty"))]
    pub version: String,
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

/// Raw retry section for one explorer
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

/// Raw explorer section for one network
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExplorerConfig {
    #[validate(url(message = "api_url must be a valid url"))]
    pub api_url: String,
    #[validate(url(message = "browser_url must be a valid url"))]
    pub browser_url: String,
    #[validate(url(message = "verify_url must be a valid url"))]
    pub verify_url: Option<String>,
    pub api_key: Option<String>,
    pub retry: Option<RetryConfig>,
}

/// Raw network section
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NetworkConfig {
    #[validate(url(message = "rpc_url must be a valid url"))]
    pub rpc_url: String,
    #[validate(range(min = 1, message = "chain_id must be positive"))]
    pub chain_id: u64,
    #[validate(nested)]
    pub compiler: CompilerConfig,
    #[validate(nested)]
    pub explorer: Option<ExplorerConfig>,
}

/// One configured verification job for the runner
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub network: String,
    pub address: String,
    pub contract: String,
    #[serde(default)]
    pub constructor_args: Vec<String>,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub submitter: SubmitterConfig,
    pub networks: HashMap<String, NetworkConfig>,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Load` when the configuration sources
    /// cannot be read or deserialized.
    pub fn load() -> Result<Self, ConfigurationError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        let config = Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__SUBMITTER__REQUEST_TIMEOUT_SECS)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate and map the raw network table into domain profiles
    ///
    /// Profiles are returned sorted by network id so registry construction
    /// errors are deterministic.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Validation` for shape violations and
    /// `ConfigurationError::Network` for domain invariant violations, both
    /// naming the offending network.
    pub fn network_profiles(&self) -> Result<Vec<NetworkProfile>, ConfigurationError> {
        let mut entries: Vec<(&String, &NetworkConfig)> = self.networks.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        entries
            .into_iter()
            .map(|(id, network)| build_profile(id, network))
            .collect()
    }

    /// Map the configured job list into verification jobs
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Job` when an address or contract
    /// reference is malformed.
    pub fn verification_jobs(&self) -> Result<Vec<VerificationJob>, ConfigurationError> {
        self.jobs
            .iter()
            .map(|job| {
                let address =
                    ContractAddress::try_from(job.address.as_str()).map_err(|source| {
                        ConfigurationError::Job {
                            network: job.network.clone(),
                            source,
                        }
                    })?;
                let contract =
                    ContractRef::try_from(job.contract.as_str()).map_err(|source| {
                        ConfigurationError::Job {
                            network: job.network.clone(),
                            source,
                        }
                    })?;
                Ok(VerificationJob {
                    network: job.network.clone(),
                    request: VerificationRequest::new(address, contract, job.constructor_args.clone()),
                })
            })
            .collect()
    }
}

fn build_profile(id: &str, network: &NetworkConfig) -> Result<NetworkProfile, ConfigurationError> {
    network
        .validate()
        .map_err(|errors| ConfigurationError::Validation {
            network: id.to_string(),
            messages: validation_messages(&errors),
        })?;

    let compiler = build_compiler(id, &network.compiler)?;
    let explorer = network
        .explorer
        .as_ref()
        .map(|explorer| build_explorer(id, explorer))
        .transpose()?;

    Ok(NetworkProfile::new(
        id,
        network.rpc_url.clone(),
        network.chain_id,
        compiler,
        explorer,
    ))
}

fn build_compiler(id: &str, compiler: &CompilerConfig) -> Result<CompilerProfile, ConfigurationError> {
    let misconfigured = |source: DomainError| ConfigurationError::Network {
        network: id.to_string(),
        source,
    };

    match compiler.kind {
        CompilerKind::Standard => {
            if compiler.base_network.is_some() {
                return Err(misconfigured(DomainError::UnexpectedBaseNetwork));
            }
            Ok(CompilerProfile::standard(
                compiler.version.clone(),
                compiler.settings.clone(),
            ))
        }
        CompilerKind::Rollup => {
            let base_network = compiler
                .base_network
                .clone()
                .ok_or_else(|| misconfigured(DomainError::EmptyBaseNetwork))?;
            CompilerProfile::rollup(base_network, compiler.version.clone(), compiler.settings.clone())
                .map_err(misconfigured)
        }
    }
}

fn build_explorer(id: &str, explorer: &ExplorerConfig) -> Result<ExplorerProfile, ConfigurationError> {
    let misconfigured = |source: DomainError| ConfigurationError::Network {
        network: id.to_string(),
        source,
    };
    let invalid_url = |field: &str, err: &url::ParseError| ConfigurationError::Validation {
        network: id.to_string(),
        messages: vec![format!("{field}: {err}")],
    };

    let verify_url = explorer
        .verify_url
        .as_deref()
        .ok_or_else(|| misconfigured(DomainError::MissingVerifyUrl))?;

    let api_url = Url::parse(&explorer.api_url).map_err(|e| invalid_url("api_url", &e))?;
    let browser_url = Url::parse(&explorer.browser_url).map_err(|e| invalid_url("browser_url", &e))?;
    let verify_url = Url::parse(verify_url).map_err(|e| invalid_url("verify_url", &e))?;

    let api_key = explorer.api_key.as_deref().and_then(ApiKey::from_raw);
    let retry = explorer.retry.as_ref().map_or_else(RetryPolicy::default, |retry| {
        RetryPolicy::new(retry.max_attempts, Duration::from_millis(retry.base_delay_ms))
    });

    Ok(ExplorerProfile::new(api_url, browser_url, verify_url, api_key, retry))
}
