//! Verify Contract Use Case
//!
//! Resolves a network identifier to its deployment target and drives the
//! submission with the explorer's bounded retry policy. Structural errors
//! (unknown network) are raised; submission failures stay contained in the
//! outcome value so one bad job never aborts a batch.

use std::sync::Arc;

use crate::application::use_cases::verification::SubmitVerificationUseCase;
use crate::domain::models::network_profile::RetryPolicy;
use crate::domain::models::verification::{
    VerificationJob, VerificationOutcome, VerificationRequest,
};
use crate::domain::registry::NetworkRegistry;
use crate::shared::errors::RegistryError;

/// Use case for verifying one or more contracts against named networks
pub struct VerifyContractUseCase {
    registry: Arc<NetworkRegistry>,
    submitter: Arc<SubmitVerificationUseCase>,
}

impl VerifyContractUseCase {
    #[must_use]
    pub fn new(registry: Arc<NetworkRegistry>, submitter: Arc<SubmitVerificationUseCase>) -> Self {
        Self { registry, submitter }
    }

    /// Execute the use case for a single contract
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownNetwork` if the network identifier is
    /// not registered. Submission failures are not errors; they are
    /// reported inside the returned outcome.
    pub async fn execute(
        &self,
        network_id: &str,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, RegistryError> {
        tracing::debug!(network = network_id, "resolving deployment target");

        let profile = self.registry.resolve(network_id).map_err(|err| {
            tracing::warn!(network = network_id, "network not registered");
            err
        })?;

        let policy = profile
            .explorer()
            .map_or_else(RetryPolicy::default, |explorer| explorer.retry().clone());

        let mut attempt = 1;
        loop {
            let outcome = self.submitter.execute(profile, request).await;

            let retryable = outcome
                .failure()
                .is_some_and(|failure| failure.cause().is_transient());
            if !retryable || attempt >= policy.max_attempts() {
                return Ok(outcome);
            }

            let delay = policy.delay_for(attempt);
            if let Some(failure) = outcome.failure() {
                tracing::warn!(
                    network = network_id,
                    address = %failure.address(),
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    cause = %failure.cause(),
                    "verification attempt failed, backing off before retry"
                );
            }
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Execute a batch of independent jobs concurrently
    ///
    /// Results are positionally aligned to the input jobs. Completion order
    /// between jobs is unspecified; one failure never blocks or aborts
    /// sibling submissions.
    pub async fn execute_batch(
        &self,
        jobs: &[VerificationJob],
    ) -> Vec<Result<VerificationOutcome, RegistryError>> {
        futures::future::join_all(
            jobs.iter()
                .map(|job| self.execute(&job.network, &job.request)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::explorer_transport::{
        ExplorerCall, ExplorerResponse, ExplorerTransport,
    };
    use crate::domain::models::network_profile::{
        ApiKey, CompilerProfile, ExplorerProfile, NetworkProfile,
    };
    use crate::domain::models::verification::{ContractAddress, ContractRef, FailureCause};
    use crate::shared::errors::TransportError;
    use async_trait::async_trait;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<ExplorerResponse, TransportError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<ExplorerResponse, TransportError>>) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExplorerTransport for ScriptedTransport {
        async fn submit(&self, _call: &ExplorerCall) -> Result<ExplorerResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TransportError::Connect("script exhausted".into())))
        }
    }

    fn accepted() -> Result<ExplorerResponse, TransportError> {
        Ok(serde_json::from_str(r#"{"status":"ok","guid":"123"}"#).unwrap())
    }

    fn refused() -> Result<ExplorerResponse, TransportError> {
        Err(TransportError::Connect("connection refused".into()))
    }

    fn registry(max_attempts: u32) -> Arc<NetworkRegistry> {
        let explorer = ExplorerProfile::new(
            "https://explorer.example/api".parse().unwrap(),
            "https://explorer.example".parse().unwrap(),
            "https://explorer.example/api".parse().unwrap(),
            Some(ApiKey::new("k-123")),
            RetryPolicy::new(max_attempts, Duration::from_millis(1)),
        );
        let verifiable = NetworkProfile::new(
            "testnet-a",
            "https://rpc.testnet-a.example",
            50_312,
            CompilerProfile::standard("0.8.33", BTreeMap::new()),
            Some(explorer),
        );
        let unverifiable = NetworkProfile::new(
            "rollup-devnet",
            "https://rpc.rollup-devnet.example",
            9_999,
            CompilerProfile::rollup("sepolia", "1.4.1", BTreeMap::new()).unwrap(),
            None,
        );
        Arc::new(NetworkRegistry::new(vec![verifiable, unverifiable]).unwrap())
    }

    fn request() -> VerificationRequest {
        VerificationRequest::new(
            ContractAddress::try_from("0xCC757016c0d0025831181c4C2Da05981bF917e4c").unwrap(),
            ContractRef::try_from("contracts/ChestShop.sol:ChestShop").unwrap(),
            vec!["500".to_string()],
        )
    }

    fn use_case(
        registry: Arc<NetworkRegistry>,
        transport: Arc<ScriptedTransport>,
    ) -> VerifyContractUseCase {
        VerifyContractUseCase::new(registry, Arc::new(SubmitVerificationUseCase::new(transport)))
    }

    #[tokio::test]
    async fn unknown_network_is_raised_not_contained() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let use_case = use_case(registry(1), transport.clone());

        let result = use_case.execute("base-mainnet", &request()).await;

        assert!(matches!(result, Err(RegistryError::UnknownNetwork(_))));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let transport = Arc::new(ScriptedTransport::new(vec![refused(), refused(), accepted()]));
        let use_case = use_case(registry(3), transport.clone());

        let outcome = use_case.execute("testnet-a", &request()).await.unwrap();

        assert!(outcome.is_submitted());
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn retries_stop_at_the_attempt_budget() {
        let transport = Arc::new(ScriptedTransport::new(vec![refused(), refused(), refused()]));
        let use_case = use_case(registry(2), transport.clone());

        let outcome = use_case.execute("testnet-a", &request()).await.unwrap();

        assert!(!outcome.is_submitted());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn unsupported_network_is_never_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let use_case = use_case(registry(3), transport.clone());

        let outcome = use_case.execute("rollup-devnet", &request()).await.unwrap();

        let failure = outcome.failure().expect("expected failure");
        assert!(matches!(failure.cause(), FailureCause::VerificationUnsupported));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn one_failing_job_does_not_block_siblings() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            accepted(),
            Err(TransportError::Rejected {
                status: 500,
                message: "internal error".into(),
            }),
            accepted(),
        ]));
        let use_case = use_case(registry(1), transport);

        let jobs: Vec<VerificationJob> = (0..3)
            .map(|_| VerificationJob {
                network: "testnet-a".to_string(),
                request: request(),
            })
            .collect();

        let results = use_case.execute_batch(&jobs).await;

        assert_eq!(results.len(), 3);
        let outcomes: Vec<bool> = results
            .into_iter()
            .map(|r| r.unwrap().is_submitted())
            .collect();
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 2);
        assert!(outcomes.iter().any(|ok| !ok));
    }
}
