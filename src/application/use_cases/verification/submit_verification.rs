//! Submit Verification Use Case
//!
//! Submits one verification request to the explorer identified by a
//! resolved network profile and shields the caller from transport and
//! explorer failures: every failure path resolves to a `Failed` outcome
//! carrying the original request data, never an error.

use std::sync::Arc;

use crate::domain::gateways::explorer_transport::{
    ExplorerCall, ExplorerTransport, VerificationPayload,
};
use crate::domain::models::network_profile::NetworkProfile;
use crate::domain::models::verification::{
    FailureCause, VerificationFailure, VerificationOutcome, VerificationReceipt,
    VerificationRequest,
};

/// Use case for submitting a single verification job
pub struct SubmitVerificationUseCase {
    transport: Arc<dyn ExplorerTransport>,
}

impl SubmitVerificationUseCase {
    #[must_use]
    pub fn new(transport: Arc<dyn ExplorerTransport>) -> Self {
        Self { transport }
    }

    /// Execute the use case: exactly one outbound call per invocation
    ///
    /// Networks without an explorer profile fail with
    /// `VerificationUnsupported` before any network call is attempted.
    pub async fn execute(
        &self,
        profile: &NetworkProfile,
        request: &VerificationRequest,
    ) -> VerificationOutcome {
        let Some(explorer) = profile.explorer() else {
            tracing::warn!(
                request_id = %request.id(),
                network = profile.id(),
                address = %request.address(),
                "network has no explorer configured, skipping verification"
            );
            return VerificationOutcome::Failed(VerificationFailure::new(
                request,
                FailureCause::VerificationUnsupported,
            ));
        };

        let call = ExplorerCall {
            verify_url: explorer.verify_url().clone(),
            api_key: explorer.api_key().cloned(),
            payload: build_payload(profile, request),
        };

        tracing::info!(
            request_id = %request.id(),
            network = profile.id(),
            chain_id = profile.chain_id(),
            address = %request.address(),
            contract = %request.contract(),
            verify_url = %call.verify_url,
            "submitting verification"
        );

        match self.transport.submit(&call).await {
            Ok(response) if response.accepted() => {
                let tracking_id = response.guid.clone();
                tracing::info!(
                    request_id = %request.id(),
                    address = %request.address(),
                    tracking_id = tracking_id.as_deref().unwrap_or("-"),
                    "explorer accepted verification job"
                );
                VerificationOutcome::Submitted(VerificationReceipt::new(
                    request.address().clone(),
                    tracking_id,
                    explorer.browser_url().clone(),
                ))
            }
            Ok(response) => {
                let reason = response.rejection_reason();
                tracing::warn!(
                    request_id = %request.id(),
                    address = %request.address(),
                    reason = %reason,
                    "explorer rejected verification job"
                );
                VerificationOutcome::Failed(VerificationFailure::new(
                    request,
                    FailureCause::Rejected(reason),
                ))
            }
            Err(err) => {
                tracing::warn!(
                    request_id = %request.id(),
                    address = %request.address(),
                    error = %err,
                    "verification call failed"
                );
                VerificationOutcome::Failed(VerificationFailure::new(request, err.into()))
            }
        }
    }
}

fn build_payload(profile: &NetworkProfile, request: &VerificationRequest) -> VerificationPayload {
    let compiler = profile.compiler();
    VerificationPayload {
        contract_address: request.address().to_string(),
        contract_name: request.contract().to_string(),
        constructor_arguments: request.constructor_args().to_vec(),
        compiler_version: compiler.version().to_string(),
        base_network: compiler.base_network().map(str::to_string),
        compiler_settings: compiler
            .settings()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}
