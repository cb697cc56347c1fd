//! Multi-Chain Contract Verification Orchestrator - Main Entry Point

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use multichain_verify::application::use_cases::verification::{
    SubmitVerificationUseCase, VerifyContractUseCase,
};
use multichain_verify::domain::models::verification::VerificationOutcome;
use multichain_verify::domain::registry::NetworkRegistry;
use multichain_verify::infrastructure::driven_adapters::config::AppConfig;
use multichain_verify::infrastructure::driven_adapters::explorer_transport::HttpExplorerTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "multichain_verify=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Build the network registry from static configuration
    let profiles = config.network_profiles()?;
    let registry = Arc::new(NetworkRegistry::new(profiles)?);
    tracing::info!(networks = registry.len(), "Network registry built");

    // Wire the transport and use cases
    let transport = Arc::new(HttpExplorerTransport::new(config.submitter.request_timeout())?);
    let submitter = Arc::new(SubmitVerificationUseCase::new(transport));
    let verify_contract = VerifyContractUseCase::new(registry, submitter);

    // Run the configured verification jobs; a failed verification is
    // reported and never terminates the run
    let jobs = config.verification_jobs()?;
    if jobs.is_empty() {
        tracing::warn!("No verification jobs configured, nothing to do");
        return Ok(());
    }

    let results = verify_contract.execute_batch(&jobs).await;

    let mut failures = 0usize;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(VerificationOutcome::Submitted(receipt)) => {
                tracing::info!(
                    network = %job.network,
                    address = %receipt.address(),
                    tracking_id = receipt.tracking_id().unwrap_or("-"),
                    browse_url = %receipt.browser_url(),
                    "Verification submitted"
                );
            }
            Ok(VerificationOutcome::Failed(failure)) => {
                failures += 1;
                tracing::error!(
                    network = %job.network,
                    address = %failure.address(),
                    constructor_args = ?failure.constructor_args(),
                    cause = %failure.cause(),
                    "Verification failed"
                );
            }
            Err(err) => {
                failures += 1;
                tracing::error!(
                    network = %job.network,
                    address = %job.request.address(),
                    error = %err,
                    "Verification not attempted"
                );
            }
        }
    }

    tracing::info!(
        total = jobs.len(),
        failed = failures,
        "Verification run complete"
    );

    Ok(())
}
