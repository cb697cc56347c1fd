//! Common test utilities for e2e tests
//!
//! Provides test infrastructure for standing up a mock explorer server and
//! wiring the full verification pipeline against it.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use wiremock::MockServer;

use multichain_verify::application::use_cases::verification::{
    SubmitVerificationUseCase, VerifyContractUseCase,
};
use multichain_verify::domain::models::network_profile::{
    ApiKey, CompilerProfile, ExplorerProfile, NetworkProfile, RetryPolicy,
};
use multichain_verify::domain::models::verification::{
    ContractAddress, ContractRef, VerificationRequest,
};
use multichain_verify::domain::registry::NetworkRegistry;
use multichain_verify::infrastructure::driven_adapters::explorer_transport::HttpExplorerTransport;

/// Transport timeout used by every test harness
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Test application context: a mock explorer plus the fully wired pipeline
pub struct TestApp {
    pub server: MockServer,
    pub verify_contract: VerifyContractUseCase,
}

impl TestApp {
    /// Wire the pipeline against a fresh mock explorer
    ///
    /// Registers three networks:
    /// - `testnet-a` (chain 50312): keyless explorer on the mock server
    /// - `testnet-keyed` (chain 300): same explorer, requires api key `k-123`
    /// - `quiet-devnet` (chain 9999): rollup toolchain, no explorer at all
    pub async fn new() -> Self {
        let server = MockServer::start().await;

        let verify_url = format!("{}/api", server.uri());
        let browser_url = server.uri();

        let keyless_explorer = ExplorerProfile::new(
            verify_url.parse().expect("valid api url"),
            browser_url.parse().expect("valid browser url"),
            verify_url.parse().expect("valid verify url"),
            None,
            RetryPolicy::new(1, Duration::from_millis(10)),
        );
        let keyed_explorer = ExplorerProfile::new(
            verify_url.parse().expect("valid api url"),
            browser_url.parse().expect("valid browser url"),
            verify_url.parse().expect("valid verify url"),
            Some(ApiKey::new("k-123")),
            RetryPolicy::new(1, Duration::from_millis(10)),
        );

        let profiles = vec![
            NetworkProfile::new(
                "testnet-a",
                "https://rpc.testnet-a.example",
                50_312,
                CompilerProfile::standard("0.8.33", BTreeMap::new()),
                Some(keyless_explorer),
            ),
            NetworkProfile::new(
                "testnet-keyed",
                "https://rpc.testnet-keyed.example",
                300,
                CompilerProfile::rollup("sepolia", "1.4.1", BTreeMap::new())
                    .expect("valid rollup profile"),
                Some(keyed_explorer),
            ),
            NetworkProfile::new(
                "quiet-devnet",
                "https://rpc.quiet-devnet.example",
                9_999,
                CompilerProfile::rollup("sepolia", "1.4.1", BTreeMap::new())
                    .expect("valid rollup profile"),
                None,
            ),
        ];

        let registry = Arc::new(NetworkRegistry::new(profiles).expect("valid registry"));
        let transport =
            Arc::new(HttpExplorerTransport::new(REQUEST_TIMEOUT).expect("transport builds"));
        let submitter = Arc::new(SubmitVerificationUseCase::new(transport));
        let verify_contract = VerifyContractUseCase::new(registry, submitter);

        Self {
            server,
            verify_contract,
        }
    }
}

/// Build a request for the given address with a representative constructor
/// argument list
pub fn request_for(address: &str) -> VerificationRequest {
    VerificationRequest::new(
        ContractAddress::try_from(address).expect("valid address"),
        ContractRef::try_from("contracts/ChestShop.sol:ChestShop").expect("valid contract ref"),
        vec![
            "0xe95fD7f2Ee7262e2338f015D04dB352d9BcB0E6F".to_string(),
            "ChestShop".to_string(),
            "CHT".to_string(),
            "0xe95fD7f2Ee7262e2338f015D04dB352d9BcB0E6F".to_string(),
            "500".to_string(),
        ],
    )
}

pub const ADDRESS_A: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
pub const ADDRESS_B: &str = "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB";
pub const ADDRESS_C: &str = "0xCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC";
