//! Explorer Transport Gateway
//!
//! Abstract trait for the outbound explorer call, plus the wire types it
//! carries. The submitter depends on this port only; the HTTP substrate
//! lives in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::models::network_profile::ApiKey;
use crate::shared::errors::TransportError;

/// One outbound verification call
#[derive(Debug, Clone)]
pub struct ExplorerCall {
    pub verify_url: Url,
    pub api_key: Option<ApiKey>,
    pub payload: VerificationPayload,
}

/// Submission body sent to the explorer's verify endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub contract_address: String,
    /// Fully-qualified `path:ContractName` reference
    pub contract_name: String,
    pub constructor_arguments: Vec<String>,
    pub compiler_version: String,
    /// Base-layer network identity, present only for rollup toolchains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_network: Option<String>,
    /// Opaque compiler settings passed through unmodified
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub compiler_settings: serde_json::Map<String, serde_json::Value>,
}

/// What the explorer answered
///
/// Accepts both body conventions seen in the wild: a JSON body with
/// `status: "ok"` and a `guid`, and the etherscan-style `status: "1"` with
/// the identifier in `result`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "result", alias = "id")]
    pub guid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExplorerResponse {
    /// Whether the explorer accepted the verification job
    ///
    /// A 2xx response without a status field counts as acceptance.
    #[must_use]
    pub fn accepted(&self) -> bool {
        match &self.status {
            None => true,
            Some(status) => status.eq_ignore_ascii_case("ok") || status == "1",
        }
    }

    /// Human-readable rejection reason, best effort
    #[must_use]
    pub fn rejection_reason(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.guid.clone())
            .unwrap_or_else(|| "explorer rejected the submission".to_string())
    }
}

/// Transport collaborator performing the actual network call
///
/// Implementations must bound the call with a timeout so one unresponsive
/// explorer cannot stall the caller indefinitely.
#[async_trait]
pub trait ExplorerTransport: Send + Sync {
    /// Issue exactly one verification call
    async fn submit(&self, call: &ExplorerCall) -> Result<ExplorerResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_status_is_accepted() {
        let response: ExplorerResponse = serde_json::from_str(r#"{"guid":"123"}"#).unwrap();
        assert!(response.accepted());
        assert_eq!(response.guid.as_deref(), Some("123"));
    }

    #[test]
    fn ok_and_etherscan_style_statuses_are_accepted() {
        let response: ExplorerResponse =
            serde_json::from_str(r#"{"status":"ok","guid":"123"}"#).unwrap();
        assert!(response.accepted());

        let response: ExplorerResponse =
            serde_json::from_str(r#"{"status":"1","result":"zyx-987"}"#).unwrap();
        assert!(response.accepted());
        assert_eq!(response.guid.as_deref(), Some("zyx-987"));
    }

    #[test]
    fn rejection_carries_a_reason() {
        let response: ExplorerResponse =
            serde_json::from_str(r#"{"status":"0","message":"bytecode not indexed"}"#).unwrap();
        assert!(!response.accepted());
        assert_eq!(response.rejection_reason(), "bytecode not indexed");
    }

    #[test]
    fn payload_serializes_camel_case_and_omits_empty_fields() {
        let payload = VerificationPayload {
            contract_address: "0xCC757016c0d0025831181c4C2Da05981bF917e4c".to_string(),
            contract_name: "contracts/ChestShop.sol:ChestShop".to_string(),
            constructor_arguments: vec!["500".to_string()],
            compiler_version: "0.8.33".to_string(),
            base_network: None,
            compiler_settings: serde_json::Map::new(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json["contractAddress"],
            "0xCC757016c0d0025831181c4C2Da05981bF917e4c"
        );
        assert!(json.get("baseNetwork").is_none());
        assert!(json.get("compilerSettings").is_none());
    }
}
