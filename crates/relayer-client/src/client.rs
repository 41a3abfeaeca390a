// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::RelayerError;
use alloy::primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const KEY_URL_PATH: &str = "v1/keyurl";
const INPUT_PROOF_PATH: &str = "v1/input-proof";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where the relayer publishes a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRef {
    pub data_id: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FheKeyInfo {
    pub fhe_public_key: KeyRef,
}

/// The key material a relayer advertises during the initialization handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    #[serde(default)]
    pub fhe_key_info: Vec<FheKeyInfo>,
}

impl KeyInfo {
    pub fn public_key(&self) -> Option<&KeyRef> {
        self.fhe_key_info.first().map(|info| &info.fhe_public_key)
    }
}

/// A typed plaintext the relayer encrypts into a ciphertext handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum InputField {
    Euint64(U64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputProofRequest {
    pub contract_chain_id: u64,
    pub contract_address: Address,
    pub user_address: Address,
    pub values: Vec<InputField>,
}

/// One handle per input field plus a single proof covering all of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputProofResponse {
    pub handles: Vec<B256>,
    pub input_proof: Bytes,
}

/// Relayers wrap every payload in a `response` envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

/// The external encryption relayer
#[async_trait]
pub trait RelayerClient: Send + Sync {
    async fn key_info(&self) -> Result<KeyInfo, RelayerError>;
    async fn input_proof(
        &self,
        request: InputProofRequest,
    ) -> Result<InputProofResponse, RelayerError>;
}

/// Talks to a relayer over its JSON HTTP api
pub struct HttpRelayerClient {
    base: Url,
    client: reqwest::Client,
}

impl HttpRelayerClient {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RelayerError> {
        // without a trailing slash join would replace the last segment
        let mut base = self.base.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(base.join(path)?)
    }

    async fn read<T: DeserializeOwned>(
        &self,
        endpoint: &Url,
        response: reqwest::Response,
    ) -> Result<T, RelayerError> {
        let status = response.status();
        let body = response.text().await?;
        trace!("{} answered {}: {}", endpoint, status, body);

        if !status.is_success() {
            return Err(RelayerError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| RelayerError::Malformed(e.to_string()))?;
        Ok(envelope.response)
    }
}

#[async_trait]
impl RelayerClient for HttpRelayerClient {
    async fn key_info(&self) -> Result<KeyInfo, RelayerError> {
        let endpoint = self.endpoint(KEY_URL_PATH)?;
        debug!("Fetching relayer key info from {}", endpoint);
        let response = self
            .client
            .get(endpoint.clone())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        self.read(&endpoint, response).await
    }

    async fn input_proof(
        &self,
        request: InputProofRequest,
    ) -> Result<InputProofResponse, RelayerError> {
        let endpoint = self.endpoint(INPUT_PROOF_PATH)?;
        debug!(
            values = request.values.len(),
            "Requesting encrypted input for {}", request.contract_address
        );
        let response = self
            .client
            .post(endpoint.clone())
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        self.read(&endpoint, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn endpoint_keeps_base_path() {
        let client = HttpRelayerClient::new(Url::parse("https://relayer.example.org/api").unwrap());
        assert_eq!(
            client.endpoint(INPUT_PROOF_PATH).unwrap().as_str(),
            "https://relayer.example.org/api/v1/input-proof"
        );

        let client = HttpRelayerClient::new(Url::parse("https://relayer.example.org").unwrap());
        assert_eq!(
            client.endpoint(KEY_URL_PATH).unwrap().as_str(),
            "https://relayer.example.org/v1/keyurl"
        );
    }

    #[test]
    fn request_wire_format() {
        let request = InputProofRequest {
            contract_chain_id: 11155111,
            contract_address: address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"),
            user_address: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            values: vec![InputField::Euint64(U64::from(255))],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contractChainId"], 11155111);
        assert_eq!(
            json["contractAddress"].as_str().map(str::to_lowercase),
            Some("0x9fe46736679d2d9a65f0992f2272de9f3c7fa6e0".to_string())
        );
        assert_eq!(
            json["values"],
            serde_json::json!([{ "type": "euint64", "value": "0xff" }])
        );
    }

    #[test]
    fn response_wire_format() {
        let body = r#"{
            "response": {
                "handles": ["0x1111111111111111111111111111111111111111111111111111111111111111"],
                "inputProof": "0xdeadbeef"
            }
        }"#;
        let envelope: Envelope<InputProofResponse> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.response.handles, vec![B256::repeat_byte(0x11)]);
        assert_eq!(envelope.response.input_proof.as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
    }
}
