// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    FheKeyInfo, InputProofRequest, InputProofResponse, KeyInfo, KeyRef, RelayerClient,
    RelayerError,
};
use alloy::primitives::{Bytes, B256};
use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

const HANDLE_LEN: usize = 32;
const PROOF_LEN: usize = 64;

/// Local stand-in for the relayer.
///
/// Returns random handles and a random proof. Nothing it produces will pass
/// on-chain verification, so it is only useful against a development contract.
#[derive(Debug, Default)]
pub struct MockRelayerClient {
    input_proof_calls: AtomicUsize,
}

impl MockRelayerClient {
    pub fn new() -> Self {
        warn!("Using the mock relayer. Ciphertexts will not verify on-chain.");
        Self::default()
    }

    /// Number of encryption requests served so far
    pub fn calls(&self) -> usize {
        self.input_proof_calls.load(Ordering::SeqCst)
    }
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill(&mut bytes[..]);
    bytes
}

#[async_trait]
impl RelayerClient for MockRelayerClient {
    async fn key_info(&self) -> Result<KeyInfo, RelayerError> {
        Ok(KeyInfo {
            fhe_key_info: vec![FheKeyInfo {
                fhe_public_key: KeyRef {
                    data_id: "mock".to_string(),
                    urls: vec![],
                },
            }],
        })
    }

    async fn input_proof(
        &self,
        request: InputProofRequest,
    ) -> Result<InputProofResponse, RelayerError> {
        self.input_proof_calls.fetch_add(1, Ordering::SeqCst);
        Ok(InputProofResponse {
            handles: request
                .values
                .iter()
                .map(|_| B256::from(random_bytes::<HANDLE_LEN>()))
                .collect(),
            input_proof: Bytes::from(random_bytes::<PROOF_LEN>().to_vec()),
        })
    }
}
