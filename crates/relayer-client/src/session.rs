// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{InputField, InputProofRequest, InputProofResponse, KeyInfo, RelayerClient};
use alloy::primitives::{Address, U64};
use cdon_utils::DonationError;
use std::sync::Arc;
use tracing::{debug, info};

/// An initialized connection to the relayer. Create one per application and share it.
pub struct EncryptionSession {
    client: Arc<dyn RelayerClient>,
    chain_id: u64,
    key_info: KeyInfo,
}

impl EncryptionSession {
    /// Perform the relayer handshake. Any failure here is fatal to the application.
    pub async fn initialize(
        client: Arc<dyn RelayerClient>,
        chain_id: u64,
    ) -> Result<Self, DonationError> {
        info!(chain_id, "Initializing encryption session...");
        let key_info = client
            .key_info()
            .await
            .map_err(|e| DonationError::InitializationFailed(e.to_string()))?;

        let Some(key) = key_info.public_key() else {
            return Err(DonationError::InitializationFailed(
                "relayer advertised no public key".to_string(),
            ));
        };
        info!(key_id = %key.data_id, "Encryption session ready");

        Ok(Self {
            client,
            chain_id,
            key_info,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn key_info(&self) -> &KeyInfo {
        &self.key_info
    }

    /// Start an input bound to one contract and one user
    pub fn create_encrypted_input(&self, contract: Address, user: Address) -> EncryptedInput<'_> {
        EncryptedInput {
            session: self,
            contract,
            user,
            values: vec![],
        }
    }
}

/// Collects plaintext fields and exchanges them for handles and a proof
pub struct EncryptedInput<'a> {
    session: &'a EncryptionSession,
    contract: Address,
    user: Address,
    values: Vec<InputField>,
}

impl EncryptedInput<'_> {
    pub fn add64(&mut self, value: u64) -> &mut Self {
        self.values.push(InputField::Euint64(U64::from(value)));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub async fn encrypt(self) -> Result<InputProofResponse, DonationError> {
        if self.values.is_empty() {
            return Err(DonationError::EncryptionFailed(
                "no values were added to the input".to_string(),
            ));
        }

        debug!(
            fields = self.values.len(),
            contract = %self.contract,
            user = %self.user,
            "Encrypting input"
        );
        let request = InputProofRequest {
            contract_chain_id: self.session.chain_id,
            contract_address: self.contract,
            user_address: self.user,
            values: self.values,
        };

        self.session
            .client
            .input_proof(request)
            .await
            .map_err(|e| DonationError::EncryptionFailed(e.to_string()))
    }
}
