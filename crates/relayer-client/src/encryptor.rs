// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::EncryptionSession;
use alloy::primitives::{Address, Bytes, B256};
use cdon_utils::{parse_u64_base_units, short_hex, DonationError, NATIVE_DECIMALS};
use std::sync::Arc;
use tracing::debug;

/// A ciphertext handle and the proof that it was produced for a given contract and user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedValue {
    pub handle: B256,
    pub proof: Bytes,
}

/// Turns decimal amounts into encrypted 64-bit inputs
#[derive(Clone)]
pub struct ValueEncryptor {
    session: Arc<EncryptionSession>,
}

impl ValueEncryptor {
    pub fn new(session: Arc<EncryptionSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<EncryptionSession> {
        &self.session
    }

    /// Encrypt a decimal amount of the native currency as wei.
    ///
    /// Amounts that are not strictly positive or that do not fit in 64 bits
    /// fail before the relayer is contacted. Every call yields a fresh
    /// ciphertext, even for the same amount.
    pub async fn encrypt(
        &self,
        amount: &str,
        contract: Address,
        user: Address,
    ) -> Result<EncryptedValue, DonationError> {
        let value = parse_u64_base_units(amount, NATIVE_DECIMALS)?;
        debug!(value, "Encrypting amount {}", amount.trim());

        let mut input = self.session.create_encrypted_input(contract, user);
        input.add64(value);
        let response = input.encrypt().await?;

        let Some(handle) = response.handles.first().copied() else {
            return Err(DonationError::EncryptionFailed(
                "relayer returned no ciphertext handles".to_string(),
            ));
        };
        if response.input_proof.is_empty() {
            return Err(DonationError::EncryptionFailed(
                "relayer returned an empty input proof".to_string(),
            ));
        }

        debug!(
            handle = %handle,
            proof = %short_hex(&response.input_proof),
            "Amount encrypted"
        );
        Ok(EncryptedValue {
            handle,
            proof: response.input_proof,
        })
    }
}
