// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::TxHash,
    rpc::types::{Log, TransactionReceipt},
};
use cdon_utils::{DonationError, GENERIC_REVERT_REASON};
use tracing::warn;

/// A mined transaction as seen by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedTx {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}

impl SubmittedTx {
    /// Fails with `TransactionReverted` when the receipt reports a failed execution.
    pub fn from_receipt(receipt: &TransactionReceipt) -> Result<Self, DonationError> {
        if !receipt.status() {
            warn!(tx_hash = %receipt.transaction_hash, "Transaction was mined but reverted");
            return Err(DonationError::TransactionReverted(
                GENERIC_REVERT_REASON.to_string(),
            ));
        }

        Ok(Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            logs: receipt.inner.logs().to_vec(),
        })
    }
}
