// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Maps what the contract client reports onto [`DonationError`].

use alloy::{
    providers::{PendingTransactionError, WatchTxError},
    sol_types::{Revert, SolError},
    transports::TransportError,
};
use cdon_utils::{DonationError, GENERIC_REVERT_REASON};

const USER_REJECTED: i64 = 4001;
const EXECUTION_REVERTED: i64 = 3;
const INTERNAL_ERROR: i64 = -32603;
const REVERT_PREFIX: &str = "execution reverted: ";

/// The `Error(string)` reason carried in revert data, if any
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    Revert::abi_decode(data).ok().map(|revert| revert.reason)
}

/// Classify a JSON-RPC error returned while sending or simulating a transaction
pub fn classify_rpc_error(code: i64, message: &str, revert_data: Option<&[u8]>) -> DonationError {
    let lowered = message.to_lowercase();
    if code == USER_REJECTED || lowered.contains("user rejected") || lowered.contains("user denied")
    {
        return DonationError::TransactionRejected(message.to_string());
    }

    if let Some(reason) = revert_data.and_then(decode_revert_reason) {
        return DonationError::TransactionReverted(reason);
    }

    if let Some(start) = message.find(REVERT_PREFIX) {
        let reason = message[start + REVERT_PREFIX.len()..].trim();
        if !reason.is_empty() {
            return DonationError::TransactionReverted(reason.to_string());
        }
    }

    if code == EXECUTION_REVERTED || lowered.contains("revert") {
        return DonationError::TransactionReverted(GENERIC_REVERT_REASON.to_string());
    }

    DonationError::Provider {
        code,
        message: message.to_string(),
    }
}

pub fn from_transport_error(err: TransportError) -> DonationError {
    match err.as_error_resp() {
        Some(payload) => {
            let data = payload.as_revert_data();
            classify_rpc_error(payload.code, &payload.message, data.as_ref().map(|d| &d[..]))
        }
        None => DonationError::Provider {
            code: INTERNAL_ERROR,
            message: err.to_string(),
        },
    }
}

pub fn from_contract_error(err: alloy::contract::Error) -> DonationError {
    use alloy::contract::Error;
    match err {
        Error::TransportError(e) => from_transport_error(e),
        Error::PendingTransactionError(e) => from_pending_error(e),
        Error::AbiError(e) => DonationError::DecodeError(e.to_string()),
        Error::ZeroData(function, e) => {
            DonationError::DecodeError(format!("{function} returned no data: {e}"))
        }
        other => DonationError::DecodeError(other.to_string()),
    }
}

pub fn from_pending_error(err: PendingTransactionError) -> DonationError {
    match err {
        PendingTransactionError::TransportError(e) => from_transport_error(e),
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
            DonationError::Timeout("no receipt before the confirmation timeout".to_string())
        }
        other => DonationError::Provider {
            code: INTERNAL_ERROR,
            message: other.to_string(),
        },
    }
}
