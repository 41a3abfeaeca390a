// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;
use tracing::error;

/// Message used when a transaction reverts without a decodable reason.
pub const GENERIC_REVERT_REASON: &str = "execution failed";

/// Every failure a confidential donation operation can end in.
///
/// All variants are terminal for the operation that raised them. Nothing in
/// this workspace retries automatically; a retry is always a new call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DonationError {
    #[error("No wallet provider available. Install or configure a wallet first.")]
    ProviderUnavailable,

    #[error("User rejected the request: {0}")]
    UserRejected(String),

    #[error("Wrong network: expected chain {expected}, connected to chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Not initialized: {0}")]
    NotInitialized(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount {0} does not fit in 64 bits of base units")]
    AmountOutOfRange(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Transaction rejected by signer: {0}")]
    TransactionRejected(String),

    #[error("Transaction reverted: {0}")]
    TransactionReverted(String),

    #[error("Timed out waiting for transaction inclusion: {0}")]
    Timeout(String),

    #[error("Could not decode response: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },
}

impl DonationError {
    /// True for failures that block the whole application rather than a single action.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DonationError::InitializationFailed(_) | DonationError::Config(_)
        )
    }

    /// The revert reason if this is a `TransactionReverted`
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            DonationError::TransactionReverted(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Formats fatal errors so they are seen in logs clearly
pub fn major_issue(msg: &str, e: &DonationError) -> String {
    error!("\n\n\nMAJOR ISSUE: {msg}.\n\nThe error supplied was: {e}\n\nNo confidential operation can proceed.\n\n\n");
    format!("{msg}: {e}")
}
