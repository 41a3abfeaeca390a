// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{primitives::Address, providers::DynProvider};
use async_trait::async_trait;
use cdon_config::{ChainConfig, NativeCurrency};
use cdon_utils::DonationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

/// EIP-1193: the user rejected the request
pub const USER_REJECTED: i64 = 4001;
/// EIP-1193: the requested account or method has not been authorized
pub const UNAUTHORIZED: i64 = 4100;
/// EIP-3326: the wallet does not know the requested chain
pub const UNRECOGNIZED_CHAIN: i64 = 4902;
/// JSON-RPC invalid params
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC internal error
pub const INTERNAL_ERROR: i64 = -32603;

/// An error as reported by a wallet provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRpcError {
    pub code: i64,
    pub message: String,
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn user_rejected(message: impl Into<String>) -> Self {
        Self::new(USER_REJECTED, message)
    }

    pub fn unrecognized_chain(chain_id: u64) -> Self {
        Self::new(
            UNRECOGNIZED_CHAIN,
            format!("Unrecognized chain ID {chain_id:#x}. Try adding the chain first."),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

impl fmt::Display for ProviderRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ProviderRpcError {}

impl From<ProviderRpcError> for DonationError {
    fn from(value: ProviderRpcError) -> Self {
        match value.code {
            USER_REJECTED => DonationError::UserRejected(value.message),
            code => DonationError::Provider {
                code,
                message: value.message,
            },
        }
    }
}

/// `wallet_switchEthereumChain` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParams {
    pub chain_id: String,
}

impl SwitchChainParams {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id: format!("{chain_id:#x}"),
        }
    }
}

/// `wallet_addEthereumChain` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_explorer_urls: Vec<String>,
}

impl AddChainParams {
    pub fn numeric_chain_id(&self) -> Result<u64, ProviderRpcError> {
        let digits = self
            .chain_id
            .strip_prefix("0x")
            .unwrap_or(self.chain_id.as_str());
        u64::from_str_radix(digits, 16).map_err(|_| {
            ProviderRpcError::new(
                INVALID_PARAMS,
                format!("Invalid chainId '{}'", self.chain_id),
            )
        })
    }
}

impl From<&ChainConfig> for AddChainParams {
    fn from(chain: &ChainConfig) -> Self {
        Self {
            chain_id: chain.chain_id_hex(),
            chain_name: chain.name.clone(),
            rpc_urls: vec![chain.rpc_url.clone()],
            native_currency: chain.native_currency.clone(),
            block_explorer_urls: chain.block_explorer_url.iter().cloned().collect(),
        }
    }
}

/// The wallet capability the application is handed by its host.
///
/// In a browser this is the injected EIP-1193 object; natively it is
/// [`crate::LocalWallet`]. Sessions never look the provider up themselves.
#[async_trait]
pub trait InjectedProvider: Send + Sync {
    /// `eth_requestAccounts`
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderRpcError>;

    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64, ProviderRpcError>;

    /// `wallet_switchEthereumChain`
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderRpcError>;

    /// `wallet_addEthereumChain`
    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderRpcError>;

    /// `chainChanged` notifications
    fn subscribe_chain_changed(&self) -> broadcast::Receiver<u64>;

    /// A provider that signs and sends transactions as `account` on the active chain
    async fn signer(&self, account: Address) -> Result<DynProvider, ProviderRpcError>;
}
