// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::rpc::RPC;
use anyhow::*;
use serde::{Deserialize, Serialize};

pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const SEPOLIA_CHAIN_NAME: &str = "Sepolia Testnet";
pub const SEPOLIA_RPC_URL: &str = "https://eth-sepolia.public.blastapi.io";
pub const SEPOLIA_EXPLORER_URL: &str = "https://sepolia.etherscan.io";

#[derive(Debug, Clone, PartialEq, Hash, Eq, Deserialize, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "ETH".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
        }
    }
}

/// The network the application requires the wallet to be on.
#[derive(Debug, Clone, PartialEq, Hash, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub block_explorer_url: Option<String>,
    pub native_currency: NativeCurrency,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::sepolia()
    }
}

impl ChainConfig {
    pub fn sepolia() -> Self {
        Self {
            chain_id: SEPOLIA_CHAIN_ID,
            name: SEPOLIA_CHAIN_NAME.to_string(),
            rpc_url: SEPOLIA_RPC_URL.to_string(),
            block_explorer_url: Some(SEPOLIA_EXPLORER_URL.to_string()),
            native_currency: NativeCurrency::default(),
        }
    }

    pub fn rpc_url(&self) -> Result<RPC> {
        if self.rpc_url.trim().is_empty() {
            bail!(
                "Network RPC URL is not configured for chain {}. Set `chain.rpc_url` or CDON_CHAIN__RPC_URL",
                self.name
            );
        }
        RPC::from_url(&self.rpc_url)
            .map_err(|e| anyhow!("Failed to parse RPC URL for chain {}: {}", self.name, e))
    }

    /// The chain id in the `0x`-prefixed hex form wallets expect
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    pub fn is_chain(&self, chain_id: u64) -> bool {
        self.chain_id == chain_id
    }
}
