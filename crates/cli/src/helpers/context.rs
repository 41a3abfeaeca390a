// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, bail, Context, Result};
use cdon_config::AppConfig;
use cdon_evm_helpers::contracts::{DonationsContract, ReadOnly};
use cdon_relayer_client::{HttpRelayerClient, MockRelayerClient, RelayerClient};
use cdon_sdk::{ConfidentialDonationSdk, SdkConfig};
use cdon_utils::major_issue;
use cdon_wallet::{InjectedProvider, LocalWallet};
use std::sync::Arc;
use tracing::warn;
use zeroize::Zeroizing;

/// Everything a command may need, built lazily from the loaded config
pub struct CliContext {
    config: AppConfig,
    private_key: Option<Zeroizing<String>>,
}

impl CliContext {
    pub fn new(config: AppConfig, private_key: Option<Zeroizing<String>>) -> Self {
        Self {
            config,
            private_key,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn has_signer(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn relayer(&self) -> Result<Arc<dyn RelayerClient>> {
        if self.config.use_mock_relayer() {
            if !self.config.rpc()?.is_local() {
                warn!(
                    "Mock ciphertexts sent to {} will be rejected by the contract",
                    self.config.chain().name
                );
            }
            return Ok(Arc::new(MockRelayerClient::new()));
        }
        Ok(Arc::new(HttpRelayerClient::new(self.config.relayer_url()?)))
    }

    /// A wallet for the configured key, starting on the configured RPC
    pub async fn wallet(&self) -> Result<Arc<LocalWallet>> {
        let Some(private_key) = &self.private_key else {
            bail!("No signing key. Set CDON_PRIVATE_KEY or pass --private-key");
        };
        let wallet = LocalWallet::from_private_key(private_key.as_str(), &self.config.rpc()?)
            .await
            .context("Could not set up the wallet")?;
        Ok(Arc::new(wallet))
    }

    pub async fn sdk(&self) -> Result<ConfidentialDonationSdk> {
        let sdk_config = SdkConfig::try_from(&self.config)?;
        ConfidentialDonationSdk::initialize(sdk_config, self.relayer()?)
            .await
            .map_err(|e| {
                if e.is_fatal() {
                    anyhow!(major_issue("Could not initialize the SDK", &e))
                } else {
                    e.into()
                }
            })
    }

    /// An SDK with the wallet connected, ready to send transactions
    pub async fn connected_sdk(&self) -> Result<ConfidentialDonationSdk> {
        let mut sdk = self.sdk().await?;
        let wallet: Arc<dyn InjectedProvider> = self.wallet().await?;
        sdk.connect_wallet(Some(wallet)).await?;
        Ok(sdk)
    }

    /// Contract handle for reads that need no account
    pub async fn reader(&self) -> Result<DonationsContract<ReadOnly>> {
        let rpc = self.config.rpc()?;
        let contract =
            DonationsContract::connect(rpc.url().as_str(), self.config.contract_address()?)
                .await?;
        Ok(contract)
    }
}
