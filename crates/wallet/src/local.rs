// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    AddChainParams, InjectedProvider, ProviderRpcError, INVALID_PARAMS, UNAUTHORIZED,
};
use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use cdon_config::RPC;
use cdon_utils::DonationError;
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};
use tracing::info;
use url::Url;

/// A wallet backed by a local private key and a set of known networks.
///
/// Behaves like an injected browser wallet: chains must be registered with
/// `add_chain` before they can be switched to, and switches are broadcast.
pub struct LocalWallet {
    signer: PrivateKeySigner,
    networks: RwLock<HashMap<u64, Url>>,
    active: RwLock<u64>,
    chain_changed: broadcast::Sender<u64>,
}

impl LocalWallet {
    /// Create a wallet whose initial network is whatever `rpc` serves
    pub async fn connect(signer: PrivateKeySigner, rpc: &RPC) -> Result<Self, DonationError> {
        let url = rpc.url().clone();
        let chain_id = read_chain_id(&url).await?;
        info!(address = %signer.address(), chain_id, "Local wallet ready");

        let (chain_changed, _) = broadcast::channel(16);
        Ok(Self {
            signer,
            networks: RwLock::new(HashMap::from([(chain_id, url)])),
            active: RwLock::new(chain_id),
            chain_changed,
        })
    }

    pub async fn from_private_key(private_key: &str, rpc: &RPC) -> Result<Self, DonationError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|_| DonationError::Config("Invalid private key".to_string()))?;
        Self::connect(signer, rpc).await
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    async fn active_url(&self) -> Result<Url, ProviderRpcError> {
        let active = *self.active.read().await;
        self.networks
            .read()
            .await
            .get(&active)
            .cloned()
            .ok_or_else(|| ProviderRpcError::unrecognized_chain(active))
    }
}

async fn read_chain_id(url: &Url) -> Result<u64, ProviderRpcError> {
    let provider = ProviderBuilder::new()
        .connect(url.as_str())
        .await
        .map_err(|e| ProviderRpcError::internal(format!("Could not reach {url}: {e}")))?;
    provider
        .get_chain_id()
        .await
        .map_err(|e| ProviderRpcError::internal(e.to_string()))
}

#[async_trait]
impl InjectedProvider for LocalWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderRpcError> {
        Ok(vec![self.signer.address()])
    }

    async fn chain_id(&self) -> Result<u64, ProviderRpcError> {
        Ok(*self.active.read().await)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderRpcError> {
        if !self.networks.read().await.contains_key(&chain_id) {
            return Err(ProviderRpcError::unrecognized_chain(chain_id));
        }

        let mut active = self.active.write().await;
        if *active != chain_id {
            *active = chain_id;
            // no subscribers is fine
            let _ = self.chain_changed.send(chain_id);
            info!(chain_id, "Local wallet switched network");
        }
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderRpcError> {
        let chain_id = params.numeric_chain_id()?;
        let Some(rpc_url) = params.rpc_urls.first() else {
            return Err(ProviderRpcError::new(INVALID_PARAMS, "rpcUrls is empty"));
        };
        let url = Url::parse(rpc_url).map_err(|e| {
            ProviderRpcError::new(INVALID_PARAMS, format!("Invalid rpc url '{rpc_url}': {e}"))
        })?;

        let served = read_chain_id(&url).await?;
        if served != chain_id {
            return Err(ProviderRpcError::new(
                INVALID_PARAMS,
                format!("{rpc_url} serves chain {served}, not {chain_id}"),
            ));
        }

        info!(chain_id, "Registered {}", params.chain_name);
        self.networks.write().await.insert(chain_id, url);
        Ok(())
    }

    fn subscribe_chain_changed(&self) -> broadcast::Receiver<u64> {
        self.chain_changed.subscribe()
    }

    async fn signer(&self, account: Address) -> Result<DynProvider, ProviderRpcError> {
        if account != self.signer.address() {
            return Err(ProviderRpcError::new(
                UNAUTHORIZED,
                format!("{account} is not managed by this wallet"),
            ));
        }

        let url = self.active_url().await?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(self.signer.clone()))
            .connect(url.as_str())
            .await
            .map_err(|e| ProviderRpcError::internal(format!("Could not reach {url}: {e}")))?;
        Ok(provider.erased())
    }
}
