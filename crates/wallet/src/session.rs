// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{switch_or_register, InjectedProvider, INTERNAL_ERROR};
use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider},
};
use cdon_config::ChainConfig;
use cdon_utils::DonationError;
use std::sync::Arc;
use tracing::{info, warn};

/// The connected user. Lives in memory only, one per application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub wallet_address: Address,
    pub chain_id: u64,
    pub contract_address: Address,
}

/// A session together with the signing provider bound to its account
#[derive(Clone)]
pub struct ConnectedWallet {
    pub session: Session,
    pub signer: DynProvider,
}

pub struct WalletSession {
    provider: Arc<dyn InjectedProvider>,
    chain: ChainConfig,
}

impl WalletSession {
    /// Fails with `ProviderUnavailable` when the host has no wallet to offer.
    pub fn new(
        provider: Option<Arc<dyn InjectedProvider>>,
        chain: ChainConfig,
    ) -> Result<Self, DonationError> {
        let Some(provider) = provider else {
            return Err(DonationError::ProviderUnavailable);
        };
        Ok(Self { provider, chain })
    }

    pub fn provider(&self) -> Arc<dyn InjectedProvider> {
        self.provider.clone()
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    /// Authorize an account, move the wallet to the required chain and bind a signer.
    ///
    /// The chain is verified again through the signer because a wallet may
    /// accept a switch request and then stay where it was.
    pub async fn connect(
        &self,
        contract_address: Address,
    ) -> Result<ConnectedWallet, DonationError> {
        info!("Connecting wallet...");
        let accounts = self.provider.request_accounts().await?;
        let Some(account) = accounts.first().copied() else {
            return Err(DonationError::UserRejected(
                "no account was authorized".to_string(),
            ));
        };

        let required = self.chain.chain_id;
        let current = self.provider.chain_id().await?;
        if current != required {
            info!(current, required, "Wallet is on the wrong network");
            match switch_or_register(self.provider.as_ref(), &self.chain).await {
                Ok(()) => {}
                Err(e @ DonationError::UserRejected(_)) => return Err(e),
                Err(e) => warn!("Could not switch network: {e}"),
            }
        }

        let signer = self.provider.signer(account).await?;
        let actual = signer
            .get_chain_id()
            .await
            .map_err(|e| DonationError::Provider {
                code: INTERNAL_ERROR,
                message: e.to_string(),
            })?;

        if actual != required {
            return Err(DonationError::WrongNetwork {
                expected: required,
                actual,
            });
        }

        info!(account = %account, chain_id = actual, "Wallet connected");
        Ok(ConnectedWallet {
            session: Session {
                wallet_address: account,
                chain_id: actual,
                contract_address,
            },
            signer,
        })
    }
}
