// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{switch_or_register, InjectedProvider};
use cdon_config::ChainConfig;
use cdon_utils::DonationError;
use std::sync::Arc;
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStatus {
    pub chain_id: u64,
    pub compliant: bool,
}

/// Advisory check that the wallet sits on the required chain. It never blocks other calls.
#[derive(Clone)]
pub struct NetworkGuard {
    provider: Arc<dyn InjectedProvider>,
    chain: ChainConfig,
}

impl NetworkGuard {
    pub fn new(provider: Arc<dyn InjectedProvider>, chain: ChainConfig) -> Self {
        Self { provider, chain }
    }

    pub async fn current_chain(&self) -> Result<u64, DonationError> {
        Ok(self.provider.chain_id().await?)
    }

    pub fn is_compliant(&self, chain_id: u64) -> bool {
        self.chain.is_chain(chain_id)
    }

    pub async fn status(&self) -> Result<ChainStatus, DonationError> {
        let chain_id = self.current_chain().await?;
        Ok(self.status_for(chain_id))
    }

    /// Switch (or register and switch) to the required chain. A no-op when already there.
    pub async fn request_switch(&self) -> Result<(), DonationError> {
        if self.is_compliant(self.current_chain().await?) {
            debug!("Already on {}", self.chain.name);
            return Ok(());
        }
        switch_or_register(self.provider.as_ref(), &self.chain).await
    }

    /// Re-evaluate compliance every time the wallet reports a chain change
    pub async fn watch(&self) -> Result<ChainSubscription, DonationError> {
        let mut changes = self.provider.subscribe_chain_changed();
        let initial = self.status().await?;
        let (tx, rx) = watch::channel(initial);
        let guard = self.clone();

        let task = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(chain_id) => {
                        let status = guard.status_for(chain_id);
                        if !status.compliant {
                            warn!(chain_id, required = guard.chain.chain_id, "Wallet left the required network");
                        }
                        if tx.send(status).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Missed chain change notifications");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(ChainSubscription { status: rx, task })
    }

    fn status_for(&self, chain_id: u64) -> ChainStatus {
        ChainStatus {
            chain_id,
            compliant: self.is_compliant(chain_id),
        }
    }
}

/// Handle on a chain-change listener. Dropping it stops the listener.
pub struct ChainSubscription {
    status: watch::Receiver<ChainStatus>,
    task: JoinHandle<()>,
}

impl ChainSubscription {
    pub fn current(&self) -> ChainStatus {
        *self.status.borrow()
    }

    /// Wait for the next status. `None` once the wallet stops reporting.
    pub async fn changed(&mut self) -> Option<ChainStatus> {
        self.status.changed().await.ok()?;
        Some(*self.status.borrow_and_update())
    }

    pub fn unsubscribe(self) {
        drop(self)
    }
}

impl Drop for ChainSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
