// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

#![allow(dead_code)]

use alloy::{
    primitives::{Address, U64},
    providers::{mock::Asserter, DynProvider, Provider, ProviderBuilder},
};
use async_trait::async_trait;
use cdon_wallet::{AddChainParams, InjectedProvider, ProviderRpcError, SwitchChainParams};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq)]
pub enum WalletCall {
    RequestAccounts,
    ChainId,
    Switch(SwitchChainParams),
    Add(AddChainParams),
    Signer(Address),
}

/// Scripted stand-in for a browser wallet
pub struct MockWallet {
    pub accounts: Vec<Address>,
    pub chain: Mutex<u64>,
    pub known: Mutex<HashSet<u64>>,
    pub reject_accounts: bool,
    pub reject_switch: bool,
    /// Accept switch requests without changing network
    pub ignore_switch: bool,
    pub calls: Mutex<Vec<WalletCall>>,
    tx: broadcast::Sender<u64>,
}

impl MockWallet {
    pub fn new(account: Address, chain: u64) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            accounts: vec![account],
            chain: Mutex::new(chain),
            known: Mutex::new(HashSet::from([chain])),
            reject_accounts: false,
            reject_switch: false,
            ignore_switch: false,
            calls: Mutex::new(vec![]),
            tx,
        }
    }

    pub fn knows(self, chain: u64) -> Self {
        self.known.lock().unwrap().insert(chain);
        self
    }

    pub fn arc(self) -> Arc<dyn InjectedProvider> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<WalletCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Simulate the user changing network in the wallet UI
    pub fn user_switches_to(&self, chain: u64) {
        *self.chain.lock().unwrap() = chain;
        let _ = self.tx.send(chain);
    }

    fn record(&self, call: WalletCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// A provider whose `eth_chainId` answers `chain`
pub fn mocked_signer(chain: u64) -> DynProvider {
    let asserter = Asserter::new();
    asserter.push_success(&U64::from(chain));
    ProviderBuilder::new()
        .connect_mocked_client(asserter)
        .erased()
}

#[async_trait]
impl InjectedProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderRpcError> {
        self.record(WalletCall::RequestAccounts);
        if self.reject_accounts {
            return Err(ProviderRpcError::user_rejected("User rejected the request."));
        }
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ProviderRpcError> {
        self.record(WalletCall::ChainId);
        Ok(*self.chain.lock().unwrap())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderRpcError> {
        self.record(WalletCall::Switch(SwitchChainParams::new(chain_id)));
        if self.reject_switch {
            return Err(ProviderRpcError::user_rejected("User rejected the request."));
        }
        if !self.known.lock().unwrap().contains(&chain_id) {
            return Err(ProviderRpcError::unrecognized_chain(chain_id));
        }
        if !self.ignore_switch {
            self.user_switches_to(chain_id);
        }
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderRpcError> {
        self.record(WalletCall::Add(params.clone()));
        self.known
            .lock()
            .unwrap()
            .insert(params.numeric_chain_id()?);
        Ok(())
    }

    fn subscribe_chain_changed(&self) -> broadcast::Receiver<u64> {
        self.tx.subscribe()
    }

    async fn signer(&self, account: Address) -> Result<DynProvider, ProviderRpcError> {
        self.record(WalletCall::Signer(account));
        Ok(mocked_signer(*self.chain.lock().unwrap()))
    }
}
