// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

#![allow(dead_code)]

use alloy::{
    primitives::{address, Address, Bytes, TxHash, U256, U64},
    providers::{mock::Asserter, DynProvider, Provider, ProviderBuilder},
    rpc::{json_rpc::ErrorPayload, types::Log},
    sol_types::{Revert, SolError, SolEvent},
};
use cdon_evm_helpers::events::{CampaignCreated, DonationMade};

pub const CONTRACT: Address = address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
pub const USER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const OTHER: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

pub fn mocked_provider() -> (DynProvider, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new()
        .connect_mocked_client(asserter.clone())
        .erased();
    (provider, asserter)
}

/// A provider that sends requests exactly as built, with no nonce, gas or chain id filling
pub fn mocked_sender() -> (DynProvider, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter.clone())
        .erased();
    (provider, asserter)
}

pub fn push_return(asserter: &Asserter, data: Vec<u8>) {
    asserter.push_success(&Bytes::from(data));
}

pub fn push_nonce(asserter: &Asserter, nonce: u64) {
    asserter.push_success(&U64::from(nonce));
}

pub fn push_rpc_error(asserter: &Asserter, code: i64, message: &str) {
    asserter.push_failure(ErrorPayload {
        code,
        message: message.to_string().into(),
        data: None,
    });
}

/// A node refusing the transaction because the contract reverted with `reason`
pub fn push_revert(asserter: &Asserter, reason: &str) {
    let data = Bytes::from(
        Revert {
            reason: reason.to_string(),
        }
        .abi_encode(),
    );
    asserter.push_failure(ErrorPayload {
        code: 3,
        message: "execution reverted".into(),
        data: Some(serde_json::value::to_raw_value(&data).unwrap()),
    });
}

pub fn to_log<E: SolEvent>(emitter: Address, event: &E, tx_hash: TxHash) -> Log {
    Log {
        inner: alloy::primitives::Log {
            address: emitter,
            data: event.encode_log_data(),
        },
        transaction_hash: Some(tx_hash),
        ..Default::default()
    }
}

pub fn campaign_created(id: u64, name: &str) -> CampaignCreated {
    CampaignCreated {
        campaignId: U256::from(id),
        name: name.to_string(),
        beneficiary: USER,
        deadline: U256::from(1_700_000_000u64),
    }
}

pub fn donation_made(id: u64, anonymous: bool) -> DonationMade {
    DonationMade {
        campaignId: U256::from(id),
        donor: USER,
        timestamp: U256::from(1_700_000_100u64),
        anonymous,
    }
}
