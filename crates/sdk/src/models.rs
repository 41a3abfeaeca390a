// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Input for a new campaign. The goal is a decimal amount of the native currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub name: String,
    pub description: String,
    pub goal_amount: String,
    pub duration_days: u64,
}

/// A donation request. `amount` is encrypted, `eth_value` is attached in the clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationIntent {
    pub campaign_id: u64,
    pub amount: String,
    pub is_anonymous: bool,
    pub eth_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkStatus {
    pub initialized: bool,
    pub wallet_connected: bool,
    pub wallet_address: Option<Address>,
    pub contract_address: Address,
    pub chain_id: Option<u64>,
    pub required_chain_id: u64,
}
