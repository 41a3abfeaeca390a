// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::contracts::to_u64;
pub use crate::contracts::ConfidentialDonations::{CampaignCreated, DonationMade, FundsWithdrawn};
use alloy::{
    primitives::{Address, TxHash},
    rpc::types::Log,
    sol_types::SolEvent,
};
use cdon_utils::DonationError;
use serde::Serialize;
use tracing::warn;

/// A decoded contract event together with the transaction that emitted it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum DonationEvent {
    CampaignCreated {
        campaign_id: u64,
        name: String,
        beneficiary: Address,
        deadline: u64,
        transaction_hash: Option<TxHash>,
    },
    DonationMade {
        campaign_id: u64,
        donor: Address,
        timestamp: u64,
        anonymous: bool,
        transaction_hash: Option<TxHash>,
    },
    FundsWithdrawn {
        campaign_id: u64,
        beneficiary: Address,
        transaction_hash: Option<TxHash>,
    },
}

impl DonationEvent {
    pub fn campaign_id(&self) -> u64 {
        match self {
            DonationEvent::CampaignCreated { campaign_id, .. }
            | DonationEvent::DonationMade { campaign_id, .. }
            | DonationEvent::FundsWithdrawn { campaign_id, .. } => *campaign_id,
        }
    }

    /// Decode any known event. `None` for logs this contract does not define.
    pub fn decode(log: &Log) -> Option<Result<Self, DonationError>> {
        let topic0 = *log.topic0()?;
        let transaction_hash = log.transaction_hash;
        let decode_error = |e: alloy::sol_types::Error| DonationError::DecodeError(e.to_string());

        let event = if topic0 == CampaignCreated::SIGNATURE_HASH {
            log.log_decode::<CampaignCreated>()
                .map_err(decode_error)
                .and_then(|decoded| {
                    let event = decoded.inner.data;
                    Ok(DonationEvent::CampaignCreated {
                        campaign_id: to_u64("campaignId", event.campaignId)?,
                        name: event.name,
                        beneficiary: event.beneficiary,
                        deadline: to_u64("deadline", event.deadline)?,
                        transaction_hash,
                    })
                })
        } else if topic0 == DonationMade::SIGNATURE_HASH {
            log.log_decode::<DonationMade>()
                .map_err(decode_error)
                .and_then(|decoded| {
                    let event = decoded.inner.data;
                    Ok(DonationEvent::DonationMade {
                        campaign_id: to_u64("campaignId", event.campaignId)?,
                        donor: event.donor,
                        timestamp: to_u64("timestamp", event.timestamp)?,
                        anonymous: event.anonymous,
                        transaction_hash,
                    })
                })
        } else if topic0 == FundsWithdrawn::SIGNATURE_HASH {
            log.log_decode::<FundsWithdrawn>()
                .map_err(decode_error)
                .and_then(|decoded| {
                    let event = decoded.inner.data;
                    Ok(DonationEvent::FundsWithdrawn {
                        campaign_id: to_u64("campaignId", event.campaignId)?,
                        beneficiary: event.beneficiary,
                        transaction_hash,
                    })
                })
        } else {
            return None;
        };
        Some(event)
    }
}

/// Recover the id assigned by `createCampaign` from the receipt logs of `contract`.
///
/// Matching is by event signature hash. If the deployed contract emits a
/// different signature, logs from the contract are present but never match;
/// that case is logged instead of passing silently.
pub fn find_campaign_id(logs: &[Log], contract: Address) -> Option<u64> {
    let mut from_contract = 0usize;
    for log in logs.iter().filter(|log| log.address() == contract) {
        from_contract += 1;
        if log.topic0() != Some(&CampaignCreated::SIGNATURE_HASH) {
            continue;
        }
        match log.log_decode::<CampaignCreated>() {
            Ok(decoded) => match to_u64("campaignId", decoded.inner.data.campaignId) {
                Ok(id) => return Some(id),
                Err(e) => warn!("{e}"),
            },
            Err(e) => warn!("Could not decode CampaignCreated log: {e}"),
        }
    }

    if from_contract > 0 {
        warn!(
            logs = from_contract,
            expected = %CampaignCreated::SIGNATURE_HASH,
            "Receipt has logs from {contract} but none is a decodable CampaignCreated event. \
             The contract's event signature may have changed."
        );
    }
    None
}
