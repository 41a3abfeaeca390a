// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use cdon_evm_helpers::contracts::{Campaign, DonationsRead};
use cdon_utils::DonationError;
use futures::future::join_all;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignFailure {
    pub campaign_id: u64,
    pub error: DonationError,
}

/// Campaigns that loaded, in request order, plus the lookups that failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignBatch {
    pub campaigns: Vec<Campaign>,
    pub failures: Vec<CampaignFailure>,
}

impl CampaignBatch {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch every campaign concurrently. A failed lookup never discards the others.
pub async fn aggregate_campaigns<R>(reader: &R, ids: &[u64]) -> CampaignBatch
where
    R: DonationsRead + ?Sized,
{
    let lookups = ids.iter().map(|&campaign_id| async move {
        (campaign_id, reader.get_campaign_info(campaign_id).await)
    });

    let mut batch = CampaignBatch::default();
    for (campaign_id, result) in join_all(lookups).await {
        match result {
            Ok(campaign) => batch.campaigns.push(campaign),
            Err(error) => {
                warn!(campaign_id, "Could not load campaign: {error}");
                batch.failures.push(CampaignFailure { campaign_id, error });
            }
        }
    }
    batch
}
