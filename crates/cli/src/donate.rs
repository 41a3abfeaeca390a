// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;
use cdon_sdk::DonationIntent;

pub async fn execute(ctx: &CliContext, intent: DonationIntent) -> Result<()> {
    let campaign_id = intent.campaign_id;
    let sdk = ctx.connected_sdk().await?;
    let tx_hash = sdk.make_donation(intent).await?;
    println!("Donated to campaign #{campaign_id} in {tx_hash}");
    Ok(())
}
