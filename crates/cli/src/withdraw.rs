// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;

pub async fn execute(ctx: &CliContext, campaign_id: u64) -> Result<()> {
    let sdk = ctx.connected_sdk().await?;
    let tx_hash = sdk.withdraw_funds(campaign_id).await?;
    println!("Withdrew campaign #{campaign_id} in {tx_hash}");
    Ok(())
}
