// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;

pub async fn execute(ctx: &CliContext, campaign_id: u64) -> Result<()> {
    let sdk = ctx.connected_sdk().await?;
    let handle = sdk.get_my_contribution(campaign_id).await?;
    if handle.is_zero() {
        println!("No contribution to campaign #{campaign_id}");
    } else {
        println!("{handle}");
    }
    Ok(())
}
