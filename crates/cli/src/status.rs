// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;
use cdon_evm_helpers::contracts::DonationsRead;
use cdon_wallet::InjectedProvider;
use std::sync::Arc;
use tracing::warn;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let mut sdk = ctx.sdk().await?;
    if ctx.has_signer() {
        let wallet: Arc<dyn InjectedProvider> = ctx.wallet().await?;
        if let Err(e) = sdk.connect_wallet(Some(wallet)).await {
            warn!("Wallet not connected: {e}");
        }
    }
    println!("{}", serde_json::to_string_pretty(&sdk.status())?);

    let reader = ctx.reader().await?;
    println!("campaigns created: {}", reader.campaign_counter().await?);
    println!("fee collector:     {}", reader.fee_collector().await?);
    println!("paused:            {}", reader.is_paused().await?);
    Ok(())
}
