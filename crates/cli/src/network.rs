// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;
use cdon_wallet::NetworkGuard;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// Show whether the wallet is on the required chain
    Status,
    /// Switch the wallet to the required chain, registering it first if needed
    Switch,
}

pub async fn execute(command: NetworkCommands, ctx: &CliContext) -> Result<()> {
    let chain = ctx.config().chain().clone();
    let guard = NetworkGuard::new(ctx.wallet().await?, chain.clone());

    if let NetworkCommands::Switch = command {
        guard.request_switch().await?;
    }

    let status = guard.status().await?;
    if status.compliant {
        println!("On {} (chain {})", chain.name, status.chain_id);
    } else {
        println!(
            "On chain {} but {} (chain {}) is required. Run `cdon network switch`.",
            status.chain_id, chain.name, chain.chain_id
        );
    }
    Ok(())
}
