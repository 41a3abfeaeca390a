// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;
use cdon_evm_helpers::contracts::{Campaign, DonationsRead};
use cdon_sdk::{aggregate_campaigns, CampaignDraft};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CampaignCommands {
    /// List active campaigns
    List,
    /// Show a single campaign
    Show { id: u64 },
    /// Start a campaign with an encrypted goal
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Goal in ETH, encrypted before it is sent
        #[arg(long)]
        goal: String,

        #[arg(long = "duration-days", default_value_t = 30)]
        duration_days: u64,
    },
}

pub async fn execute(command: CampaignCommands, ctx: &CliContext) -> Result<()> {
    match command {
        CampaignCommands::List => {
            let reader = ctx.reader().await?;
            let ids = reader.get_active_campaigns().await?;
            let batch = aggregate_campaigns(&reader, &ids).await;
            if batch.campaigns.is_empty() && batch.failures.is_empty() {
                println!("No active campaigns");
            }
            for campaign in &batch.campaigns {
                println!("{}", summary(campaign));
            }
            for failure in &batch.failures {
                eprintln!("#{}: {}", failure.campaign_id, failure.error);
            }
        }
        CampaignCommands::Show { id } => {
            let campaign = ctx.reader().await?.get_campaign_info(id).await?;
            println!("{}", summary(&campaign));
            println!("  {}", campaign.description);
            println!("  beneficiary: {}", campaign.beneficiary);
            println!("  created at:  {}", campaign.created_at);
            println!("  deadline:    {}", campaign.deadline);
        }
        CampaignCommands::Create {
            name,
            description,
            goal,
            duration_days,
        } => {
            let sdk = ctx.connected_sdk().await?;
            let created = sdk
                .create_campaign(CampaignDraft {
                    name,
                    description,
                    goal_amount: goal,
                    duration_days,
                })
                .await?;
            match created.campaign_id {
                Some(id) => println!("Created campaign #{id} in {}", created.tx_hash),
                None => println!(
                    "Campaign created in {}. Its id could not be read from the receipt.",
                    created.tx_hash
                ),
            }
        }
    }
    Ok(())
}

fn summary(campaign: &Campaign) -> String {
    format!(
        "#{} {} [{}] donors: {}",
        campaign.id,
        campaign.name,
        if campaign.active { "active" } else { "closed" },
        campaign.donor_count
    )
}
