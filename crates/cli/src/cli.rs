// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::campaigns::{self, CampaignCommands};
use crate::helpers::{context::CliContext, ensure_hex_zeroizing, telemetry::setup_tracing};
use crate::network::{self, NetworkCommands};
use crate::{contribution, donate, status, watch, withdraw};
use alloy::primitives::Address;
use anyhow::Result;
use cdon_config::{load_config, validation::parse_address};
use cdon_sdk::DonationIntent;
use clap::{command, ArgAction, Parser, Subcommand};
use std::time::Duration;
use tracing::{info, instrument, Level};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "cdon")]
#[command(about = "A CLI for fundraising campaigns with encrypted donation amounts", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Donations contract address, overriding the config file
    #[arg(long, global = true, value_parser = parse_address)]
    contract: Option<Address>,

    /// Private key of the signing account
    #[arg(
        long = "private-key",
        env = "CDON_PRIVATE_KEY",
        hide_env_values = true,
        global = true,
        value_parser = ensure_hex_zeroizing
    )]
    private_key: Option<Zeroizing<String>>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `cdon -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        setup_tracing(self.log_level());

        let config = load_config(self.config, self.contract.map(|a| a.to_string()))?;
        info!("Config loaded from: {:?}", config.config_file());
        let ctx = CliContext::new(config, self.private_key);

        match self.command {
            Commands::Status => status::execute(&ctx).await?,
            Commands::Network { command } => network::execute(command, &ctx).await?,
            Commands::Campaigns { command } => campaigns::execute(command, &ctx).await?,
            Commands::Donate {
                campaign,
                amount,
                eth_value,
                anonymous,
            } => {
                // the attached value defaults to the encrypted amount
                let eth_value = eth_value.unwrap_or_else(|| amount.clone());
                donate::execute(
                    &ctx,
                    DonationIntent {
                        campaign_id: campaign,
                        amount,
                        is_anonymous: anonymous,
                        eth_value,
                    },
                )
                .await?
            }
            Commands::Withdraw { campaign_id } => withdraw::execute(&ctx, campaign_id).await?,
            Commands::Contribution { campaign_id } => {
                contribution::execute(&ctx, campaign_id).await?
            }
            Commands::Watch { poll_interval } => {
                watch::execute(&ctx, poll_interval.map(Duration::from_secs)).await?
            }
        }

        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the SDK, wallet and contract state
    Status,

    /// Check or fix the wallet network
    Network {
        #[command(subcommand)]
        command: NetworkCommands,
    },

    /// Browse and create campaigns
    Campaigns {
        #[command(subcommand)]
        command: CampaignCommands,
    },

    /// Donate an encrypted amount to a campaign
    Donate {
        /// Campaign id
        #[arg(long)]
        campaign: u64,

        /// Amount to encrypt, in ETH. Eg. 0.01
        #[arg(long)]
        amount: String,

        /// ETH attached to the transaction. Defaults to the amount
        #[arg(long = "eth-value")]
        eth_value: Option<String>,

        /// Hide the donor address from the donation event
        #[arg(long)]
        anonymous: bool,
    },

    /// Withdraw the funds of a campaign you are the beneficiary of
    Withdraw { campaign_id: u64 },

    /// Print the encrypted handle of your contribution to a campaign
    Contribution { campaign_id: u64 },

    /// Print contract events as they happen
    Watch {
        /// Seconds between log polls
        #[arg(long = "poll-interval")]
        poll_interval: Option<u64>,
    },
}
