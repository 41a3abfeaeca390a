// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use anyhow::Result;
use cdon_config::{AppConfig, ChainConfig};
use std::time::Duration;

/// What the SDK needs from the application config
#[derive(Debug, Clone, PartialEq)]
pub struct SdkConfig {
    pub chain: ChainConfig,
    pub contract_address: Address,
    pub confirmation_timeout: Option<Duration>,
}

impl SdkConfig {
    pub fn new(chain: ChainConfig, contract_address: Address) -> Self {
        Self {
            chain,
            contract_address,
            confirmation_timeout: None,
        }
    }
}

impl TryFrom<&AppConfig> for SdkConfig {
    type Error = anyhow::Error;

    fn try_from(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chain: config.chain().clone(),
            contract_address: config.contract_address()?,
            confirmation_timeout: config.confirmation_timeout(),
        })
    }
}
