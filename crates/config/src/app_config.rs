// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::chain_config::ChainConfig;
use crate::contract::Contract;
use crate::load_config::{find_in_parent, ConfigSearch};
use crate::relayer_config::RelayerConfig;
use crate::rpc::RPC;
use crate::yaml::load_yaml_with_env;
use alloy::primitives::Address;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{env, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_CONFIG_NAME: &str = "donations.config.yaml";
pub const ENV_PREFIX: &str = "CDON_";

/// The config used throughout the app
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// The network the wallet must be connected to
    chain: ChainConfig,
    /// The confidential donations contract
    contract: Option<Contract>,
    /// The encryption relayer
    relayer: RelayerConfig,
    /// Give up waiting for a receipt after this many seconds. Unset leaves it to the transport.
    confirmation_timeout_secs: Option<u64>,
    /// The config file as found during loading
    found_config_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::sepolia(),
            contract: None,
            relayer: RelayerConfig::default(),
            confirmation_timeout_secs: None,
            found_config_file: None,
        }
    }
}

impl AppConfig {
    pub fn new(chain: ChainConfig, contract: Contract, relayer: RelayerConfig) -> Self {
        Self {
            chain,
            contract: Some(contract),
            relayer,
            ..Default::default()
        }
    }

    /// Check everything the application cannot start without
    pub fn validate(&self) -> Result<()> {
        self.rpc()?;
        self.contract_address()?;
        if !self.relayer.use_mock {
            self.relayer_url()?;
        }
        Ok(())
    }

    /// Get the chain config
    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn chain_id(&self) -> u64 {
        self.chain.chain_id
    }

    pub fn rpc(&self) -> Result<RPC> {
        self.chain.rpc_url()
    }

    pub fn contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    pub fn contract_address(&self) -> Result<Address> {
        let Some(contract) = &self.contract else {
            bail!("Contract address is not configured. Set `contract` or CDON_CONTRACT");
        };
        contract.parse_address()
    }

    pub fn relayer(&self) -> &RelayerConfig {
        &self.relayer
    }

    pub fn relayer_url(&self) -> Result<Url> {
        self.relayer.url()
    }

    pub fn use_mock_relayer(&self) -> bool {
        self.relayer.use_mock
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }

    /// Get the config file path if one was found
    pub fn config_file(&self) -> Option<&PathBuf> {
        self.found_config_file.as_ref()
    }
}

/// Value struct for passing configuration from the cli to the configuration
#[derive(Default, Serialize, Deserialize, Clone, Debug)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
    pub found_config_file: Option<PathBuf>,
}

/// Load the config at the config_file or the default location if not provided
pub fn load_config(config_file: Option<String>, contract: Option<String>) -> Result<AppConfig> {
    let config_file = config_file.map(PathBuf::from);

    let resolved_config_path = ConfigSearch {
        cwd: env::current_dir()?,
        default_dir: OsDirs::config_dir()?,
        filename: DEFAULT_CONFIG_NAME.to_string(),
        explicit: config_file,
    }
    .resolve(find_in_parent);

    debug!("Loading configuration from {:?}", resolved_config_path);

    let loaded_yaml = load_yaml_with_env(&resolved_config_path)
        .with_context(|| format!("Could not read {:?}", resolved_config_path))?;

    let found_config_file = resolved_config_path
        .exists()
        .then_some(resolved_config_path);

    let config: AppConfig = Figment::from(Serialized::defaults(&AppConfig::default()))
        .merge(Yaml::string(&loaded_yaml))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["private_key"])
                .split("__"),
        )
        .merge(Serialized::defaults(&CliOverrides {
            contract: contract.map(Contract::AddressOnly),
            found_config_file,
        }))
        .extract()
        .context("Could not parse configuration")?;

    Ok(config)
}

pub struct OsDirs;
impl OsDirs {
    pub fn config_dir() -> Result<PathBuf> {
        let Some(dir) = dirs::config_dir() else {
            bail!("Could not determine the OS config dir. See https://docs.rs/dirs for more information.");
        };
        Ok(dir.join("confidential-donations"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_config::SEPOLIA_CHAIN_ID;
    use figment::Jail;

    const CONTRACT: &str = "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0";

    #[test]
    fn test_deserialization() -> Result<()> {
        let config_str = r#"
chain:
  chain_id: 31337
  name: "hardhat"
  rpc_url: "http://localhost:8545"
contract:
  address: "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"
  deploy_block: 12
relayer:
  use_mock: true
confirmation_timeout_secs: 90
"#;
        let config: AppConfig = serde_yaml::from_str(config_str)?;
        assert_eq!(config.chain_id(), 31337);
        assert!(config.rpc()?.is_local());
        assert_eq!(config.contract_address()?, CONTRACT.parse::<Address>()?);
        assert_eq!(config.contract().and_then(|c| c.deploy_block()), Some(12));
        assert!(config.use_mock_relayer());
        assert_eq!(config.confirmation_timeout(), Some(Duration::from_secs(90)));
        // currency defaults survive a partial chain section
        assert_eq!(config.chain().native_currency.symbol, "ETH");
        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_defaults_need_a_contract() {
        let config = AppConfig::default();
        assert_eq!(config.chain_id(), SEPOLIA_CHAIN_ID);
        assert!(config.relayer_url().is_ok());
        assert!(config.confirmation_timeout().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_relayer_is_fatal() {
        let mut config = AppConfig::new(
            ChainConfig::sepolia(),
            Contract::AddressOnly(CONTRACT.to_string()),
            RelayerConfig {
                url: None,
                use_mock: false,
            },
        );
        assert!(config.validate().is_err());

        config.relayer.use_mock = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_NAME,
                &format!(
                    r#"
contract: "{CONTRACT}"
relayer:
  url: "https://relayer.example.org"
"#
                ),
            )?;
            jail.set_env("CDON_CHAIN__RPC_URL", "https://rpc.example.org");
            jail.set_env("CDON_CONFIRMATION_TIMEOUT_SECS", "30");
            jail.set_env(
                "CDON_PRIVATE_KEY",
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            );

            let config = load_config(None, None).map_err(|e| e.to_string())?;

            assert_eq!(config.chain().rpc_url, "https://rpc.example.org");
            assert_eq!(config.chain_id(), SEPOLIA_CHAIN_ID);
            assert_eq!(
                config.relayer_url().map_err(|e| e.to_string())?.as_str(),
                "https://relayer.example.org/"
            );
            assert_eq!(config.confirmation_timeout(), Some(Duration::from_secs(30)));
            assert!(config.config_file().is_some());
            config.validate().map_err(|e| e.to_string())?;
            Ok(())
        });
    }

    #[test]
    fn test_cli_contract_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.yaml",
                "contract: \"0x0000000000000000000000000000000000000001\"",
            )?;

            let config = load_config(Some("custom.yaml".to_string()), Some(CONTRACT.to_string()))
                .map_err(|e| e.to_string())?;

            assert_eq!(
                config.contract().map(|c| c.address().as_str()),
                Some(CONTRACT)
            );
            Ok(())
        });
    }
}
