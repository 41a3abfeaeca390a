// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_RELAYER_URL: &str = "https://relayer.testnet.zama.org";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayerConfig {
    /// Base url of the encryption relayer
    pub url: Option<String>,
    /// Use the in-process mock relayer. Local development only: handles and proofs are random.
    pub use_mock: bool,
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            url: Some(DEFAULT_RELAYER_URL.to_string()),
            use_mock: false,
        }
    }
}

impl RelayerConfig {
    pub fn url(&self) -> Result<Url> {
        let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) else {
            bail!("Relayer URL is not configured. Set `relayer.url` or CDON_RELAYER__URL");
        };
        Url::parse(url).with_context(|| format!("Invalid relayer URL '{url}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_an_error() {
        let config = RelayerConfig {
            url: None,
            use_mock: false,
        };
        assert!(config.url().is_err());

        let config = RelayerConfig {
            url: Some("  ".to_string()),
            use_mock: false,
        };
        assert!(config.url().is_err());
    }

    #[test]
    fn default_points_at_testnet_relayer() -> Result<()> {
        assert_eq!(
            RelayerConfig::default().url()?.as_str(),
            "https://relayer.testnet.zama.org/"
        );
        Ok(())
    }
}
