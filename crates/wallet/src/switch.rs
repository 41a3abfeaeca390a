// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{AddChainParams, InjectedProvider, UNRECOGNIZED_CHAIN};
use cdon_config::ChainConfig;
use cdon_utils::DonationError;
use tracing::info;

/// Ask the wallet to move to `chain`, registering the chain first if the wallet has never seen it.
pub async fn switch_or_register(
    provider: &dyn InjectedProvider,
    chain: &ChainConfig,
) -> Result<(), DonationError> {
    info!(chain_id = chain.chain_id, "Switching wallet to {}", chain.name);
    match provider.switch_chain(chain.chain_id).await {
        Ok(()) => Ok(()),
        Err(e) if e.code == UNRECOGNIZED_CHAIN => {
            info!(chain_id = chain.chain_id, "Registering {} with the wallet", chain.name);
            provider.add_chain(&AddChainParams::from(chain)).await?;
            provider.switch_chain(chain.chain_id).await?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
