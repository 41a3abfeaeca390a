// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    node_bindings::Anvil,
    providers::Provider,
    signers::local::PrivateKeySigner,
};
use anyhow::Result;
use cdon_config::{ChainConfig, RPC};
use cdon_wallet::{InjectedProvider, LocalWallet, WalletSession, UNRECOGNIZED_CHAIN};
use std::sync::Arc;

#[tokio::test]
async fn test_local_wallet_registers_and_switches() -> Result<()> {
    // Skip when anvil is not installed
    let Ok(home) = Anvil::new().chain_id(31337).try_spawn() else {
        return Ok(());
    };
    let Ok(other) = Anvil::new().chain_id(1337).try_spawn() else {
        return Ok(());
    };

    let signer: PrivateKeySigner = home.keys()[0].clone().into();
    let wallet = Arc::new(LocalWallet::connect(signer, &RPC::from_url(&home.endpoint())?).await?);
    assert_eq!(wallet.chain_id().await?, 31337);

    let err = wallet.switch_chain(1337).await.unwrap_err();
    assert_eq!(err.code, UNRECOGNIZED_CHAIN);

    let target = ChainConfig {
        chain_id: 1337,
        name: "devnet".to_string(),
        rpc_url: other.endpoint(),
        block_explorer_url: None,
        ..ChainConfig::default()
    };
    let mut changes = wallet.subscribe_chain_changed();

    let session = WalletSession::new(Some(wallet.clone()), target)?;
    let connected = session.connect(Default::default()).await?;

    assert_eq!(connected.session.chain_id, 1337);
    assert_eq!(connected.session.wallet_address, wallet.address());
    assert_eq!(connected.signer.get_chain_id().await?, 1337);
    assert_eq!(changes.recv().await?, 1337);
    Ok(())
}
