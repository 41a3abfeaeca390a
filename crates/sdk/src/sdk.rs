// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    aggregate_campaigns, watch_donation_events, CampaignBatch, CampaignDraft, DonationIntent,
    EventCallback, SdkConfig, SdkStatus,
};
use alloy::{
    primitives::{TxHash, B256},
    providers::DynProvider,
};
use cdon_evm_helpers::{
    contracts::{
        Campaign, CreatedCampaign, DonationsContract, DonationsGateway, DonationsRead,
        DonationsWrite,
    },
    event_listener::ListenerHandle,
};
use cdon_relayer_client::{EncryptionSession, RelayerClient, ValueEncryptor};
use cdon_utils::{parse_native_value, DonationError};
use cdon_wallet::{InjectedProvider, NetworkGuard, Session, WalletSession};
use std::{sync::Arc, time::Duration};
use tracing::{info, instrument};

struct Connection {
    session: Session,
    gateway: Arc<dyn DonationsGateway>,
    provider: Option<DynProvider>,
    guard: Option<NetworkGuard>,
}

/// Entry point for confidential donations.
///
/// Created once per application by [`ConfidentialDonationSdk::initialize`],
/// which performs the relayer handshake. Contract operations become available
/// after [`ConfidentialDonationSdk::connect_wallet`].
pub struct ConfidentialDonationSdk {
    config: SdkConfig,
    encryptor: ValueEncryptor,
    connection: Option<Connection>,
}

impl ConfidentialDonationSdk {
    /// Fails with `InitializationFailed` when the relayer handshake fails.
    /// Nothing else in the SDK can be used in that case.
    #[instrument(skip_all)]
    pub async fn initialize(
        config: SdkConfig,
        relayer: Arc<dyn RelayerClient>,
    ) -> Result<Self, DonationError> {
        let session = EncryptionSession::initialize(relayer, config.chain.chain_id).await?;
        info!(contract = %config.contract_address, "SDK initialized");
        Ok(Self {
            config,
            encryptor: ValueEncryptor::new(Arc::new(session)),
            connection: None,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn encryptor(&self) -> &ValueEncryptor {
        &self.encryptor
    }

    /// Connect the injected wallet and bind a signing contract handle.
    ///
    /// Taking `&mut self` keeps a second connect from starting while one is in flight.
    #[instrument(skip_all)]
    pub async fn connect_wallet(
        &mut self,
        provider: Option<Arc<dyn InjectedProvider>>,
    ) -> Result<Session, DonationError> {
        let wallet = WalletSession::new(provider, self.config.chain.clone())?;
        let connected = wallet.connect(self.config.contract_address).await?;
        let session = connected.session;

        let contract = DonationsContract::new(
            connected.signer.clone(),
            session.contract_address,
            session.wallet_address,
        )
        .with_confirmation_timeout(self.config.confirmation_timeout);

        self.connection = Some(Connection {
            session,
            gateway: Arc::new(contract),
            provider: Some(connected.signer),
            guard: Some(NetworkGuard::new(wallet.provider(), self.config.chain.clone())),
        });
        Ok(session)
    }

    /// Use an already connected gateway, bypassing wallet negotiation
    pub fn attach_gateway(&mut self, gateway: Arc<dyn DonationsGateway>, chain_id: u64) -> Session {
        let session = Session {
            wallet_address: gateway.account(),
            chain_id,
            contract_address: gateway.contract_address(),
        };
        self.connection = Some(Connection {
            session,
            gateway,
            provider: None,
            guard: None,
        });
        session
    }

    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            info!(account = %connection.session.wallet_address, "Wallet disconnected");
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.connection.as_ref().map(|c| &c.session)
    }

    pub fn status(&self) -> SdkStatus {
        let session = self.session();
        SdkStatus {
            initialized: true,
            wallet_connected: session.is_some(),
            wallet_address: session.map(|s| s.wallet_address),
            contract_address: self.config.contract_address,
            chain_id: session.map(|s| s.chain_id),
            required_chain_id: self.config.chain.chain_id,
        }
    }

    /// Chain compliance for the connected wallet
    pub fn network_guard(&self) -> Option<&NetworkGuard> {
        self.connection.as_ref().and_then(|c| c.guard.as_ref())
    }

    fn connection(&self) -> Result<&Connection, DonationError> {
        self.connection
            .as_ref()
            .ok_or(DonationError::NotInitialized("wallet is not connected"))
    }

    #[instrument(skip_all)]
    pub async fn create_campaign(
        &self,
        draft: CampaignDraft,
    ) -> Result<CreatedCampaign, DonationError> {
        let gateway = &self.connection()?.gateway;
        let goal = self
            .encryptor
            .encrypt(
                &draft.goal_amount,
                gateway.contract_address(),
                gateway.account(),
            )
            .await?;
        gateway
            .create_campaign(draft.name, draft.description, goal, draft.duration_days)
            .await
    }

    /// Returns the hash of the mined donation transaction
    #[instrument(skip_all)]
    pub async fn make_donation(&self, intent: DonationIntent) -> Result<TxHash, DonationError> {
        let gateway = &self.connection()?.gateway;
        let value = parse_native_value(&intent.eth_value)?;
        let amount = self
            .encryptor
            .encrypt(&intent.amount, gateway.contract_address(), gateway.account())
            .await?;
        let submitted = gateway
            .donate(intent.campaign_id, amount, intent.is_anonymous, value)
            .await?;
        Ok(submitted.tx_hash)
    }

    #[instrument(skip_all)]
    pub async fn withdraw_funds(&self, campaign_id: u64) -> Result<TxHash, DonationError> {
        let submitted = self
            .connection()?
            .gateway
            .withdraw_funds(campaign_id)
            .await?;
        Ok(submitted.tx_hash)
    }

    pub async fn get_campaign_info(&self, campaign_id: u64) -> Result<Campaign, DonationError> {
        self.connection()?
            .gateway
            .get_campaign_info(campaign_id)
            .await
    }

    pub async fn get_active_campaigns(&self) -> Result<Vec<u64>, DonationError> {
        self.connection()?.gateway.get_active_campaigns().await
    }

    pub async fn get_my_contribution(&self, campaign_id: u64) -> Result<B256, DonationError> {
        self.connection()?
            .gateway
            .get_my_contribution(campaign_id)
            .await
    }

    /// Load every active campaign. Lookups that fail are reported next to the ones that loaded.
    #[instrument(skip_all)]
    pub async fn load_active_campaigns(&self) -> Result<CampaignBatch, DonationError> {
        let gateway = &self.connection()?.gateway;
        let ids = gateway.get_active_campaigns().await?;
        Ok(aggregate_campaigns(gateway.as_ref(), &ids).await)
    }

    /// Deliver contract events to `callback` until the handle is dropped
    pub async fn listen_events(
        &self,
        poll_interval: Option<Duration>,
        callback: EventCallback,
    ) -> Result<ListenerHandle, DonationError> {
        let connection = self.connection()?;
        let Some(provider) = connection.provider.clone() else {
            return Err(DonationError::NotInitialized(
                "no provider to listen on",
            ));
        };
        Ok(watch_donation_events(
            provider,
            connection.session.contract_address,
            poll_interval,
            callback,
        )
        .await)
    }
}
