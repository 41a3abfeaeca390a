// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::{from_contract_error, from_pending_error, from_transport_error};
use crate::events::find_campaign_id;
use crate::transaction::SubmittedTx;
use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash, B256, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    sol,
};
use async_trait::async_trait;
use cdon_relayer_client::EncryptedValue;
use cdon_utils::DonationError;
use serde::Serialize;
use std::{marker::PhantomData, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

sol! {
    #[derive(Debug, PartialEq)]
    #[sol(rpc)]
    contract ConfidentialDonations {
        event CampaignCreated(uint256 indexed campaignId, string name, address indexed beneficiary, uint256 deadline);
        event DonationMade(uint256 indexed campaignId, address indexed donor, uint256 timestamp, bool anonymous);
        event FundsWithdrawn(uint256 indexed campaignId, address indexed beneficiary);

        uint256 public campaignCounter;
        address public feeCollector;

        function paused() external view returns (bool);
        function createCampaign(string calldata name, string calldata description, bytes32 encryptedGoal, bytes calldata goalProof, uint256 durationDays) external returns (uint256 campaignId);
        function donate(uint256 campaignId, bytes32 encryptedAmount, bytes calldata inputProof, bool isAnonymous) external payable;
        function withdrawFunds(uint256 campaignId) external;
        function getCampaignInfo(uint256 campaignId) external view returns (string memory name, string memory description, address beneficiary, uint256 deadline, bool active, uint256 donorCount, uint256 createdAt);
        function getActiveCampaigns() external view returns (uint256[] memory);
        function getMyContribution(uint256 campaignId) external view returns (bytes32);
    }
}

/// A campaign as stored by the contract. Goal and raised amounts stay encrypted on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub beneficiary: Address,
    pub deadline: u64,
    pub active: bool,
    pub donor_count: u64,
    pub created_at: u64,
}

pub(crate) fn to_u64(field: &str, value: U256) -> Result<u64, DonationError> {
    u64::try_from(value)
        .map_err(|_| DonationError::DecodeError(format!("{field} {value} does not fit in 64 bits")))
}

impl Campaign {
    pub fn from_info(
        id: u64,
        info: ConfidentialDonations::getCampaignInfoReturn,
    ) -> Result<Self, DonationError> {
        Ok(Self {
            id,
            name: info.name,
            description: info.description,
            beneficiary: info.beneficiary,
            deadline: to_u64("deadline", info.deadline)?,
            active: info.active,
            donor_count: to_u64("donorCount", info.donorCount)?,
            created_at: to_u64("createdAt", info.createdAt)?,
        })
    }
}

/// Outcome of `createCampaign`. The id is recovered from the receipt on a best-effort basis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCampaign {
    pub campaign_id: Option<u64>,
    pub tx_hash: TxHash,
}

/// Read-only operations on the donations contract
#[async_trait]
pub trait DonationsRead: Send + Sync {
    async fn get_campaign_info(&self, campaign_id: u64) -> Result<Campaign, DonationError>;

    /// Ids of campaigns the contract still considers active
    async fn get_active_campaigns(&self) -> Result<Vec<u64>, DonationError>;

    /// The caller's encrypted contribution handle for a campaign
    async fn get_my_contribution(&self, campaign_id: u64) -> Result<B256, DonationError>;

    async fn campaign_counter(&self) -> Result<u64, DonationError>;

    async fn fee_collector(&self) -> Result<Address, DonationError>;

    async fn is_paused(&self) -> Result<bool, DonationError>;
}

/// Write operations on the donations contract.
///
/// Every confidential amount arrives as an [`EncryptedValue`] that was produced
/// for this contract and for the account that signs the transaction.
#[async_trait]
pub trait DonationsWrite: Send + Sync {
    async fn create_campaign(
        &self,
        name: String,
        description: String,
        goal: EncryptedValue,
        duration_days: u64,
    ) -> Result<CreatedCampaign, DonationError>;

    async fn donate(
        &self,
        campaign_id: u64,
        amount: EncryptedValue,
        is_anonymous: bool,
        value: U256,
    ) -> Result<SubmittedTx, DonationError>;

    async fn withdraw_funds(&self, campaign_id: u64) -> Result<SubmittedTx, DonationError>;
}

/// Everything a signed-in user can do against the contract
pub trait DonationsGateway: DonationsRead + DonationsWrite {
    fn contract_address(&self) -> Address;
    fn account(&self) -> Address;
}

/// Marker for what a contract handle is allowed to do
pub trait ProviderType: Send + Sync {}

/// Marker type for read-only provider
#[derive(Clone)]
pub struct ReadOnly;
impl ProviderType for ReadOnly {}

/// Marker type for read-write provider
#[derive(Clone)]
pub struct ReadWrite;
impl ProviderType for ReadWrite {}

#[derive(Clone)]
pub struct DonationsContract<T: ProviderType> {
    provider: DynProvider,
    contract_address: Address,
    caller: Option<Address>,
    confirmation_timeout: Option<Duration>,
    nonce_lock: Arc<Mutex<()>>,
    _marker: PhantomData<T>,
}

pub type DonationsReadContract = DonationsContract<ReadOnly>;
pub type DonationsWriteContract = DonationsContract<ReadWrite>;

impl<T: ProviderType> DonationsContract<T> {
    pub fn address(&self) -> &Address {
        &self.contract_address
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    fn instance(&self) -> ConfidentialDonations::ConfidentialDonationsInstance<&DynProvider> {
        ConfidentialDonations::new(self.contract_address, &self.provider)
    }
}

impl DonationsContract<ReadOnly> {
    pub fn read_only(provider: DynProvider, contract_address: Address) -> Self {
        Self {
            provider,
            contract_address,
            caller: None,
            confirmation_timeout: None,
            nonce_lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    /// Connect over a plain RPC url without a signer
    pub async fn connect(rpc_url: &str, contract_address: Address) -> Result<Self, DonationError> {
        let provider = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(from_transport_error)?;
        Ok(Self::read_only(provider.erased(), contract_address))
    }

    /// Read as `caller`, for views that depend on `msg.sender`
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }
}

impl DonationsContract<ReadWrite> {
    /// `signer` must sign as `account`
    pub fn new(signer: DynProvider, contract_address: Address, account: Address) -> Self {
        Self {
            provider: signer,
            contract_address,
            caller: Some(account),
            confirmation_timeout: None,
            nonce_lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    /// Give up waiting for a receipt after `timeout`
    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    async fn next_pending_nonce(&self, account: Address) -> Result<u64, DonationError> {
        self.provider
            .get_transaction_count(account)
            .pending()
            .await
            .map_err(from_transport_error)
    }

    async fn confirm(
        &self,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<SubmittedTx, DonationError> {
        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "Waiting for confirmation...");
        let receipt = pending
            .with_timeout(self.confirmation_timeout)
            .get_receipt()
            .await
            .map_err(from_pending_error)?;
        SubmittedTx::from_receipt(&receipt)
    }
}

#[async_trait]
impl<T: ProviderType> DonationsRead for DonationsContract<T> {
    async fn get_campaign_info(&self, campaign_id: u64) -> Result<Campaign, DonationError> {
        let contract = self.instance();
        let mut call = contract.getCampaignInfo(U256::from(campaign_id));
        if let Some(caller) = self.caller {
            call = call.from(caller);
        }
        let info = call.call().await.map_err(from_contract_error)?;
        Campaign::from_info(campaign_id, info)
    }

    async fn get_active_campaigns(&self) -> Result<Vec<u64>, DonationError> {
        let ids = self
            .instance()
            .getActiveCampaigns()
            .call()
            .await
            .map_err(from_contract_error)?;
        ids.into_iter().map(|id| to_u64("campaignId", id)).collect()
    }

    async fn get_my_contribution(&self, campaign_id: u64) -> Result<B256, DonationError> {
        let Some(caller) = self.caller else {
            return Err(DonationError::NotInitialized("no connected account"));
        };
        self.instance()
            .getMyContribution(U256::from(campaign_id))
            .from(caller)
            .call()
            .await
            .map_err(from_contract_error)
    }

    async fn campaign_counter(&self) -> Result<u64, DonationError> {
        let counter = self
            .instance()
            .campaignCounter()
            .call()
            .await
            .map_err(from_contract_error)?;
        to_u64("campaignCounter", counter)
    }

    async fn fee_collector(&self) -> Result<Address, DonationError> {
        self.instance()
            .feeCollector()
            .call()
            .await
            .map_err(from_contract_error)
    }

    async fn is_paused(&self) -> Result<bool, DonationError> {
        self.instance()
            .paused()
            .call()
            .await
            .map_err(from_contract_error)
    }
}

// Writes hold the nonce lock from nonce selection until the transaction is sent
#[async_trait]
impl DonationsWrite for DonationsContract<ReadWrite> {
    async fn create_campaign(
        &self,
        name: String,
        description: String,
        goal: EncryptedValue,
        duration_days: u64,
    ) -> Result<CreatedCampaign, DonationError> {
        let account = self.account();
        info!("Creating campaign: {}", name);

        let pending = {
            let _guard = self.nonce_lock.lock().await;
            let nonce = self.next_pending_nonce(account).await?;
            self.instance()
                .createCampaign(
                    name,
                    description,
                    goal.handle,
                    goal.proof,
                    U256::from(duration_days),
                )
                .from(account)
                .nonce(nonce)
                .send()
                .await
                .map_err(from_contract_error)?
        };

        let submitted = self.confirm(pending).await?;
        let campaign_id = find_campaign_id(&submitted.logs, self.contract_address);
        match campaign_id {
            Some(id) => {
                info!(campaign_id = id, tx_hash = %submitted.tx_hash, "Campaign created")
            }
            None => warn!(
                tx_hash = %submitted.tx_hash,
                "Campaign created but its id could not be recovered"
            ),
        }

        Ok(CreatedCampaign {
            campaign_id,
            tx_hash: submitted.tx_hash,
        })
    }

    async fn donate(
        &self,
        campaign_id: u64,
        amount: EncryptedValue,
        is_anonymous: bool,
        value: U256,
    ) -> Result<SubmittedTx, DonationError> {
        let account = self.account();
        debug!(campaign_id, is_anonymous, %value, "Sending encrypted donation");

        let pending = {
            let _guard = self.nonce_lock.lock().await;
            let nonce = self.next_pending_nonce(account).await?;
            self.instance()
                .donate(
                    U256::from(campaign_id),
                    amount.handle,
                    amount.proof,
                    is_anonymous,
                )
                .value(value)
                .from(account)
                .nonce(nonce)
                .send()
                .await
                .map_err(from_contract_error)?
        };

        let submitted = self.confirm(pending).await?;
        info!(campaign_id, tx_hash = %submitted.tx_hash, "Donation confirmed");
        Ok(submitted)
    }

    async fn withdraw_funds(&self, campaign_id: u64) -> Result<SubmittedTx, DonationError> {
        let account = self.account();
        info!(campaign_id, "Withdrawing campaign funds...");

        let pending = {
            let _guard = self.nonce_lock.lock().await;
            let nonce = self.next_pending_nonce(account).await?;
            self.instance()
                .withdrawFunds(U256::from(campaign_id))
                .from(account)
                .nonce(nonce)
                .send()
                .await
                .map_err(from_contract_error)?
        };

        let submitted = self.confirm(pending).await?;
        info!(campaign_id, tx_hash = %submitted.tx_hash, "Funds withdrawn");
        Ok(submitted)
    }
}

impl DonationsGateway for DonationsContract<ReadWrite> {
    fn contract_address(&self) -> Address {
        self.contract_address
    }

    fn account(&self) -> Address {
        self.caller.unwrap_or_default()
    }
}
