// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{primitives::Address, providers::DynProvider, sol_types::SolEvent};
use cdon_evm_helpers::{
    event_listener::{EventListener, ListenerHandle},
    events::{CampaignCreated, DonationEvent, DonationMade, FundsWithdrawn},
};
use std::{sync::Arc, time::Duration};

pub type EventCallback = Arc<dyn Fn(DonationEvent) + Send + Sync>;

/// Register `callback` for every donation event on `listener`
pub async fn register_donation_events(listener: &EventListener, callback: EventCallback) {
    for signature in [
        CampaignCreated::SIGNATURE_HASH,
        DonationMade::SIGNATURE_HASH,
        FundsWithdrawn::SIGNATURE_HASH,
    ] {
        let callback = callback.clone();
        listener
            .add_log_handler(signature, move |log| {
                let callback = callback.clone();
                async move {
                    if let Some(event) = DonationEvent::decode(&log) {
                        callback(event?);
                    }
                    Ok::<_, anyhow::Error>(())
                }
            })
            .await;
    }
}

/// Poll `contract` for donation events until the handle is dropped
pub async fn watch_donation_events(
    provider: DynProvider,
    contract: Address,
    poll_interval: Option<Duration>,
    callback: EventCallback,
) -> ListenerHandle {
    let mut listener = EventListener::create_contract_listener(provider, contract);
    if let Some(interval) = poll_interval {
        listener = listener.with_poll_interval(interval);
    }
    register_donation_events(&listener, callback).await;
    listener.start()
}
