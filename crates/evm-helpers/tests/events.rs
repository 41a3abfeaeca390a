// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod helpers;

use alloy::{
    primitives::{LogData, TxHash, B256},
    rpc::types::Log,
};
use cdon_evm_helpers::{
    event_listener::EventListener,
    events::{find_campaign_id, CampaignCreated, DonationEvent, DonationMade},
};
use cdon_utils::DonationError;
use helpers::*;
use std::sync::{Arc, Mutex};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_campaign_id_from_receipt() {
    let logs = vec![
        to_log(OTHER, &campaign_created(99, "Other contract"), TxHash::ZERO),
        to_log(CONTRACT, &campaign_created(7, "Clean Water"), TxHash::ZERO),
    ];
    assert_eq!(find_campaign_id(&logs, CONTRACT), Some(7));
    assert!(!logs_contain("none is a decodable CampaignCreated"));
}

#[traced_test]
#[test]
fn test_no_logs_is_silent_none() {
    assert_eq!(find_campaign_id(&[], CONTRACT), None);
    assert!(!logs_contain("none is a decodable CampaignCreated"));
}

#[traced_test]
#[test]
fn test_other_contract_logs_are_ignored() {
    let logs = vec![to_log(OTHER, &campaign_created(3, "Elsewhere"), TxHash::ZERO)];
    assert_eq!(find_campaign_id(&logs, CONTRACT), None);
    assert!(!logs_contain("none is a decodable CampaignCreated"));
}

#[traced_test]
#[test]
fn test_changed_event_signature_is_flagged() {
    // emitted by the contract, but under a signature this client does not know
    let log = Log {
        inner: alloy::primitives::Log {
            address: CONTRACT,
            data: LogData::new_unchecked(
                vec![B256::repeat_byte(0xab), B256::with_last_byte(7)],
                Default::default(),
            ),
        },
        ..Default::default()
    };
    assert_eq!(find_campaign_id(&[log], CONTRACT), None);
    assert!(logs_contain("none is a decodable CampaignCreated"));
}

#[test]
fn test_decode_known_events() {
    let tx = TxHash::repeat_byte(0x42);

    let created = DonationEvent::decode(&to_log(CONTRACT, &campaign_created(1, "School"), tx));
    assert_eq!(
        created,
        Some(Ok(DonationEvent::CampaignCreated {
            campaign_id: 1,
            name: "School".to_string(),
            beneficiary: USER,
            deadline: 1_700_000_000,
            transaction_hash: Some(tx),
        }))
    );

    let donation = DonationEvent::decode(&to_log(CONTRACT, &donation_made(1, true), tx));
    let Some(Ok(donation)) = donation else {
        panic!("expected a DonationMade event");
    };
    assert_eq!(donation.campaign_id(), 1);
    assert!(matches!(
        donation,
        DonationEvent::DonationMade {
            anonymous: true,
            timestamp: 1_700_000_100,
            ..
        }
    ));
}

#[test]
fn test_decode_unknown_and_malformed() {
    let unknown = Log {
        inner: alloy::primitives::Log {
            address: CONTRACT,
            data: LogData::new_unchecked(vec![B256::repeat_byte(1)], Default::default()),
        },
        ..Default::default()
    };
    assert_eq!(DonationEvent::decode(&unknown), None);

    // right signature, missing indexed topics
    let truncated = Log {
        inner: alloy::primitives::Log {
            address: CONTRACT,
            data: LogData::new_unchecked(
                vec![<DonationMade as alloy::sol_types::SolEvent>::SIGNATURE_HASH],
                Default::default(),
            ),
        },
        ..Default::default()
    };
    assert!(matches!(
        DonationEvent::decode(&truncated),
        Some(Err(DonationError::DecodeError(_)))
    ));
}

#[tokio::test]
async fn test_listener_dispatches_by_signature() {
    let (provider, _) = mocked_provider();
    let listener = EventListener::create_contract_listener(provider, CONTRACT);

    let names = Arc::new(Mutex::new(Vec::new()));
    let donations = Arc::new(Mutex::new(Vec::new()));

    let sink = names.clone();
    listener
        .add_event_handler(move |event: CampaignCreated| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(event.name);
                Ok(())
            }
        })
        .await;

    let sink = donations.clone();
    listener
        .add_event_handler(move |event: DonationMade| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(event.anonymous);
                Ok(())
            }
        })
        .await;

    listener
        .dispatch(&to_log(CONTRACT, &campaign_created(1, "hello"), TxHash::ZERO))
        .await;
    listener
        .dispatch(&to_log(CONTRACT, &donation_made(1, false), TxHash::ZERO))
        .await;
    listener
        .dispatch(&to_log(CONTRACT, &campaign_created(2, "world!"), TxHash::ZERO))
        .await;

    assert_eq!(*names.lock().unwrap(), vec!["hello", "world!"]);
    assert_eq!(*donations.lock().unwrap(), vec![false]);
}

#[traced_test]
#[tokio::test]
async fn test_handler_errors_do_not_stop_dispatch() {
    let (provider, _) = mocked_provider();
    let listener = EventListener::create_contract_listener(provider, CONTRACT);
    let seen = Arc::new(Mutex::new(0));

    listener
        .add_event_handler(|_: CampaignCreated| async { Err(anyhow::anyhow!("handler failed")) })
        .await;
    let counter = seen.clone();
    listener
        .add_event_handler(move |_: CampaignCreated| {
            let counter = counter.clone();
            async move {
                *counter.lock().unwrap() += 1;
                Ok(())
            }
        })
        .await;

    listener
        .dispatch(&to_log(CONTRACT, &campaign_created(1, "x"), TxHash::ZERO))
        .await;

    assert_eq!(*seen.lock().unwrap(), 1);
    assert!(logs_contain("handler failed"));
}
