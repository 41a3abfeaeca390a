// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::from_transport_error;
use alloy::{
    primitives::{Address, B256},
    providers::{DynProvider, Provider},
    rpc::types::{BlockNumberOrTag, Filter, Log},
    sol_types::SolEvent,
};
use anyhow::Result;
use cdon_utils::DonationError;
use futures::stream::{self, StreamExt};
use futures_util::future::FutureExt;
use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc, time::Duration};
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, error, info};

type EventHandler =
    Box<dyn Fn(&Log) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

/// Polls the contract's logs and hands each decoded event to the handlers registered for it
#[derive(Clone)]
pub struct EventListener {
    provider: DynProvider,
    filter: Filter,
    poll_interval: Option<Duration>,
    handlers: Arc<RwLock<HashMap<B256, Vec<EventHandler>>>>,
}

impl EventListener {
    pub fn new(provider: DynProvider, filter: Filter) -> Self {
        Self {
            provider,
            filter,
            poll_interval: None,
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Listen to everything `contract` emits from the latest block on
    pub fn create_contract_listener(provider: DynProvider, contract: Address) -> Self {
        let filter = Filter::new()
            .address(contract)
            .from_block(BlockNumberOrTag::Latest);
        Self::new(provider, filter)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Register a handler for raw logs whose first topic is `signature`
    pub async fn add_log_handler<F, Fut>(&self, signature: B256, handler: F)
    where
        F: Fn(Log) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let wrapped_handler: EventHandler = Box::new(move |log: &Log| {
            let handler = Arc::clone(&handler);
            let log = log.clone();
            async move { handler(log).await }.boxed()
        });

        self.handlers
            .write()
            .await
            .entry(signature)
            .or_default()
            .push(wrapped_handler);
    }

    pub async fn add_event_handler<E, F, Fut>(&self, handler: F)
    where
        E: SolEvent + Send + Clone + 'static,
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        self.add_log_handler(E::SIGNATURE_HASH, move |log: Log| {
            let handler = Arc::clone(&handler);
            async move {
                let decoded = log.log_decode::<E>()?;
                handler(decoded.inner.data).await
            }
        })
        .await;
    }

    /// Run every handler registered for the log's signature. Handler errors are logged.
    pub async fn dispatch(&self, log: &Log) {
        let Some(topic0) = log.topic0() else {
            return;
        };
        let handlers = self.handlers.read().await;
        let Some(handlers) = handlers.get(topic0) else {
            debug!("No handler for event {}", topic0);
            return;
        };
        for handler in handlers {
            if let Err(e) = handler(log).await {
                error!("Error processing event {}: {:?}", topic0, e);
            }
        }
    }

    pub async fn listen(&self) -> Result<(), DonationError> {
        let mut poller = self
            .provider
            .watch_logs(&self.filter)
            .await
            .map_err(from_transport_error)?;
        if let Some(interval) = self.poll_interval {
            poller.set_poll_interval(interval);
        }

        info!("Listening for contract events...");
        let mut logs = poller.into_stream().flat_map(stream::iter);
        while let Some(log) = logs.next().await {
            self.dispatch(&log).await;
        }
        Ok(())
    }

    /// Listen in the background until the returned handle is dropped or unsubscribed
    pub fn start(self) -> ListenerHandle {
        let task = tokio::spawn(async move {
            if let Err(e) = self.listen().await {
                error!("Event listener stopped: {e}");
            }
        });
        ListenerHandle { task }
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

pub struct ListenerHandle {
    task: JoinHandle<()>,
}

impl ListenerHandle {
    pub fn unsubscribe(self) {
        drop(self)
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
