// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::CliContext;
use anyhow::Result;
use cdon_sdk::watch_donation_events;
use std::{sync::Arc, time::Duration};
use tracing::error;

pub async fn execute(ctx: &CliContext, poll_interval: Option<Duration>) -> Result<()> {
    let reader = ctx.reader().await?;
    let handle = watch_donation_events(
        reader.provider().clone(),
        *reader.address(),
        poll_interval,
        Arc::new(|event| match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Could not print event: {e}"),
        }),
    )
    .await;

    eprintln!("Watching {}. Press Ctrl+C to stop.", reader.address());
    tokio::signal::ctrl_c().await?;
    handle.unsubscribe();
    Ok(())
}
