// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use kpack_resource::concourse::{self, OutRequest};
use kpack_resource::kubernetes::create_client;
use kpack_resource::logging;
use kpack_resource::trigger::BuildTrigger;

#[tokio::main]
async fn main() -> Result<()> {
    let input_dir: PathBuf = env::args_os()
        .nth(1)
        .context("usage: out <input directory>")?
        .into();

    let request = OutRequest::read(io::stdin().lock()).context("Failed to read out request")?;
    logging::init(request.source.log_level.as_deref());
    debug!("Out request: {:?}", request);

    let client = create_client(&request.source.kubeconfig).await?;
    let trigger = BuildTrigger::from_source(client, &request.source);

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    let response = trigger
        .push(&input_dir, &request.params.push_options(), cancel)
        .await?;

    concourse::write_response(io::stdout().lock(), &response)?;
    Ok(())
}

/// Cancel the push when Concourse aborts the step
async fn cancel_on_signal(cancel: CancellationToken) {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }

    info!("Received shutdown signal, cancelling");
    cancel.cancel();
}
