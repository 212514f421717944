// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::io;
use tracing::debug;

use kpack_resource::concourse::{self, CheckRequest};
use kpack_resource::kubernetes::create_client;
use kpack_resource::logging;
use kpack_resource::trigger::BuildTrigger;

#[tokio::main]
async fn main() -> Result<()> {
    let request = CheckRequest::read(io::stdin().lock()).context("Failed to read check request")?;
    logging::init(request.source.log_level.as_deref());
    debug!("Check request: {:?}", request);

    let client = create_client(&request.source.kubeconfig).await?;
    let trigger = BuildTrigger::from_source(client, &request.source);

    let versions = trigger.check(request.version.as_ref()).await?;

    concourse::write_response(io::stdout().lock(), &versions)?;
    Ok(())
}
