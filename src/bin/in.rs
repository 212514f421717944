// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use kpack_resource::concourse::{self, InRequest};
use kpack_resource::kubernetes::create_client;
use kpack_resource::logging;
use kpack_resource::trigger::BuildTrigger;

#[tokio::main]
async fn main() -> Result<()> {
    let output_dir: PathBuf = env::args_os()
        .nth(1)
        .context("usage: in <output directory>")?
        .into();

    let request = InRequest::read(io::stdin().lock()).context("Failed to read in request")?;
    logging::init(request.source.log_level.as_deref());
    debug!("In request: {:?}", request);

    let client = create_client(&request.source.kubeconfig).await?;
    let trigger = BuildTrigger::from_source(client, &request.source);

    let response = trigger.fetch(&output_dir, &request.version).await?;

    concourse::write_response(io::stdout().lock(), &response)?;
    Ok(())
}
